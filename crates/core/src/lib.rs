//! Menu Cart Core - Shared types library.
//!
//! This crate provides common types used across all menu cart components:
//! - `menu-cart` - The cart aggregation engine and checkout hand-off
//! - `menu-cart-cli` - Command-line tools for replaying and checking out carts
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, statuses,
//!   and the catalog dish snapshot

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
