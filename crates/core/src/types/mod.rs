//! Core types for the menu cart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod dish;
pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use dish::Dish;
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use status::*;
