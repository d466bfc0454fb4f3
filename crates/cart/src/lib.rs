//! Menu Cart - cart aggregation engine.
//!
//! Owns the cart of a single ordering session: merges additions, keeps the
//! derived totals in step with the lines, and hands a finalized line list to
//! an order store on checkout.
//!
//! # Architecture
//!
//! - [`CartState`] is an immutable value. [`CartState::apply`] is the single
//!   transition function: it takes a [`CartCommand`] and returns a new,
//!   fully-priced state or an error, never touching `self`.
//! - [`Cart`] is the single-owner aggregator that swaps in the next state.
//!   [`SharedCart`] serializes a [`Cart`] behind one lock for threaded hosts.
//! - [`checkout`] turns a snapshot into an [`checkout::OrderRequest`] and
//!   clears the cart only after the order store accepts it.
//!
//! No module here performs I/O; the order store is reached through the
//! [`checkout::OrderSubmitter`] trait.
//!
//! # Example
//!
//! ```
//! use menu_cart::{Cart, LineCandidate};
//! use menu_cart_core::DishId;
//! use rust_decimal::Decimal;
//!
//! let mut cart = Cart::new();
//! let burger = DishId::parse("burger").unwrap();
//! cart.add_line(LineCandidate::new(burger.clone(), "Burger", Decimal::TEN).with_quantity(2))
//!     .unwrap();
//!
//! let snapshot = cart.snapshot();
//! assert_eq!(snapshot.grand_total(), Decimal::from(20));
//! assert_eq!(snapshot.total_unit_count(), 2);
//!
//! cart.set_quantity(&burger, 0).unwrap();
//! assert!(cart.snapshot().is_empty());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod aggregator;
pub mod checkout;
pub mod command;
pub mod customization;
pub mod error;
pub mod line;
pub mod quantity;
pub mod state;

pub use aggregator::{Cart, SharedCart};
pub use command::CartCommand;
pub use customization::{Customization, Customizations};
pub use error::{CartError, LineInputError};
pub use line::{CartLine, LineCandidate, LineKey};
pub use quantity::{QuantityInput, WholeQuantity};
pub use state::CartState;
