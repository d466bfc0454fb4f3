//! Cart error types.
//!
//! Every error here is a caller-input problem: the cart performs no I/O, so
//! nothing is retryable. A rejected command leaves the cart unchanged.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors returned by cart transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Malformed add request.
    #[error("Invalid line input: {0}")]
    InvalidLineInput(#[from] LineInputError),

    /// Quantity passed to set-quantity is not a whole number.
    #[error("Invalid quantity input: {0}")]
    InvalidQuantityInput(String),

    /// Whole quantity passed to set-quantity is more than a line can hold.
    #[error("Quantity out of range: {0}")]
    QuantityOutOfRange(String),

    /// The shared cart's lock was poisoned by a panicking holder.
    #[error("Cart unavailable")]
    Unavailable,
}

/// Why an add request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineInputError {
    #[error("item id is missing")]
    MissingItemId,

    #[error("unit price cannot be negative: {0}")]
    NegativeUnitPrice(Decimal),

    #[error("customization key cannot be empty")]
    EmptyCustomizationKey,

    #[error("surcharge for customization `{key}` cannot be negative: {surcharge}")]
    NegativeSurcharge { key: String, surcharge: Decimal },

    #[error("quantity must be a whole number from 1 to 4294967295, got {0}")]
    InvalidQuantity(String),

    #[error("line amount is too large")]
    AmountOverflow,
}
