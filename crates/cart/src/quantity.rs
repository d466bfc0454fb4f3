//! Quantities as received from callers.
//!
//! Scripts and UI layers hand quantities over as JSON numbers, so `2.5` or
//! `NaN` can reach the cart. [`QuantityInput`] keeps the raw value until the
//! transition decides whether it is a usable whole number.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An integer-or-number quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Integer(i64),
    Number(f64),
}

/// A whole-numbered quantity, sorted by its effect on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WholeQuantity {
    /// Zero or below, however large in magnitude.
    NonPositive,
    /// A quantity a line can hold.
    Units(u32),
    /// A whole number above `u32::MAX`.
    TooLarge,
}

impl QuantityInput {
    /// The quantity as a whole number, if it is one.
    ///
    /// Whole-valued numbers such as `3.0` or `-1e30` count; fractional,
    /// infinite, or NaN values do not.
    #[must_use]
    #[allow(
        clippy::float_cmp,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn whole(self) -> Option<WholeQuantity> {
        match self {
            Self::Integer(n) if n <= 0 => Some(WholeQuantity::NonPositive),
            Self::Integer(n) => Some(
                u32::try_from(n).map_or(WholeQuantity::TooLarge, WholeQuantity::Units),
            ),
            Self::Number(x) if !x.is_finite() || x.trunc() != x => None,
            Self::Number(x) if x <= 0.0 => Some(WholeQuantity::NonPositive),
            Self::Number(x) if x > f64::from(u32::MAX) => Some(WholeQuantity::TooLarge),
            Self::Number(x) => Some(WholeQuantity::Units(x as u32)),
        }
    }
}

impl fmt::Display for QuantityInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Number(x) => write!(f, "{x}"),
        }
    }
}

impl From<i64> for QuantityInput {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for QuantityInput {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u32> for QuantityInput {
    fn from(n: u32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for QuantityInput {
    fn from(x: f64) -> Self {
        Self::Number(x)
    }
}
