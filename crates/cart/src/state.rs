//! Immutable cart state and its transition function.

use menu_cart_core::DishId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::command::CartCommand;
use crate::error::{CartError, LineInputError};
use crate::line::{CartLine, LineCandidate};
use crate::quantity::{QuantityInput, WholeQuantity};

/// The cart: ordered lines plus totals derived from them.
///
/// A `CartState` is never modified. Every transition builds a new value
/// whose totals are recomputed from the full line list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartState {
    lines: Vec<CartLine>,
    grand_total: Decimal,
    total_unit_count: u64,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of every line total.
    #[must_use]
    pub const fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    /// Sum of every line quantity.
    #[must_use]
    pub const fn total_unit_count(&self) -> u64 {
        self.total_unit_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Lines for one item, across all customization variants.
    pub fn lines_for<'a>(&'a self, item_id: &'a DishId) -> impl Iterator<Item = &'a CartLine> {
        self.lines.iter().filter(move |line| line.item_id() == item_id)
    }

    /// Apply a command, returning the next state.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidLineInput`] for a malformed add and
    /// [`CartError::InvalidQuantityInput`] or
    /// [`CartError::QuantityOutOfRange`] for an unusable quantity. `self` is
    /// left as it was either way.
    pub fn apply(&self, command: &CartCommand) -> Result<Self, CartError> {
        match command {
            CartCommand::AddLine(candidate) => self.with_line(candidate),
            CartCommand::RemoveLine { item_id } => Ok(self.without_item(item_id)),
            CartCommand::SetQuantity { item_id, quantity } => {
                self.with_quantity(item_id, *quantity)
            }
            CartCommand::Clear => Ok(Self::empty()),
        }
    }

    /// Add a line, merging with an existing line of the same key.
    ///
    /// A merge only accumulates quantity: the existing line keeps its name,
    /// price, and customizations.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidLineInput`] if the request is malformed.
    pub fn with_line(&self, candidate: &LineCandidate) -> Result<Self, CartError> {
        let quantity = candidate.validate()?;
        let key = candidate.key();

        let mut lines = self.lines.clone();
        if let Some(existing) = lines.iter_mut().find(|line| line.key() == key) {
            let merged = existing
                .quantity()
                .checked_add(quantity)
                .and_then(|total| existing.with_quantity(total))
                .ok_or(LineInputError::AmountOverflow)?;
            *existing = merged;
        } else {
            let line =
                CartLine::priced(candidate, quantity).ok_or(LineInputError::AmountOverflow)?;
            lines.push(line);
        }

        Self::from_lines(lines).ok_or_else(|| LineInputError::AmountOverflow.into())
    }

    /// Remove every line for `item_id`. Unknown items are a no-op.
    #[must_use]
    pub fn without_item(&self, item_id: &DishId) -> Self {
        let lines: Vec<CartLine> = self
            .lines
            .iter()
            .filter(|line| line.item_id() != item_id)
            .cloned()
            .collect();
        // Removing lines cannot make a valid total overflow.
        Self::from_lines(lines).unwrap_or_default()
    }

    /// Set the quantity of every line for `item_id`.
    ///
    /// Zero or negative whole quantities of any magnitude remove the item,
    /// exactly as [`Self::without_item`] does.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantityInput`] if `quantity` is not a
    /// whole number and [`CartError::QuantityOutOfRange`] if it is above
    /// `u32::MAX` or would overflow a line amount.
    pub fn with_quantity(
        &self,
        item_id: &DishId,
        quantity: impl Into<QuantityInput>,
    ) -> Result<Self, CartError> {
        let quantity = quantity.into();
        let out_of_range = || CartError::QuantityOutOfRange(quantity.to_string());
        let requested = match quantity.whole() {
            None => return Err(CartError::InvalidQuantityInput(quantity.to_string())),
            Some(WholeQuantity::NonPositive) => return Ok(self.without_item(item_id)),
            Some(WholeQuantity::TooLarge) => return Err(out_of_range()),
            Some(WholeQuantity::Units(n)) => n,
        };

        let lines = self
            .lines
            .iter()
            .map(|line| {
                if line.item_id() == item_id {
                    line.with_quantity(requested)
                } else {
                    Some(line.clone())
                }
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(out_of_range)?;

        Self::from_lines(lines).ok_or_else(out_of_range)
    }

    /// Build a state from lines, deriving both totals from scratch.
    fn from_lines(lines: Vec<CartLine>) -> Option<Self> {
        let grand_total = lines
            .iter()
            .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.line_total()))?;
        let total_unit_count = lines.iter().map(|line| u64::from(line.quantity())).sum();
        Some(Self {
            lines,
            grand_total,
            total_unit_count,
        })
    }
}
