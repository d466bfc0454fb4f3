//! Cart lines and add requests.

use menu_cart_core::{Dish, DishId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::customization::{Customization, Customizations};
use crate::error::LineInputError;
use crate::quantity::{QuantityInput, WholeQuantity};

/// An add-to-cart request, as resolved by the catalog.
///
/// `unit_price` already reflects any promotion; the cart never re-prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineCandidate {
    pub item_id: DishId,
    pub display_name: String,
    pub unit_price: Decimal,
    pub quantity: QuantityInput,
    #[serde(default)]
    pub customizations: Customizations,
}

impl LineCandidate {
    /// A single, uncustomized unit.
    #[must_use]
    pub fn new(item_id: DishId, display_name: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            item_id,
            display_name: display_name.into(),
            unit_price,
            quantity: QuantityInput::Integer(1),
            customizations: Customizations::new(),
        }
    }

    /// Build a request from a catalog dish at its effective price.
    #[must_use]
    pub fn from_dish(dish: &Dish) -> Self {
        Self::new(dish.id.clone(), dish.name.clone(), dish.effective_price())
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: impl Into<QuantityInput>) -> Self {
        self.quantity = quantity.into();
        self
    }

    #[must_use]
    pub fn with_customization(mut self, key: impl Into<String>, customization: Customization) -> Self {
        self.customizations = self.customizations.with(key, customization);
        self
    }

    #[must_use]
    pub fn with_customizations(mut self, customizations: Customizations) -> Self {
        self.customizations = customizations;
        self
    }

    /// Check the request and return its quantity as a unit count.
    ///
    /// # Errors
    ///
    /// Returns a [`LineInputError`] for a blank item id, a negative price or
    /// surcharge, or a quantity that is not a positive integer.
    pub fn validate(&self) -> Result<u32, LineInputError> {
        if self.item_id.as_str().trim().is_empty() {
            return Err(LineInputError::MissingItemId);
        }
        if self.unit_price < Decimal::ZERO {
            return Err(LineInputError::NegativeUnitPrice(self.unit_price));
        }
        self.customizations.validate()?;

        match self.quantity.whole() {
            Some(WholeQuantity::Units(n)) => Ok(n),
            _ => Err(LineInputError::InvalidQuantity(self.quantity.to_string())),
        }
    }

    /// Merge key of the line this request targets.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(&self.item_id, &self.customizations)
    }
}

/// Identity of a cart line: the item plus its canonical customization set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    item_id: DishId,
    customizations: String,
}

impl LineKey {
    #[must_use]
    pub fn new(item_id: &DishId, customizations: &Customizations) -> Self {
        Self {
            item_id: item_id.clone(),
            customizations: customizations.canonical_key(),
        }
    }

    #[must_use]
    pub const fn item_id(&self) -> &DishId {
        &self.item_id
    }
}

/// One priced, quantified entry in the cart.
///
/// Fields are private: a line is only created or re-quantified through
/// constructors that recompute `line_total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    item_id: DishId,
    display_name: String,
    unit_price: Decimal,
    unit_surcharge: Decimal,
    quantity: u32,
    customizations: Customizations,
    line_total: Decimal,
}

impl CartLine {
    /// Price a validated request.
    pub(crate) fn priced(candidate: &LineCandidate, quantity: u32) -> Option<Self> {
        let line = Self {
            item_id: candidate.item_id.clone(),
            display_name: candidate.display_name.clone(),
            unit_price: candidate.unit_price,
            unit_surcharge: candidate.customizations.surcharge_total()?,
            quantity,
            customizations: candidate.customizations.clone(),
            line_total: Decimal::ZERO,
        };
        line.with_quantity(quantity)
    }

    /// The same line at a new quantity, with its total recomputed.
    ///
    /// Returns `None` if the total overflows.
    pub(crate) fn with_quantity(&self, quantity: u32) -> Option<Self> {
        let line_total = self
            .unit_price
            .checked_add(self.unit_surcharge)?
            .checked_mul(Decimal::from(quantity))?;
        Some(Self {
            quantity,
            line_total,
            ..self.clone()
        })
    }

    #[must_use]
    pub const fn item_id(&self) -> &DishId {
        &self.item_id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Catalog price per unit, before surcharges.
    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub const fn customizations(&self) -> &Customizations {
        &self.customizations
    }

    /// Sum of customization surcharges charged per unit.
    #[must_use]
    pub const fn unit_surcharge(&self) -> Decimal {
        self.unit_surcharge
    }

    /// `(unit_price + surcharges) * quantity`.
    #[must_use]
    pub const fn line_total(&self) -> Decimal {
        self.line_total
    }

    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(&self.item_id, &self.customizations)
    }
}
