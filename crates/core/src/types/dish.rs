//! Catalog dish snapshot.
//!
//! The catalog is an external collaborator; this is the subset of a dish
//! record the ordering flow reads. [`Dish::effective_price`] is where the
//! promotional price is resolved before anything reaches the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::DishId;

/// A purchasable dish as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: DishId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// List price.
    pub price: Decimal,
    #[serde(default)]
    pub promotion_price: Option<Decimal>,
    #[serde(default)]
    pub is_promotion: bool,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub is_gluten_free: bool,
}

impl Dish {
    /// Price charged per unit: the promotion price while a promotion is
    /// running and one is set, otherwise the list price.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        match (self.is_promotion, self.promotion_price) {
            (true, Some(promo)) => promo,
            _ => self.price,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dish(is_promotion: bool, promotion_price: Option<Decimal>) -> Dish {
        Dish {
            id: DishId::parse("feijoada").unwrap(),
            name: "Feijoada".to_owned(),
            description: String::new(),
            price: Decimal::new(4500, 2),
            promotion_price,
            is_promotion,
            is_vegetarian: false,
            is_vegan: false,
            is_gluten_free: true,
        }
    }

    #[test]
    fn test_effective_price_uses_promotion() {
        let promo = Decimal::new(3990, 2);
        assert_eq!(dish(true, Some(promo)).effective_price(), promo);
    }

    #[test]
    fn test_effective_price_ignores_inactive_promotion() {
        let list = Decimal::new(4500, 2);
        assert_eq!(dish(false, Some(Decimal::ONE)).effective_price(), list);
        assert_eq!(dish(true, None).effective_price(), list);
    }
}
