//! Integration tests for the menu cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p menu-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Merge, removal, quantity, and atomicity properties
//!   of the cart aggregator
//! - `cart_consistency` - Derived totals checked after every step of long
//!   seeded operation sequences
//! - `checkout_flow` - Catalog dish to submitted order
//!
//! This library holds the fixtures the test files share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use menu_cart::{CartLine, CartState, Customization, LineCandidate};
use menu_cart_core::DishId;
use rust_decimal::Decimal;

/// A dish id that is known to be valid.
///
/// # Panics
///
/// Panics if `id` is blank.
#[must_use]
#[allow(clippy::expect_used)]
pub fn dish_id(id: &str) -> DishId {
    DishId::parse(id).expect("fixture ids are not blank")
}

/// A money amount from cents.
#[must_use]
pub fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// A one-unit, uncustomized add request.
#[must_use]
pub fn candidate(id: &str, price_cents: i64) -> LineCandidate {
    LineCandidate::new(dish_id(id), id.to_uppercase(), money(price_cents))
}

/// The add-ons offered by the customization dialog.
#[must_use]
pub fn add_on(key: &str) -> (String, Customization) {
    let customization = match key {
        "extra_cheese" => Customization::add_on("Extra cheese", money(500)),
        "bacon" => Customization::add_on("Bacon", money(800)),
        "extra_sauce" => Customization::add_on("Extra sauce", money(200)),
        "no_onion" => Customization::free("No onion"),
        "no_salt" => Customization::free("No salt"),
        other => Customization::free(other),
    };
    (key.to_owned(), customization)
}

/// Assert that every derived field agrees with the lines.
///
/// # Panics
///
/// Panics if a line total or a cart total is stale.
pub fn assert_consistent(state: &CartState) {
    for line in state.lines() {
        let per_unit = line.unit_price()
            + line
                .customizations()
                .iter()
                .map(|(_, c)| c.surcharge)
                .sum::<Decimal>();
        assert_eq!(
            line.line_total(),
            per_unit * Decimal::from(line.quantity()),
            "stale line total for {}",
            line.item_id()
        );
        assert!(line.quantity() >= 1, "empty line for {}", line.item_id());
    }
    let total: Decimal = state.lines().iter().map(CartLine::line_total).sum();
    let units: u64 = state.lines().iter().map(|l| u64::from(l.quantity())).sum();
    assert_eq!(state.grand_total(), total, "stale grand total");
    assert_eq!(state.total_unit_count(), units, "stale unit count");
}
