//! Integration tests for cart aggregator behavior.
//!
//! These tests drive the public `Cart` API the way the menu, customization
//! dialog, and cart sidebar do.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use menu_cart::{Cart, CartCommand, CartError, CartState, Customizations, LineInputError};
use menu_cart_integration_tests::{add_on, assert_consistent, candidate, dish_id, money};

// =============================================================================
// Merge Tests
// =============================================================================

#[test]
fn test_add_merge_then_zero_empties_cart() {
    let mut cart = Cart::new();

    cart.add_line(candidate("X", 1000).with_quantity(2)).unwrap();
    let state = cart.snapshot();
    assert_eq!(state.line_count(), 1);
    assert_eq!(state.lines()[0].line_total(), money(2000));
    assert_eq!(state.grand_total(), money(2000));
    assert_eq!(state.total_unit_count(), 2);

    cart.add_line(candidate("X", 1000).with_quantity(1)).unwrap();
    let state = cart.snapshot();
    assert_eq!(state.line_count(), 1);
    assert_eq!(state.lines()[0].quantity(), 3);
    assert_eq!(state.lines()[0].line_total(), money(3000));

    cart.set_quantity(&dish_id("X"), 0).unwrap();
    let state = cart.snapshot();
    assert!(state.is_empty());
    assert_eq!(state.grand_total(), money(0));
    assert_eq!(state.total_unit_count(), 0);
}

#[test]
fn test_merge_ignores_customization_order() {
    let forward: Customizations = [add_on("extra_cheese"), add_on("bacon")].into_iter().collect();
    let mut backward = Customizations::new();
    let (key, c) = add_on("bacon");
    backward.set(key, c, true);
    let (key, c) = add_on("extra_cheese");
    backward.set(key, c, true);

    let mut cart = Cart::new();
    cart.add_line(candidate("burger", 2500).with_customizations(forward))
        .unwrap();
    cart.add_line(
        candidate("burger", 2500)
            .with_quantity(2)
            .with_customizations(backward),
    )
    .unwrap();

    let state = cart.snapshot();
    assert_eq!(state.line_count(), 1);
    assert_eq!(state.lines()[0].quantity(), 3);
    // (25 + 5 + 8) * 3
    assert_eq!(state.grand_total(), money(11400));
    assert_consistent(&state);
}

#[test]
fn test_same_item_different_customizations_coexist() {
    let (key, c) = add_on("no_onion");
    let mut cart = Cart::new();
    cart.add_line(candidate("burger", 2500)).unwrap();
    cart.add_line(candidate("burger", 2500).with_customization(key, c))
        .unwrap();

    let state = cart.snapshot();
    assert_eq!(state.line_count(), 2);
    assert_eq!(state.total_unit_count(), 2);
    assert_eq!(state.lines_for(&dish_id("burger")).count(), 2);
}

#[test]
fn test_merge_is_first_write_wins_for_price() {
    let mut cart = Cart::new();
    cart.add_line(candidate("pizza", 4000)).unwrap();

    // Promotion started after the first add
    let mut discounted = candidate("pizza", 3000);
    discounted.display_name = "Pizza (promo)".to_owned();
    cart.add_line(discounted).unwrap();

    let state = cart.snapshot();
    let line = &state.lines()[0];
    assert_eq!(line.quantity(), 2);
    assert_eq!(line.unit_price(), money(4000));
    assert_eq!(line.display_name(), "PIZZA");
    assert_eq!(state.grand_total(), money(8000));
}

#[test]
fn test_new_lines_append_in_insertion_order() {
    let mut cart = Cart::new();
    for id in ["c", "a", "b", "a"] {
        cart.add_line(candidate(id, 100)).unwrap();
    }
    let order: Vec<_> = cart
        .snapshot()
        .lines()
        .iter()
        .map(|line| line.item_id().to_string())
        .collect();
    assert_eq!(order, ["c", "a", "b"]);
}

// =============================================================================
// Removal and Quantity Tests
// =============================================================================

#[test]
fn test_remove_drops_every_variant() {
    let (key, c) = add_on("bacon");
    let mut cart = Cart::new();
    cart.add_line(candidate("burger", 2500)).unwrap();
    cart.add_line(candidate("burger", 2500).with_customization(key, c))
        .unwrap();
    cart.add_line(candidate("fries", 1200)).unwrap();

    cart.remove_line(&dish_id("burger"));

    let state = cart.snapshot();
    assert_eq!(state.line_count(), 1);
    assert_eq!(state.lines()[0].item_id(), &dish_id("fries"));
    assert_eq!(state.grand_total(), money(1200));
}

#[test]
fn test_remove_unknown_item_is_noop() {
    let mut cart = Cart::new();
    cart.add_line(candidate("fries", 1200)).unwrap();
    let before = cart.snapshot();

    cart.remove_line(&dish_id("ghost"));
    assert_eq!(*cart.snapshot(), *before);
}

#[test]
fn test_non_positive_quantity_equals_remove() {
    let build = || {
        let (key, c) = add_on("extra_sauce");
        let mut cart = Cart::new();
        cart.add_line(candidate("burger", 2500).with_quantity(2))
            .unwrap();
        cart.add_line(candidate("burger", 2500).with_customization(key, c))
            .unwrap();
        cart.add_line(candidate("soda", 600)).unwrap();
        cart
    };

    let mut removed = build();
    removed.remove_line(&dish_id("burger"));

    for quantity in [0_i64, -5] {
        let mut cart = build();
        cart.set_quantity(&dish_id("burger"), quantity).unwrap();
        assert_eq!(*cart.snapshot(), *removed.snapshot(), "quantity {quantity}");
    }

    for quantity in [-1.0, -1e30] {
        let mut cart = build();
        cart.set_quantity(&dish_id("burger"), quantity).unwrap();
        assert_eq!(*cart.snapshot(), *removed.snapshot(), "quantity {quantity}");
    }

    let mut cart = build();
    cart.set_quantity(&dish_id("burger"), i64::MIN).unwrap();
    assert_eq!(*cart.snapshot(), *removed.snapshot());
}

#[test]
fn test_set_quantity_hits_every_variant() {
    let (key, c) = add_on("extra_cheese");
    let mut cart = Cart::new();
    cart.add_line(candidate("burger", 2500).with_quantity(5))
        .unwrap();
    cart.add_line(candidate("burger", 2500).with_customization(key, c))
        .unwrap();

    cart.set_quantity(&dish_id("burger"), 2).unwrap();

    let state = cart.snapshot();
    assert_eq!(state.line_count(), 2);
    assert!(state.lines().iter().all(|line| line.quantity() == 2));
    // 25*2 + 30*2
    assert_eq!(state.grand_total(), money(11000));
    assert_consistent(&state);
}

// =============================================================================
// Rejection Tests
// =============================================================================

#[test]
fn test_rejected_add_is_atomic() {
    let mut cart = Cart::new();
    cart.add_line(candidate("X", 1000).with_quantity(2)).unwrap();
    let before = cart.snapshot();

    let err = cart.add_line(candidate("X", 1000).with_quantity(0)).unwrap_err();
    assert!(matches!(
        err,
        CartError::InvalidLineInput(LineInputError::InvalidQuantity(_))
    ));

    let after = cart.snapshot();
    assert_eq!(after.lines(), before.lines());
    assert_eq!(after.grand_total(), before.grand_total());
    assert_eq!(after.total_unit_count(), before.total_unit_count());
}

#[test]
fn test_negative_amounts_are_rejected() {
    let mut cart = Cart::new();

    let err = cart.add_line(candidate("X", -1)).unwrap_err();
    assert!(matches!(
        err,
        CartError::InvalidLineInput(LineInputError::NegativeUnitPrice(_))
    ));

    let negative = menu_cart::Customization::add_on("Coupon", money(-200));
    let err = cart
        .add_line(candidate("X", 1000).with_customization("coupon", negative))
        .unwrap_err();
    assert!(matches!(
        err,
        CartError::InvalidLineInput(LineInputError::NegativeSurcharge { .. })
    ));

    assert!(cart.snapshot().is_empty());
}

#[test]
fn test_missing_identity_is_rejected() {
    let commands: Vec<CartCommand> = serde_json::from_str(
        r#"[{"type": "add_line", "item_id": " ", "display_name": "?",
             "unit_price": "1.00", "quantity": 1}]"#,
    )
    .unwrap();

    let mut cart = Cart::new();
    assert!(matches!(
        cart.dispatch(&commands[0]),
        Err(CartError::InvalidLineInput(LineInputError::MissingItemId))
    ));
    assert_eq!(*cart.snapshot(), CartState::empty());
}

#[test]
fn test_fractional_set_quantity_is_rejected() {
    let mut cart = Cart::new();
    cart.add_line(candidate("X", 1000).with_quantity(2)).unwrap();
    let before = cart.snapshot();

    let err = cart.set_quantity(&dish_id("X"), 2.5).unwrap_err();
    assert!(matches!(err, CartError::InvalidQuantityInput(_)));
    assert_eq!(*cart.snapshot(), *before);
}

#[test]
fn test_set_quantity_above_line_capacity_is_rejected() {
    let mut cart = Cart::new();
    cart.add_line(candidate("X", 1000).with_quantity(2)).unwrap();
    let before = cart.snapshot();

    for quantity in [5_000_000_000.0, 1e30] {
        let err = cart.set_quantity(&dish_id("X"), quantity).unwrap_err();
        assert!(matches!(err, CartError::QuantityOutOfRange(_)), "quantity {quantity}");
        assert_eq!(*cart.snapshot(), *before);
    }
    let err = cart.set_quantity(&dish_id("X"), 5_000_000_000_i64).unwrap_err();
    assert!(matches!(err, CartError::QuantityOutOfRange(_)));
    assert_eq!(*cart.snapshot(), *before);
}

#[test]
fn test_clear_always_succeeds() {
    let mut cart = Cart::new();
    cart.clear();
    assert!(cart.snapshot().is_empty());

    cart.add_line(candidate("X", 1000).with_quantity(9)).unwrap();
    cart.clear();
    assert_eq!(*cart.snapshot(), CartState::empty());
}
