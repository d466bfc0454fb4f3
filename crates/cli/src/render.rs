//! Plain-text rendering of cart snapshots.

use std::fmt::Write as _;

use menu_cart::CartState;
use menu_cart_core::{CurrencyCode, Price};

/// Render a cart as a human-readable receipt.
pub fn cart_text(state: &CartState, currency: CurrencyCode) -> String {
    if state.is_empty() {
        return "Cart is empty\n".to_owned();
    }

    let price = |amount| Price::new(amount, currency);
    let mut out = String::new();
    for line in state.lines() {
        let _ = writeln!(
            out,
            "{} x {} @ {}  {}",
            line.quantity(),
            line.display_name(),
            price(line.unit_price()),
            price(line.line_total()),
        );
        for (_, customization) in line.customizations().iter() {
            match &customization.note {
                Some(note) => {
                    let _ = writeln!(out, "    {}: {note}", customization.label);
                }
                None if customization.surcharge.is_zero() => {
                    let _ = writeln!(out, "    {}", customization.label);
                }
                None => {
                    let _ = writeln!(
                        out,
                        "    + {} ({})",
                        customization.label,
                        price(customization.surcharge)
                    );
                }
            }
        }
    }
    let _ = writeln!(
        out,
        "Total: {} ({} items)",
        price(state.grand_total()),
        state.total_unit_count()
    );
    out
}
