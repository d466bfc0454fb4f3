//! Cart commands.

use menu_cart_core::DishId;
use serde::{Deserialize, Serialize};

use crate::line::LineCandidate;
use crate::quantity::QuantityInput;

/// A mutation request, interpreted by [`crate::CartState::apply`].
///
/// Serialized with a `type` tag so command scripts read naturally:
///
/// ```yaml
/// - type: add_line
///   item_id: burger
///   display_name: Burger
///   unit_price: "25.00"
///   quantity: 2
/// - type: set_quantity
///   item_id: burger
///   quantity: 0
/// - type: clear
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartCommand {
    /// Merge into the line with the same item and customizations, or append.
    AddLine(LineCandidate),
    /// Drop every line for the item, whatever its customizations.
    RemoveLine { item_id: DishId },
    /// Set every line for the item to `quantity`; zero or less removes them.
    SetQuantity {
        item_id: DishId,
        quantity: QuantityInput,
    },
    /// Empty the cart.
    Clear,
}

impl CartCommand {
    /// Short name used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddLine(_) => "add_line",
            Self::RemoveLine { .. } => "remove_line",
            Self::SetQuantity { .. } => "set_quantity",
            Self::Clear => "clear",
        }
    }

    /// Item the command targets, if any.
    #[must_use]
    pub const fn item_id(&self) -> Option<&DishId> {
        match self {
            Self::AddLine(candidate) => Some(&candidate.item_id),
            Self::RemoveLine { item_id } | Self::SetQuantity { item_id, .. } => Some(item_id),
            Self::Clear => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_deserialize_tagged_commands() {
        let json = r#"[
            {"type": "add_line", "item_id": "x", "display_name": "X",
             "unit_price": "10.00", "quantity": 2,
             "customizations": {"bacon": {"label": "Bacon", "surcharge": "8.00"}}},
            {"type": "remove_line", "item_id": "x"},
            {"type": "set_quantity", "item_id": "x", "quantity": 2.5},
            {"type": "clear"}
        ]"#;
        let commands: Vec<CartCommand> = serde_json::from_str(json).unwrap();
        assert_eq!(commands.len(), 4);

        let CartCommand::AddLine(candidate) = &commands[0] else {
            panic!("expected add_line");
        };
        assert_eq!(candidate.unit_price, Decimal::new(1000, 2));
        assert_eq!(candidate.quantity, QuantityInput::Integer(2));
        assert!(candidate.customizations.contains("bacon"));

        assert_eq!(commands[1].kind(), "remove_line");
        assert!(matches!(
            commands[2],
            CartCommand::SetQuantity {
                quantity: QuantityInput::Number(_),
                ..
            }
        ));
        assert_eq!(commands[3], CartCommand::Clear);
        assert_eq!(commands[3].item_id(), None);
    }
}
