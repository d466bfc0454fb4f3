//! Checkout hand-off.
//!
//! Turns the cart into an order request for the order store and clears the
//! cart once the store confirms. The store itself is an external
//! collaborator reached through [`OrderSubmitter`].

use chrono::{DateTime, Utc};
use menu_cart_core::{
    DishId, Email, EmailError, OrderId, OrderStatus, PaymentMethod, PaymentStatus,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::aggregator::Cart;
use crate::customization::Customizations;
use crate::line::CartLine;
use crate::state::CartState;

/// Errors that can occur while finalizing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// A required customer field was left blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The customer email is malformed.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The order store did not accept the order.
    #[error("Order submission failed: {0}")]
    Submit(#[from] SubmitError),
}

/// Errors reported by an [`OrderSubmitter`].
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The store refused the order.
    #[error("Order rejected: {0}")]
    Rejected(String),

    /// The store could not be reached or failed internally.
    #[error("Order store unavailable: {0}")]
    Unavailable(String),
}

/// Delivery details as typed into the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub notes: String,
}

impl CustomerForm {
    /// Check required fields and parse the email.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] for a blank name, email,
    /// phone, or address and [`CheckoutError::InvalidEmail`] for a
    /// malformed email.
    pub fn validate(&self) -> Result<Customer, CheckoutError> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CheckoutError::MissingField(*field));
        }

        let notes = self.notes.trim();
        Ok(Customer {
            name: self.name.trim().to_owned(),
            email: Email::parse(&self.email)?,
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            notes: (!notes.is_empty()).then(|| notes.to_owned()),
        })
    }
}

/// Validated customer details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub notes: Option<String>,
}

/// One order line, copied from a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub dish_id: DishId,
    pub display_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Customization surcharges per unit.
    pub unit_surcharge: Decimal,
    pub customizations: Customizations,
    pub total_price: Decimal,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            dish_id: line.item_id().clone(),
            display_name: line.display_name().to_owned(),
            quantity: line.quantity(),
            unit_price: line.unit_price(),
            unit_surcharge: line.unit_surcharge(),
            customizations: line.customizations().clone(),
            total_price: line.line_total(),
        }
    }
}

/// Everything the order store needs to create an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer: Customer,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total_amount: Decimal,
    pub items: Vec<OrderItem>,
    pub placed_at: DateTime<Utc>,
}

impl OrderRequest {
    /// Build a pending order from a cart snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
    pub fn from_cart(
        state: &CartState,
        customer: Customer,
        payment_method: PaymentMethod,
    ) -> Result<Self, CheckoutError> {
        if state.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(Self {
            customer,
            payment_method,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            total_amount: state.grand_total(),
            items: state.lines().iter().map(OrderItem::from).collect(),
            placed_at: Utc::now(),
        })
    }

    /// Total number of units across items.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Order store the cart hands finalized orders to.
pub trait OrderSubmitter {
    /// Persist the order and return its id.
    fn submit(
        &self,
        order: &OrderRequest,
    ) -> impl Future<Output = Result<OrderId, SubmitError>> + Send;
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub unit_count: u64,
    pub payment_method: PaymentMethod,
}

/// Submit the cart as an order, clearing the cart on success.
///
/// The cart is left untouched if validation or submission fails, so the
/// customer can retry.
///
/// # Errors
///
/// Returns [`CheckoutError`] for an empty cart, invalid customer details, or
/// a failed submission.
#[instrument(skip_all, fields(payment_method = %payment_method))]
pub async fn finalize<S: OrderSubmitter>(
    cart: &mut Cart,
    submitter: &S,
    form: &CustomerForm,
    payment_method: PaymentMethod,
) -> Result<OrderConfirmation, CheckoutError> {
    let snapshot = cart.snapshot();
    if snapshot.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let customer = form.validate()?;
    let order = OrderRequest::from_cart(&snapshot, customer, payment_method)?;

    let order_id = match submitter.submit(&order).await {
        Ok(order_id) => order_id,
        Err(e) => {
            error!(error = %e, total = %order.total_amount, "Order submission failed");
            return Err(e.into());
        }
    };

    info!(
        order_id = %order_id,
        total = %order.total_amount,
        items = order.items.len(),
        "Order submitted"
    );
    cart.clear();

    Ok(OrderConfirmation {
        order_id,
        status: order.status,
        total_amount: order.total_amount,
        unit_count: order.unit_count(),
        payment_method,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::customization::Customization;
    use crate::line::LineCandidate;

    #[derive(Default)]
    struct RecordingSubmitter {
        fail: bool,
        orders: Mutex<Vec<OrderRequest>>,
    }

    impl OrderSubmitter for RecordingSubmitter {
        async fn submit(&self, order: &OrderRequest) -> Result<OrderId, SubmitError> {
            if self.fail {
                return Err(SubmitError::Unavailable("connection refused".to_owned()));
            }
            self.orders.lock().unwrap().push(order.clone());
            Ok(OrderId::parse("order-1").unwrap())
        }
    }

    fn form() -> CustomerForm {
        CustomerForm {
            name: "Ana Souza".to_owned(),
            email: "ana@example.com".to_owned(),
            phone: "(11) 99999-9999".to_owned(),
            address: "Rua das Flores, 10".to_owned(),
            notes: "  ".to_owned(),
        }
    }

    fn filled_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_line(
            LineCandidate::new(DishId::parse("burger").unwrap(), "Burger", Decimal::new(2500, 2))
                .with_quantity(2)
                .with_customization("bacon", Customization::add_on("Bacon", Decimal::new(800, 2))),
        )
        .unwrap();
        cart
    }

    #[tokio::test]
    async fn test_finalize_submits_and_clears() {
        let mut cart = filled_cart();
        let submitter = RecordingSubmitter::default();

        let confirmation = finalize(&mut cart, &submitter, &form(), PaymentMethod::Pix)
            .await
            .unwrap();
        assert_eq!(confirmation.order_id.as_str(), "order-1");
        assert_eq!(confirmation.status, OrderStatus::Pending);
        assert_eq!(confirmation.total_amount, Decimal::new(6600, 2));
        assert_eq!(confirmation.unit_count, 2);
        assert!(cart.snapshot().is_empty());

        let orders = submitter.orders.lock().unwrap();
        let order = &orders[0];
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.customer.notes, None);
        assert_eq!(order.items[0].unit_price, Decimal::new(2500, 2));
        assert_eq!(order.items[0].unit_surcharge, Decimal::new(800, 2));
        assert_eq!(order.items[0].total_price, Decimal::new(6600, 2));
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_cart() {
        let mut cart = filled_cart();
        let before = cart.snapshot();
        let submitter = RecordingSubmitter {
            fail: true,
            ..RecordingSubmitter::default()
        };

        let err = finalize(&mut cart, &submitter, &form(), PaymentMethod::CreditCard)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Submit(SubmitError::Unavailable(_))));
        assert_eq!(*cart.snapshot(), *before);
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let mut cart = Cart::new();
        let submitter = RecordingSubmitter::default();
        let err = finalize(&mut cart, &submitter, &form(), PaymentMethod::Pix)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
        assert!(submitter.orders.lock().unwrap().is_empty());
    }

    #[test]
    fn test_form_requires_fields() {
        let mut missing_phone = form();
        missing_phone.phone = " ".to_owned();
        assert!(matches!(
            missing_phone.validate(),
            Err(CheckoutError::MissingField("phone"))
        ));

        let mut bad_email = form();
        bad_email.email = "ana".to_owned();
        assert!(matches!(
            bad_email.validate(),
            Err(CheckoutError::InvalidEmail(_))
        ));
    }
}
