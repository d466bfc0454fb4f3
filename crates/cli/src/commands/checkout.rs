//! Dry-run checkout.
//!
//! # Usage
//!
//! ```bash
//! menu-cli checkout cart.yaml -n "Ana Souza" -e ana@example.com \
//!     -p "(11) 99999-9999" -a "Rua das Flores, 10" --payment credit_card -o order.json
//! ```
//!
//! Replays the script, then finalizes the cart against a submitter that
//! writes the order to a JSON file under a fresh UUID instead of calling a
//! real order store.

use std::path::{Path, PathBuf};

use menu_cart::Cart;
use menu_cart::checkout::{
    self, CheckoutError, CustomerForm, OrderConfirmation, OrderRequest, OrderSubmitter,
    SubmitError,
};
use menu_cart_core::{CurrencyCode, OrderId, PaymentMethod, Price};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::replay::{self, ReplayError, ReplaySummary};
use crate::config::CliConfig;

/// Errors that can occur during a CLI checkout.
#[derive(Debug, Error)]
pub enum CheckoutCommandError {
    #[error(transparent)]
    Replay(#[from] ReplayError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// Order file contents.
#[derive(Serialize)]
struct StoredOrder<'a> {
    order_id: &'a OrderId,
    order: &'a OrderRequest,
}

/// Submitter that writes each order to a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSubmitter {
    path: PathBuf,
}

impl JsonFileSubmitter {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OrderSubmitter for JsonFileSubmitter {
    async fn submit(&self, order: &OrderRequest) -> Result<OrderId, SubmitError> {
        let order_id = OrderId::from(Uuid::new_v4());
        let body = serde_json::to_vec_pretty(&StoredOrder {
            order_id: &order_id,
            order,
        })
        .map_err(|e| SubmitError::Rejected(e.to_string()))?;

        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| SubmitError::Unavailable(format!("{}: {e}", self.path.display())))?;
        Ok(order_id)
    }
}

/// Replay a script and check the cart out into `out`.
///
/// # Errors
///
/// Returns an error if the script cannot be loaded or checkout fails.
pub async fn run(
    script: &Path,
    form: &CustomerForm,
    payment_method: PaymentMethod,
    out: &Path,
    config: &CliConfig,
) -> Result<(), CheckoutCommandError> {
    let commands = replay::load_script(script).await?;
    let mut cart = Cart::new();
    let summary = replay::apply_script(&mut cart, &commands);
    if summary.rejected > 0 {
        warn!(
            applied = summary.applied,
            rejected = summary.rejected,
            "Checking out a cart with rejected script commands"
        );
    } else {
        info!(applied = summary.applied, "Script replayed");
    }

    let submitter = JsonFileSubmitter::new(out);
    let confirmation = checkout::finalize(&mut cart, &submitter, form, payment_method).await?;

    info!(path = %out.display(), "Order written");
    #[allow(clippy::print_stdout)]
    {
        println!("{}", confirmation_text(&confirmation, summary, config.currency));
    }
    Ok(())
}

/// Confirmation printed after a checkout.
fn confirmation_text(
    confirmation: &OrderConfirmation,
    summary: ReplaySummary,
    currency: CurrencyCode,
) -> String {
    let mut text = format!(
        "Order {} placed: {} ({} items, {}) - {}",
        confirmation.order_id,
        Price::new(confirmation.total_amount, currency),
        confirmation.unit_count,
        confirmation.payment_method,
        confirmation.status.label(),
    );
    if summary.rejected > 0 {
        text.push_str(&format!(
            "\n{} of {} script commands were rejected",
            summary.rejected,
            summary.applied + summary.rejected,
        ));
    }
    text
}
