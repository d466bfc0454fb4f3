//! Replay a cart command script.
//!
//! # Usage
//!
//! ```bash
//! menu-cli replay cart.yaml
//! menu-cli replay cart.json --json
//! ```
//!
//! Scripts are a list of tagged commands. Files ending in `.json` are read
//! as JSON, anything else as YAML:
//!
//! ```yaml
//! - type: add_line
//!   item_id: burger
//!   display_name: Burger
//!   unit_price: "25.00"
//!   quantity: 2
//!   customizations:
//!     bacon: { label: Bacon, surcharge: "8.00" }
//! - type: set_quantity
//!   item_id: burger
//!   quantity: 3
//! ```
//!
//! A rejected command is reported and skipped; the cart stays as it was
//! before that command and replay continues.

use std::path::Path;

use menu_cart::{Cart, CartCommand};
use thiserror::Error;
use tracing::info;

use crate::config::CliConfig;
use crate::render;

/// Errors that can occur while loading a script.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The script file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// The script is not valid JSON.
    #[error("Invalid JSON script: {0}")]
    Json(#[from] serde_json::Error),

    /// The script is not valid YAML.
    #[error("Invalid YAML script: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The cart could not be printed as JSON.
    #[error("Failed to encode cart: {0}")]
    Encode(serde_json::Error),
}

/// Outcome of applying a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub rejected: usize,
}

/// Replay a script and print the resulting cart.
///
/// # Errors
///
/// Returns an error if the script cannot be read or parsed.
pub async fn run(script: &Path, json: bool, config: &CliConfig) -> Result<(), ReplayError> {
    let commands = load_script(script).await?;
    let mut cart = Cart::new();
    let summary = apply_script(&mut cart, &commands);
    info!(
        applied = summary.applied,
        rejected = summary.rejected,
        "Script replayed"
    );

    let snapshot = cart.snapshot();
    let output = if json {
        serde_json::to_string_pretty(&*snapshot).map_err(ReplayError::Encode)?
    } else {
        render::cart_text(&snapshot, config.currency)
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{}", output.trim_end());
    }
    Ok(())
}

/// Read and parse a script file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub async fn load_script(path: &Path) -> Result<Vec<CartCommand>, ReplayError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ReplayError::Read {
            path: path.display().to_string(),
            source,
        })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    parse_script(&content, is_json)
}

/// Parse script text as JSON or YAML.
///
/// # Errors
///
/// Returns an error if the text does not parse.
pub fn parse_script(content: &str, is_json: bool) -> Result<Vec<CartCommand>, ReplayError> {
    if is_json {
        Ok(serde_json::from_str(content)?)
    } else {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Apply every command in order, counting rejections.
pub fn apply_script(cart: &mut Cart, commands: &[CartCommand]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for command in commands {
        // Rejections are logged by the cart and leave it unchanged.
        if cart.dispatch(command).is_ok() {
            summary.applied += 1;
        } else {
            summary.rejected += 1;
        }
    }
    summary
}
