//! Menu Cart CLI - replay cart command scripts and dry-run checkouts.
//!
//! # Usage
//!
//! ```bash
//! # Replay a script and print the resulting cart
//! menu-cli replay cart.yaml
//!
//! # Same, as JSON
//! menu-cli replay cart.yaml --json
//!
//! # Replay, then check out into a JSON file instead of a real order store
//! menu-cli checkout cart.yaml -n "Ana Souza" -e ana@example.com \
//!     -p "(11) 99999-9999" -a "Rua das Flores, 10" --payment pix -o order.json
//! ```
//!
//! # Commands
//!
//! - `replay` - Apply a script of cart commands and print the cart
//! - `checkout` - Replay a script and submit the cart as an order

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use menu_cart_core::PaymentMethod;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod render;

use config::{CliConfig, LogFormat};

#[derive(Parser)]
#[command(name = "menu-cli")]
#[command(version, about = "Menu cart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a YAML or JSON script of cart commands and print the cart
    Replay {
        /// Path to the script
        script: PathBuf,

        /// Print the cart as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Replay a script, then submit the cart as an order to a JSON file
    Checkout {
        /// Path to the script
        script: PathBuf,

        /// Customer full name
        #[arg(short, long)]
        name: String,

        /// Customer email address
        #[arg(short, long)]
        email: String,

        /// Customer phone / WhatsApp
        #[arg(short, long)]
        phone: String,

        /// Delivery address
        #[arg(short, long)]
        address: String,

        /// Notes for the kitchen or courier
        #[arg(long, default_value = "")]
        notes: String,

        /// Payment method (`pix`, `credit_card`, `debit_card`)
        #[arg(long, default_value = "pix")]
        payment: PaymentMethod,

        /// File the order is written to
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn init_tracing(config: &CliConfig) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "menu_cart=info,menu_cart_cli=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Invalid configuration: {e}");
            }
            std::process::exit(2);
        }
    };

    init_tracing(&config);

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Replay { script, json } => {
            commands::replay::run(&script, json, config).await?;
        }
        Commands::Checkout {
            script,
            name,
            email,
            phone,
            address,
            notes,
            payment,
            out,
        } => {
            let form = menu_cart::checkout::CustomerForm {
                name,
                email,
                phone,
                address,
                notes,
            };
            commands::checkout::run(&script, &form, payment, &out, config).await?;
        }
    }
    Ok(())
}
