//! Catalog Bridge CLI - Operator tools for the two bridged stores.
//!
//! # Usage
//!
//! ```bash
//! # Reconcile both catalogs and log the summary
//! bridge-cli sync
//!
//! # Same, but also log the full report as JSON
//! bridge-cli sync --json
//!
//! # Check connectivity to both stores
//! bridge-cli probe
//!
//! # Resolve an identifier on the target store
//! bridge-cli resolve --sku TEE-M
//! bridge-cli resolve --variant-id 44012345678
//! ```
//!
//! # Commands
//!
//! - `sync` - Join both catalogs by SKU
//! - `probe` - Fetch shop info from both stores
//! - `resolve` - Map a SKU or source variant to its target variant
//!
//! Reads the same environment variables as the `catalog-bridge` service.

#![cfg_attr(not(test), forbid(unsafe_code))]

use catalog_bridge_core::VariantId;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bridge-cli")]
#[command(author, version, about = "Catalog Bridge CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the source and target catalogs by SKU
    Sync {
        /// Also log the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check connectivity to both stores
    Probe,
    /// Resolve a SKU or source variant ID on the target store
    Resolve {
        /// SKU to look up on the target store
        #[arg(short, long, conflicts_with = "variant_id", required_unless_present = "variant_id")]
        sku: Option<String>,

        /// Source store variant ID (numeric or GID)
        #[arg(short, long)]
        variant_id: Option<VariantId>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Sync { json } => commands::sync::run(json).await?,
        Commands::Probe => commands::probe::run().await?,
        Commands::Resolve { sku, variant_id } => match (sku, variant_id) {
            (Some(sku), _) => commands::resolve::by_sku(&sku).await?,
            (None, Some(variant_id)) => commands::resolve::by_variant(variant_id).await?,
            (None, None) => return Err("either --sku or --variant-id is required".into()),
        },
    }
    Ok(())
}
