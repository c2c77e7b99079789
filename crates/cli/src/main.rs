//! Velvet Orris CLI - Stored state inspection and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the persisted wishlist, hydrated against the live catalog
//! vo-cli wishlist show
//!
//! # Drop the persisted wishlist projection
//! vo-cli wishlist clear
//!
//! # List the current catalog
//! vo-cli catalog list
//! ```
//!
//! # Commands
//!
//! - `wishlist` - Inspect or clear durable wishlist state
//! - `catalog` - Query the catalog service

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vo-cli")]
#[command(author, version, about = "Velvet Orris CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or clear durable wishlist state
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Query the catalog service
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show the persisted wishlist, hydrated against the live catalog
    Show,
    /// Drop the persisted wishlist projection
    Clear,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Fetch and print the full catalog
    List,
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
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show().await?,
            WishlistAction::Clear => commands::wishlist::clear()?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list().await?,
        },
    }
    Ok(())
}
