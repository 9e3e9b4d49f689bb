//! Tech Pulse CLI - client session and catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Browse and shop
//! techpulse products --category audio --sort price-asc
//! techpulse view echo-buds-pro
//! techpulse cart add echo-buds-pro
//! techpulse cart set echo-buds-pro 2
//! techpulse checkout
//!
//! # Catalog management
//! techpulse import https://shop.example.com/p/123 --category drones
//! techpulse migrate
//! techpulse seed crates/storefront/content/products.json
//! ```
//!
//! # Commands
//!
//! - `cart` - Show or change the local cart
//! - `checkout` - Place a simulated order
//! - `view` - Open a product, record it in history and show suggestions
//! - `history` - Show recently viewed products
//! - `products` - List the catalog
//! - `import` - Extract a product draft from a URL
//! - `migrate` - Run catalog database migrations
//! - `seed` - Load products from a JSON file into the database

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use techpulse_core::Category;

mod commands;
mod output;

use commands::cart::parse_quantity;

#[derive(Parser)]
#[command(name = "techpulse")]
#[command(author, version, about = "Tech Pulse CLI tools")]
struct Cli {
    /// Directory holding the local cart and viewing history
    #[arg(long, global = true, env = "TECHPULSE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place a simulated order for the cart contents
    Checkout,
    /// Open a product page: record the view and show suggestions
    View {
        /// Product ID
        id: String,
    },
    /// Show recently viewed products
    History,
    /// List catalog products
    Products {
        /// Category key (e.g. audio, smart-home)
        #[arg(short, long)]
        category: Option<Category>,

        /// Price filter (all, under-500, from-500-to-999)
        #[arg(short, long, default_value = "all")]
        price: String,

        /// Sort order (default, price-asc, price-desc, name-asc, newest, rating-desc)
        #[arg(short, long, default_value = "default")]
        sort: String,

        /// Maximum number of products
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Extract a product draft from a product page URL
    Import {
        /// Product page URL
        url: String,

        /// Also show the prefilled product form for this category
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Run catalog database migrations
    Migrate,
    /// Load products from a JSON file into the catalog database
    Seed {
        /// Path to a JSON array of products
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: String,
    },
    /// Remove a product's line
    Remove {
        /// Product ID
        id: String,
    },
    /// Set a line's quantity (0 or less removes it)
    Set {
        /// Product ID
        id: String,

        /// New quantity
        #[arg(value_parser = parse_quantity, allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::Context::load(cli.data_dir)?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Add { id } => commands::cart::add(&ctx, &id).await?,
            CartAction::Remove { id } => commands::cart::remove(&ctx, &id),
            CartAction::Set { id, quantity } => commands::cart::set(&ctx, &id, quantity)?,
            CartAction::Clear => commands::cart::clear(&ctx),
        },
        Commands::Checkout => commands::cart::checkout(&ctx)?,
        Commands::View { id } => commands::browse::view(&ctx, &id).await?,
        Commands::History => commands::browse::history(&ctx),
        Commands::Products {
            category,
            price,
            sort,
            limit,
        } => commands::browse::products(&ctx, category, &price, &sort, limit).await?,
        Commands::Import { url, category } => {
            commands::import::import(&ctx, &url, category).await?;
        }
        Commands::Migrate => commands::migrate::run(&ctx).await?,
        Commands::Seed { file } => commands::seed::run(&ctx, &file).await?,
    }
    Ok(())
}
