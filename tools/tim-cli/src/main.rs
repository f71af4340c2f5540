//! Tim CLI - Drive the Tim Clothing storefront from a terminal.
//!
//! Commands:
//! - `tim catalog` - Browse, filter and sort the catalog
//! - `tim product` - Resolve a product the way the detail page does
//! - `tim cart` - Add to and inspect the persisted cart
//! - `tim faq` - Search and browse the FAQ
//! - `tim hours` - Show whether the store is open
//! - `tim newsletter` - Simulate a newsletter signup
//! - `tim config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod sleeper;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    CartArgs, CatalogArgs, ConfigArgs, FaqArgs, HoursArgs, NewsletterArgs, ProductArgs,
};

/// Tim CLI - Browse and shop the Tim Clothing storefront
#[derive(Parser)]
#[command(name = "tim")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog with filters, search and sorting
    Catalog(CatalogArgs),

    /// Look up a single product
    Product(ProductArgs),

    /// Manage the shopping cart
    Cart(CartArgs),

    /// Browse frequently asked questions
    Faq(FaqArgs),

    /// Show opening hours and the current store status
    Hours(HoursArgs),

    /// Subscribe to the newsletter
    Newsletter(NewsletterArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Faq(args) => commands::faq::run(args, &ctx).await,
        Commands::Hours(args) => commands::hours::run(args, &ctx).await,
        Commands::Newsletter(args) => commands::newsletter::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
