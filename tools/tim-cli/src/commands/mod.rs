//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod faq;
pub mod hours;
pub mod newsletter;
pub mod product;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Category filter (all, men, women, accessories).
    #[arg(long)]
    pub category: Option<String>,

    /// Search text, typed into the search box.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order (featured, price-low, price-high, newest, rating).
    #[arg(long)]
    pub sort: Option<String>,

    /// Restore state from a products page query string.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Press "load more" this many times.
    #[arg(long, default_value = "0")]
    pub more: u32,

    /// Print the rendered products page HTML instead of a table.
    #[arg(long)]
    pub html: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id or detail page query (e.g. `?id=7`).
    pub id: String,

    /// Publish the catalog only after this many milliseconds.
    #[arg(long, default_value = "0")]
    pub publish_delay_ms: u64,

    /// Print the quick view HTML.
    #[arg(long)]
    pub html: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add a product to the cart.
    Add {
        /// Product id.
        id: u32,

        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        qty: u32,
    },
    /// Show the cart contents.
    Show,
}

/// Arguments for the faq command.
#[derive(Args)]
pub struct FaqArgs {
    /// Category to show (all, orders, shipping, ...).
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Search questions and answers.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Open the question at this position (1-based) among those shown.
    #[arg(long)]
    pub open: Option<usize>,

    /// Print the rendered FAQ HTML.
    #[arg(long)]
    pub html: bool,
}

/// Arguments for the hours command.
#[derive(Args)]
pub struct HoursArgs {
    /// Local time to check (e.g. 2024-06-03T18:30), default now.
    #[arg(long)]
    pub at: Option<String>,

    /// Print the contact page status and hours HTML.
    #[arg(long)]
    pub html: bool,
}

/// Arguments for the newsletter command.
#[derive(Args)]
pub struct NewsletterArgs {
    /// Email address to subscribe.
    pub email: String,

    /// Seed for the simulated outcome.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Overwrite an existing file without asking.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the configuration.
    Validate,
}
