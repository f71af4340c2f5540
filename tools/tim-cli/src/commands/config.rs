//! Configuration commands.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Init { force } => init(force, ctx),
        ConfigCommand::Validate => validate(ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if ctx.output.is_json() {
        ctx.output.json(config);
        return Ok(());
    }

    ctx.output.header("Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("File", &path.display().to_string()),
        None => ctx.output.kv("File", "(defaults)"),
    }

    ctx.output.header("Storage");
    ctx.output.kv("Path", &config.storage.path);

    ctx.output.header("Catalog");
    ctx.output
        .kv("Page size", &config.catalog.page_size.to_string());
    match config.catalog.generate {
        Some(count) => ctx.output.kv("Generate", &count.to_string()),
        None => ctx.output.kv("Source", "new arrivals"),
    }
    if let Some(seed) = config.catalog.seed {
        ctx.output.kv("Seed", &seed.to_string());
    }

    ctx.output.header("Search");
    ctx.output
        .kv("Debounce", &format!("{}ms", config.search.debounce_ms));

    ctx.output.header("Newsletter");
    ctx.output
        .kv("Delay", &format!("{}ms", config.newsletter.delay_ms));
    ctx.output.kv(
        "Success rate",
        &format!("{:.0}%", config.newsletter.success_rate * 100.0),
    );

    ctx.output.header("Lookup");
    ctx.output
        .kv("Max attempts", &config.lookup.max_attempts.to_string());
    ctx.output
        .kv("Retry delay", &format!("{}ms", config.lookup.retry_delay_ms));
    ctx.output
        .kv("Timeout", &format!("{}ms", config.lookup.timeout_ms));

    ctx.output.header("Hours");
    for (day, window) in config.hours.schedule() {
        let text = window.map_or_else(|| "Closed".to_string(), |w| w.to_string());
        ctx.output.kv(&day.to_string(), &text);
    }

    ctx.output.header("Currency");
    ctx.output.kv("Code", &config.currency.code);

    Ok(())
}

fn init(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join("tim.toml");

    if path.exists() && !force {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            ctx.output.warn("Config not written");
            return Ok(());
        }
    }

    std::fs::write(&path, generate_default_config())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    ctx.output
        .success(&format!("Created {}", path.display()));
    Ok(())
}

fn validate(ctx: &Context) -> Result<()> {
    ctx.config.validate()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "valid": true }));
        return Ok(());
    }

    ctx.output.success("Configuration is valid");
    Ok(())
}
