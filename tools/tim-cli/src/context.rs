//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tim_cache::Cache;
use tim_commerce::cart::CartStore;
use tim_commerce::catalog::{new_arrivals, CatalogGenerator, Product};
use tim_commerce::timer::Timestamp;
use tim_commerce::{Currency, Money};
use tim_observability::{LogFormat, LogLevel, StructuredLogger};

use crate::config::{TimConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: TimConfig,
    /// Where the configuration was read from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Structured logger for storefront components.
    pub logger: StructuredLogger,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (TimConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd)? {
                Some((config, path)) => (config, Some(path)),
                None => (TimConfig::default(), None),
            }
        };

        let level = if output.is_verbose() {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        };
        let format = if output.is_json() {
            LogFormat::Json
        } else {
            LogFormat::Human
        };
        let logger = StructuredLogger::new("cli")
            .with_min_level(level)
            .with_format(format);

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            logger,
        })
    }

    /// Find config file in directory tree. The nearest file wins and must
    /// be valid.
    fn find_config(start: &Path) -> Result<Option<(TimConfig, PathBuf)>> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    let config = TimConfig::load(&config_path.to_string_lossy())?;
                    return Ok(Some((config, config_path)));
                }
            }

            if !current.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Open the persisted storage, creating its directory.
    pub fn cache(&self) -> Result<Cache> {
        let path = self.resolve_path(&self.config.storage.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create storage directory: {}", parent.display()))?;
        }
        self.output.debug(&format!("Storage: {}", path.display()));
        Ok(Cache::open_file(path))
    }

    /// The cart store over persisted storage.
    pub fn cart(&self) -> Result<CartStore> {
        Ok(CartStore::new(self.cache()?).with_logger(self.logger.clone()))
    }

    /// The catalog the configuration asks for.
    pub fn catalog(&self) -> Vec<Product> {
        match self.config.catalog.generate {
            Some(count) => {
                let mut generator = match self.config.catalog.seed {
                    Some(seed) => CatalogGenerator::seeded(seed),
                    None => CatalogGenerator::for_page_load(Timestamp::now()),
                };
                self.output.debug(&format!("Generating {} products", count));
                generator.generate(count)
            }
            None => new_arrivals(),
        }
    }

    /// The configured display currency.
    pub fn currency(&self) -> Result<Currency> {
        self.config.currency()
    }

    /// Format an amount in the display currency.
    pub fn format_price(&self, money: &Money) -> String {
        match self.currency() {
            Ok(currency) => currency.format(money.to_decimal()),
            Err(_) => money.display(),
        }
    }
}
