//! CLI configuration.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tim_commerce::contact::BusinessHours;
use tim_commerce::lookup::{Backoff, LookupPolicy};
use tim_commerce::newsletter::NewsletterSettings;
use tim_commerce::Currency;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["tim.toml", ".tim.toml", "tim.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimConfig {
    /// Where the cart is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Catalog source and paging.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Search input.
    #[serde(default)]
    pub search: SearchConfig,

    /// Simulated newsletter request.
    #[serde(default)]
    pub newsletter: NewsletterConfig,

    /// Product detail lookup.
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Opening hours.
    #[serde(default)]
    pub hours: BusinessHours,

    /// Display currency.
    #[serde(default)]
    pub currency: CurrencyConfig,
}

impl TimConfig {
    /// Load and validate config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path))?;
        Ok(config)
    }

    /// Check values the types cannot.
    pub fn validate(&self) -> Result<()> {
        if self.catalog.page_size == 0 {
            bail!("catalog.page_size must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.newsletter.success_rate) {
            bail!("newsletter.success_rate must be between 0 and 1");
        }
        self.currency()?;
        self.hours.validate().context("Invalid [hours]")?;
        Ok(())
    }

    /// The configured display currency.
    pub fn currency(&self) -> Result<Currency> {
        self.currency
            .code
            .parse()
            .with_context(|| format!("Invalid currency.code: {}", self.currency.code))
    }

    pub fn newsletter_settings(&self) -> NewsletterSettings {
        NewsletterSettings {
            delay: Duration::from_millis(self.newsletter.delay_ms),
            success_rate: self.newsletter.success_rate,
        }
    }

    pub fn lookup_policy(&self) -> LookupPolicy {
        LookupPolicy::new(self.lookup.max_attempts)
            .with_backoff(Backoff::Fixed(Duration::from_millis(self.lookup.retry_delay_ms)))
            .with_timeout(Duration::from_millis(self.lookup.timeout_ms))
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding persisted state, relative to the working directory.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    ".tim/storage.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Generate this many products instead of using the new arrivals list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate: Option<u32>,

    /// Seed for the generator. Random when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_page_size() -> u32 {
    12
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            generate: None,
            seed: None,
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Idle time before typed search text is applied.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Newsletter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsletterConfig {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    #[serde(default = "default_success_rate")]
    pub success_rate: f64,
}

fn default_delay_ms() -> u64 {
    1500
}

fn default_success_rate() -> f64 {
    0.8
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            success_rate: default_success_rate(),
        }
    }
}

/// Lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_max_attempts() -> u32 {
    10
}

fn default_retry_delay_ms() -> u64 {
    200
}

fn default_timeout_ms() -> u64 {
    3000
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Currency configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_currency_code")]
    pub code: String,
}

fn default_currency_code() -> String {
    "ZMW".to_string()
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: default_currency_code(),
        }
    }
}

/// Generate a default tim.toml config file.
pub fn generate_default_config() -> String {
    r#"# Tim Clothing storefront configuration

[storage]
path = ".tim/storage.json"

[catalog]
page_size = 12
# Generate products instead of using the new arrivals list.
# generate = 48
# seed = 2024

[search]
debounce_ms = 300

[newsletter]
delay_ms = 1500
success_rate = 0.8

[lookup]
max_attempts = 10
retry_delay_ms = 200
timeout_ms = 3000

# Remove a day to mark it closed.
[hours.monday]
open = 9
close = 20

[hours.tuesday]
open = 9
close = 20

[hours.wednesday]
open = 9
close = 20

[hours.thursday]
open = 9
close = 20

[hours.friday]
open = 9
close = 20

[hours.saturday]
open = 10
close = 19

[hours.sunday]
open = 11
close = 18

[currency]
code = "ZMW"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_matches_defaults() {
        let parsed: TimConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed.catalog.page_size, 12);
        assert_eq!(parsed.hours, BusinessHours::default());
        assert_eq!(parsed.lookup_policy(), LookupPolicy::default());
        assert_eq!(parsed.newsletter_settings(), NewsletterSettings::default());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let parsed: TimConfig = toml::from_str("[catalog]\ngenerate = 30\n").unwrap();
        assert_eq!(parsed.catalog.generate, Some(30));
        assert_eq!(parsed.catalog.page_size, 12);
        assert_eq!(parsed.search.debounce_ms, 300);
        assert_eq!(parsed.currency().unwrap(), Currency::ZMW);
    }

    #[test]
    fn test_closed_day() {
        let parsed: TimConfig = toml::from_str("[hours]\nmonday = { open = 9, close = 17 }\n").unwrap();
        assert!(parsed.hours.monday.is_some());
        assert!(parsed.hours.sunday.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = TimConfig::default();
        config.newsletter.success_rate = 1.5;
        assert!(config.validate().is_err());

        let mut config = TimConfig::default();
        config.currency.code = "XYZ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tim.json");
        std::fs::write(&path, r#"{"catalog": {"page_size": 6}}"#).unwrap();
        let config = TimConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.catalog.page_size, 6);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();

        let path = dir.path().join("tim.toml");
        std::fs::write(&path, "[hours.monday]\nopen = 18\nclose = 9\n").unwrap();
        assert!(TimConfig::load(path.to_str().unwrap()).is_err());

        std::fs::write(&path, "[newsletter]\nsuccess_rate = 1.5\n").unwrap();
        assert!(TimConfig::load(path.to_str().unwrap()).is_err());

        std::fs::write(&path, "[currency]\ncode = \"XYZ\"\n").unwrap();
        assert!(TimConfig::load(path.to_str().unwrap()).is_err());

        std::fs::write(&path, generate_default_config()).unwrap();
        assert!(TimConfig::load(path.to_str().unwrap()).is_ok());
    }
}
