// Application configuration
// Loaded from --config, else <config dir>/realty-lens/config.toml, else defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::{ColumnNames, ParseOptions};
use crate::engine::MissingPricePolicy;
use crate::format::CurrencyFormat;
use crate::table::DEFAULT_PAGE_SIZE;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    pub page_size: usize,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dataset location fetched at start-up (path or http(s) URL).
    pub source: Option<String>,
    /// Field delimiter, a single ASCII character.
    pub delimiter: char,
    pub columns: ColumnNames,
    pub missing_price: MissingPricePolicy,
    pub currency: CurrencyFormat,
    pub table: TableSettings,
    pub fetch_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: None,
            delimiter: ';',
            columns: ColumnNames::default(),
            missing_price: MissingPricePolicy::default(),
            currency: CurrencyFormat::default(),
            table: TableSettings::default(),
            fetch_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Default location: `<config dir>/realty-lens/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("realty-lens").join(CONFIG_FILE))
    }

    /// Load an explicit file, or the default file if it exists, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got {:?}", self.delimiter);
        }
        if self.table.page_size == 0 {
            bail!("table.page_size must be at least 1");
        }
        Ok(())
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            // validate() guarantees ASCII
            delimiter: self.delimiter as u8,
            columns: self.columns.clone(),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.parse_options(), ParseOptions::default());
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_toml(
            r#"
            source = "https://example.org/data/march_prices.csv"
            missing_price = "exclude"

            [columns]
            price_per_area = "price"

            [currency]
            symbol = "KGS"
            position = "prefix"
            "#,
        )
        .unwrap();

        assert_eq!(config.source.as_deref(), Some("https://example.org/data/march_prices.csv"));
        assert_eq!(config.missing_price, MissingPricePolicy::Exclude);
        assert_eq!(config.columns.price_per_area, "price");
        assert_eq!(config.columns.district, "Район");
        assert_eq!(config.currency.symbol, "KGS");
        assert_eq!(config.currency.group_separator, "\u{a0}");
        assert_eq!(config.table.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(AppConfig::from_toml("delimiter = \"ж\"").is_err());
        assert!(AppConfig::from_toml("[table]\npage_size = 0").is_err());
        assert!(AppConfig::from_toml("missing_price = \"drop\"").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "delimiter = \",\"\nfetch_timeout_secs = 5").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.parse_options().delimiter, b',');
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
    }
}
