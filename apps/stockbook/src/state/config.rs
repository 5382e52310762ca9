//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOCKBOOK_*`)
//! 2. Defaults (platform data directory, this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Serialize;
use stockbook_core::Money;

pub const ENV_DB_PATH: &str = "STOCKBOOK_DB_PATH";
pub const ENV_EXPORT_DIR: &str = "STOCKBOOK_EXPORT_DIR";
pub const ENV_SHOP_NAME: &str = "STOCKBOOK_SHOP_NAME";
pub const ENV_CURRENCY_SYMBOL: &str = "STOCKBOOK_CURRENCY_SYMBOL";

const DB_FILE_NAME: &str = "stockbook.db";
const EXPORT_DIR_NAME: &str = "bills";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// SQLite store file
    pub db_path: PathBuf,

    /// Where `bill_<n>.txt` files are written
    pub export_dir: PathBuf,

    /// Printed as the first line of exported bills
    pub shop_name: Option<String>,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for ConfigState {
    /// Platform data directory, no shop name, rupee symbol.
    ///
    /// - **Linux**: `~/.local/share/stockbook/`
    /// - **macOS**: `~/Library/Application Support/com.stockbook.stockbook/`
    /// - **Windows**: `%APPDATA%\stockbook\stockbook\data\`
    fn default() -> Self {
        let data_dir = default_data_dir();
        ConfigState {
            db_path: data_dir.join(DB_FILE_NAME),
            export_dir: data_dir.join(EXPORT_DIR_NAME),
            shop_name: None,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOCKBOOK_DB_PATH`: store file
    /// - `STOCKBOOK_EXPORT_DIR`: bill export directory
    /// - `STOCKBOOK_SHOP_NAME`: heading line on exported bills
    /// - `STOCKBOOK_CURRENCY_SYMBOL`: display symbol (default `₹`)
    pub fn from_env() -> Self {
        ConfigState::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] over an arbitrary variable source.
    /// Blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = ConfigState::default();

        if let Some(path) = var(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(dir) = var(ENV_EXPORT_DIR) {
            config.export_dir = PathBuf::from(dir);
        }

        if let Some(shop) = var(ENV_SHOP_NAME) {
            config.shop_name = Some(shop.trim().to_string());
        }

        if let Some(symbol) = var(ENV_CURRENCY_SYMBOL) {
            config.currency_symbol = symbol.trim().to_string();
        }

        config
    }

    /// Config rooted at `dir`, for tests and portable installs.
    pub fn in_dir(dir: &Path) -> Self {
        ConfigState {
            db_path: dir.join(DB_FILE_NAME),
            export_dir: dir.join(EXPORT_DIR_NAME),
            ..ConfigState::default()
        }
    }

    /// Formats an amount with the configured symbol, e.g. `₹236.00`.
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency_symbol,
            amount.rupees().abs(),
            amount.paise_part().abs()
        )
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "stockbook", "stockbook")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_lookup(lookup(&[]));
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.shop_name, None);
        assert!(config.db_path.ends_with("stockbook.db"));
        assert!(config.export_dir.ends_with("bills"));
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            (ENV_DB_PATH, "/tmp/shop.db"),
            (ENV_EXPORT_DIR, "/tmp/out"),
            (ENV_SHOP_NAME, "  Sri Lakshmi Stores "),
            (ENV_CURRENCY_SYMBOL, "Rs."),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.shop_name.as_deref(), Some("Sri Lakshmi Stores"));
        assert_eq!(config.currency_symbol, "Rs.");
    }

    #[test]
    fn test_blank_values_ignored() {
        let config = ConfigState::from_lookup(lookup(&[(ENV_SHOP_NAME, "   ")]));
        assert_eq!(config.shop_name, None);
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::from_lookup(lookup(&[]));
        assert_eq!(config.format_currency(Money::from_paise(23_600)), "₹236.00");
        assert_eq!(config.format_currency(Money::from_paise(5)), "₹0.05");
        assert_eq!(config.format_currency(Money::from_paise(-1_234)), "-₹12.34");
    }
}
