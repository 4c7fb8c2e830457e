//! Configuration for the quickbill binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings read from `quickbill.toml` in the working directory.
///
/// Every field has a default, so a partial file (or none at all) works.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store name printed at the top of every invoice and menu.
    pub store_name: String,

    /// Record file holding the product catalog.
    pub products_file: PathBuf,

    /// Directory invoices are written to and read from.
    pub invoice_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_name: "ABC SUPERMARKET".to_string(),
            products_file: PathBuf::from("products.csv"),
            invoice_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load config from `path`, falling back to defaults when absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config =
            toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_legacy_layout() {
        let config = Config::default();
        assert_eq!(config.store_name, "ABC SUPERMARKET");
        assert_eq!(config.products_file, PathBuf::from("products.csv"));
        assert_eq!(config.invoice_dir, PathBuf::from("."));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("quickbill.toml")).unwrap();
        assert_eq!(config.store_name, "ABC SUPERMARKET");
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quickbill.toml");
        std::fs::write(&path, "store_name = \"CORNER SHOP\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.store_name, "CORNER SHOP");
        assert_eq!(config.products_file, PathBuf::from("products.csv"));
    }

    #[test]
    fn full_file_round_trips() {
        let config = Config {
            store_name: "CORNER SHOP".to_string(),
            products_file: PathBuf::from("shop.csv"),
            invoice_dir: PathBuf::from("invoices"),
        };
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.store_name, config.store_name);
        assert_eq!(deserialized.products_file, config.products_file);
        assert_eq!(deserialized.invoice_dir, config.invoice_dir);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quickbill.toml");
        std::fs::write(&path, "store_name = [not toml").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
