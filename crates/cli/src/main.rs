//! quickbill — console billing for a small retail counter.
//!
//! Loads the product catalog from its record file, then serves a blocking
//! menu loop until the user exits.

use std::path::Path;

use anyhow::{Context, Result};

mod config;
mod shell;

use config::Config;
use shell::Shell;

fn main() -> Result<()> {
    quickbill_observability::init();

    let config = Config::load(Path::new("quickbill.toml"))?;
    let catalog = quickbill_catalog::Catalog::load(config.products_file.clone())
        .with_context(|| format!("loading catalog from {}", config.products_file.display()))?;

    tracing::info!(products = catalog.len(), "catalog ready");

    Shell::new(catalog, config)?.run()
}
