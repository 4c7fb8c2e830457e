//! One-line-per-product record codec.
//!
//! Record format: `<id>,<name>,<price:2dp>` with no header and no quoting.
//! Product names never contain commas (enforced at construction), so the
//! format stays unambiguous in both directions.

use thiserror::Error;

use quickbill_core::{DomainError, Money, ProductId};

use crate::product::Product;

/// Why a record line failed to decode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 3 fields (id,name,price), found {0}")]
    FieldCount(usize),

    #[error("invalid id field: '{0}'")]
    InvalidId(String),

    #[error("invalid price field: '{0}'")]
    InvalidPrice(String),

    /// Name validation failure surfaced from `Product::new`.
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Encode one product as a record line (no trailing newline).
pub fn encode(product: &Product) -> String {
    format!("{},{},{}", product.id(), product.name(), product.price())
}

/// Encode the whole catalog, one `\n`-terminated line per product.
pub fn encode_all(products: &[Product]) -> String {
    let mut out = String::new();
    for product in products {
        out.push_str(&encode(product));
        out.push('\n');
    }
    out
}

/// Decode one record line into a product.
pub fn decode(line: &str) -> Result<Product, RecordError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 3 {
        return Err(RecordError::FieldCount(fields.len()));
    }
    let id: ProductId = fields[0]
        .parse()
        .map_err(|_| RecordError::InvalidId(fields[0].to_string()))?;
    let price: Money = fields[2]
        .parse()
        .map_err(|_| RecordError::InvalidPrice(fields[2].to_string()))?;
    Ok(Product::new(id, fields[1], price)?)
}
