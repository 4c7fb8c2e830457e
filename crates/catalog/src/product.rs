use serde::{Deserialize, Serialize};

use quickbill_core::{DomainError, DomainResult, Money, ProductId};

/// A sellable product in the catalog.
///
/// Names are validated at construction: non-empty, and free of commas and
/// line breaks so every product can be written verbatim as one record line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if name.contains(',') {
            return Err(DomainError::validation("name cannot contain a comma"));
        }
        if name.contains(['\r', '\n']) {
            return Err(DomainError::validation("name cannot contain a line break"));
        }
        Ok(Self { id, name, price })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructs_a_valid_product() {
        let product = Product::new(ProductId::new(1), "Milk", Money::from_cents(250)).unwrap();
        assert_eq!(product.id(), ProductId::new(1));
        assert_eq!(product.name(), "Milk");
        assert_eq!(product.price(), Money::from_cents(250));
    }

    #[test]
    fn rejects_empty_name() {
        let err = Product::new(ProductId::new(1), "", Money::ZERO).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("expected Validation error for empty name"),
        }
    }

    #[test]
    fn rejects_whitespace_only_name() {
        let err = Product::new(ProductId::new(1), "   ", Money::ZERO).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("expected Validation error for whitespace name"),
        }
    }

    #[test]
    fn rejects_name_with_comma() {
        let err = Product::new(ProductId::new(1), "Milk, whole", Money::ZERO).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("expected Validation error for comma in name"),
        }
    }

    #[test]
    fn rejects_name_with_line_break() {
        for name in ["Milk\n", "Mi\rlk"] {
            let err = Product::new(ProductId::new(1), name, Money::ZERO).unwrap_err();
            match err {
                DomainError::Validation(_) => {}
                _ => panic!("expected Validation error for line break in name"),
            }
        }
    }
}
