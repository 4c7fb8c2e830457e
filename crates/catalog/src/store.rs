//! File-backed catalog store.
//!
//! The in-memory `Vec` is authoritative; every mutation rewrites the whole
//! record file. There is no write-ahead log, no atomic rename and no fsync:
//! if two processes share one record file, the last save wins.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use quickbill_core::{DomainError, Money, ProductId};

use crate::product::Product;
use crate::record;

/// Result type for catalog store operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-level failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A domain rule rejected the operation before any mutation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The record file exists but could not be read.
    #[error("could not read the catalog from {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The record file could not be rewritten.
    #[error("could not save the catalog to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The authoritative, file-backed product catalog.
#[derive(Debug)]
pub struct Catalog {
    products: Vec<Product>,
    path: PathBuf,
}

impl Catalog {
    /// Load the catalog from `path`.
    ///
    /// A missing file yields an empty catalog. Malformed lines are logged
    /// and skipped; well-formed lines after them are still loaded.
    pub fn load(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no record file yet, starting empty");
                return Ok(Self {
                    products: Vec::new(),
                    path,
                });
            }
            Err(source) => return Err(CatalogError::Load { path, source }),
        };

        let mut products = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            match record::decode(line) {
                Ok(product) => products.push(product),
                Err(e) => {
                    warn!(line = index + 1, error = %e, "skipping malformed record line");
                }
            }
        }
        info!(path = %path.display(), count = products.len(), "catalog loaded");
        Ok(Self { products, path })
    }

    /// Add a new product under the next id and persist.
    ///
    /// The id is `max(existing) + 1`, or 1 for an empty catalog. Validation
    /// failures abort before any mutation.
    pub fn add(&mut self, name: impl Into<String>, price: Money) -> CatalogResult<Product> {
        let product = Product::new(self.next_id(), name, price)?;
        self.products.push(product.clone());
        info!(id = %product.id(), name = product.name(), "product added");
        self.save_after_mutation();
        Ok(product)
    }

    /// Delete the product with `id`, compacting the sequence, and persist.
    ///
    /// Returns the removed product so callers can echo its name. An unknown
    /// id leaves the catalog untouched.
    pub fn delete(&mut self, id: ProductId) -> CatalogResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id() == id)
            .ok_or(DomainError::NotFound)?;
        let removed = self.products.remove(index);
        info!(id = %id, name = removed.name(), "product deleted");
        self.save_after_mutation();
        Ok(removed)
    }

    /// Linear scan for the product with `id`.
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// All products, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Path of the backing record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the record file from the in-memory sequence, in order.
    pub fn save(&self) -> CatalogResult<()> {
        std::fs::write(&self.path, record::encode_all(&self.products)).map_err(|source| {
            CatalogError::Persist {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Weak durability by design: a failed save keeps the in-memory change,
    /// tells the operator, and the session carries on un-persisted.
    fn save_after_mutation(&self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "catalog not persisted; in-memory changes retained");
        }
    }

    fn next_id(&self) -> ProductId {
        let max = self
            .products
            .iter()
            .map(|p| p.id().as_u32())
            .max()
            .unwrap_or(0);
        ProductId::new(max + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_catalog() -> (TempDir, Catalog) {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::load(dir.path().join("products.csv")).unwrap();
        (dir, catalog)
    }

    fn record_file(catalog: &Catalog) -> String {
        std::fs::read_to_string(catalog.path()).unwrap()
    }

    #[test]
    fn missing_file_yields_empty_catalog() {
        let (_dir, catalog) = temp_catalog();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn add_assigns_id_one_and_persists() {
        let (_dir, mut catalog) = temp_catalog();
        let product = catalog.add("Milk", Money::from_cents(250)).unwrap();
        assert_eq!(product.id(), ProductId::new(1));
        assert_eq!(catalog.products(), &[product]);
        assert_eq!(record_file(&catalog), "1,Milk,2.50\n");
    }

    #[test]
    fn add_assigns_strictly_increasing_ids() {
        let (_dir, mut catalog) = temp_catalog();
        for (i, name) in ["Milk", "Bread", "Eggs"].iter().enumerate() {
            let product = catalog.add(*name, Money::from_cents(100)).unwrap();
            assert_eq!(product.id(), ProductId::new(i as u32 + 1));
        }
    }

    #[test]
    fn add_rejects_invalid_name_without_mutating() {
        let (_dir, mut catalog) = temp_catalog();
        catalog.add("Milk", Money::from_cents(250)).unwrap();
        let before = record_file(&catalog);

        let err = catalog.add("Milk, whole", Money::from_cents(300)).unwrap_err();
        match err {
            CatalogError::Domain(DomainError::Validation(_)) => {}
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(catalog.len(), 1);
        assert_eq!(record_file(&catalog), before);
    }

    #[test]
    fn delete_compacts_and_persists() {
        let (_dir, mut catalog) = temp_catalog();
        catalog.add("Milk", Money::from_cents(250)).unwrap();
        catalog.add("Bread", Money::from_cents(120)).unwrap();

        let removed = catalog.delete(ProductId::new(1)).unwrap();
        assert_eq!(removed.name(), "Milk");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products()[0].name(), "Bread");
        assert_eq!(record_file(&catalog), "2,Bread,1.20\n");
    }

    #[test]
    fn delete_preserves_relative_order() {
        let (_dir, mut catalog) = temp_catalog();
        for name in ["Milk", "Bread", "Eggs", "Butter"] {
            catalog.add(name, Money::from_cents(100)).unwrap();
        }
        catalog.delete(ProductId::new(2)).unwrap();
        let names: Vec<&str> = catalog.products().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["Milk", "Eggs", "Butter"]);
    }

    #[test]
    fn delete_unknown_id_changes_nothing() {
        let (_dir, mut catalog) = temp_catalog();
        catalog.add("Milk", Money::from_cents(250)).unwrap();
        let before = record_file(&catalog);

        let err = catalog.delete(ProductId::new(9)).unwrap_err();
        match err {
            CatalogError::Domain(DomainError::NotFound) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert_eq!(catalog.len(), 1);
        assert_eq!(record_file(&catalog), before);
    }

    #[test]
    fn interior_delete_never_reuses_ids() {
        let (_dir, mut catalog) = temp_catalog();
        for name in ["Milk", "Bread", "Eggs"] {
            catalog.add(name, Money::from_cents(100)).unwrap();
        }
        catalog.delete(ProductId::new(2)).unwrap();
        let product = catalog.add("Butter", Money::from_cents(100)).unwrap();
        assert_eq!(product.id(), ProductId::new(4));
    }

    #[test]
    fn next_id_follows_current_maximum() {
        // Deleting the current maximum makes exactly that id assignable
        // again; the record file carries no high-water mark.
        let (_dir, mut catalog) = temp_catalog();
        catalog.add("Milk", Money::from_cents(100)).unwrap();
        catalog.add("Bread", Money::from_cents(100)).unwrap();
        catalog.delete(ProductId::new(2)).unwrap();
        let product = catalog.add("Eggs", Money::from_cents(100)).unwrap();
        assert_eq!(product.id(), ProductId::new(2));
    }

    #[test]
    fn save_is_idempotent() {
        let (_dir, mut catalog) = temp_catalog();
        catalog.add("Milk", Money::from_cents(250)).unwrap();
        catalog.save().unwrap();
        let first = record_file(&catalog);
        catalog.save().unwrap();
        assert_eq!(record_file(&catalog), first);
    }

    #[test]
    fn reload_round_trips_the_catalog() {
        let (_dir, mut catalog) = temp_catalog();
        catalog.add("Milk", Money::from_cents(250)).unwrap();
        catalog.add("Bread", Money::from_cents(120)).unwrap();

        let reloaded = Catalog::load(catalog.path()).unwrap();
        assert_eq!(reloaded.products(), catalog.products());
    }

    #[test]
    fn load_skips_malformed_lines_and_keeps_going() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.csv");
        std::fs::write(&path, "1,Milk,2.50\nnot a record\n2,Bread,1.20\n").unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[0].name(), "Milk");
        assert_eq!(catalog.products()[1].name(), "Bread");
    }

    #[test]
    fn load_resumes_id_sequence_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.csv");
        std::fs::write(&path, "5,Milk,2.50\n3,Bread,1.20\n").unwrap();

        let mut catalog = Catalog::load(&path).unwrap();
        let product = catalog.add("Eggs", Money::from_cents(400)).unwrap();
        assert_eq!(product.id(), ProductId::new(6));
    }

    #[test]
    fn find_is_a_linear_scan_by_id() {
        let (_dir, mut catalog) = temp_catalog();
        catalog.add("Milk", Money::from_cents(250)).unwrap();
        catalog.add("Bread", Money::from_cents(120)).unwrap();

        assert_eq!(catalog.find(ProductId::new(2)).unwrap().name(), "Bread");
        assert!(catalog.find(ProductId::new(7)).is_none());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 64,
                ..ProptestConfig::default()
            })]

            /// Property: every assigned id is unique, strictly increasing,
            /// and equal to one more than the previous maximum.
            #[test]
            fn add_assigns_unique_increasing_ids(
                names in proptest::collection::vec("[A-Za-z][A-Za-z0-9 ]{0,20}", 1..12),
            ) {
                let (_dir, mut catalog) = temp_catalog();
                let mut previous_max = 0u32;
                for name in names {
                    let product = catalog.add(name, Money::from_cents(100)).unwrap();
                    prop_assert_eq!(product.id().as_u32(), previous_max + 1);
                    previous_max = product.id().as_u32();
                }
                let mut ids: Vec<u32> =
                    catalog.products().iter().map(|p| p.id().as_u32()).collect();
                let before_dedup = ids.len();
                ids.dedup();
                prop_assert_eq!(ids.len(), before_dedup);
            }

            /// Property: deleting one product removes exactly it and keeps
            /// the relative order of the rest.
            #[test]
            fn delete_removes_exactly_one_and_keeps_order(
                names in proptest::collection::vec("[A-Za-z][A-Za-z0-9 ]{0,20}", 2..10),
                pick in 0usize..10,
            ) {
                let (_dir, mut catalog) = temp_catalog();
                for name in &names {
                    catalog.add(name.clone(), Money::from_cents(100)).unwrap();
                }
                let victim = pick % names.len();
                let victim_id = catalog.products()[victim].id();

                catalog.delete(victim_id).unwrap();

                let mut expected = names.clone();
                expected.remove(victim);
                let remaining: Vec<String> = catalog
                    .products()
                    .iter()
                    .map(|p| p.name().to_string())
                    .collect();
                prop_assert_eq!(remaining, expected);
            }
        }
    }
}
