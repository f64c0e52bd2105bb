//! The catalog: one table per record kind

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::memory::{MemorySession, MemoryTable};
use super::traits::RecordStore;
use crate::records::{Cereal, Product, ProductImage, RecordKind};

/// Seed file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub products: Vec<Product>,
    pub cereals: Vec<Cereal>,
    pub images: Vec<ProductImage>,
}

impl SeedData {
    /// Reads a seed file
    pub fn load(path: &Path) -> StoreResult<Self> {
        let seed_error = |reason: String| StoreError::Seed {
            path: path.display().to_string(),
            reason,
        };
        let content = fs::read_to_string(path).map_err(|e| seed_error(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| seed_error(e.to_string()))
    }
}

/// Products, cereals and images
#[derive(Debug, Default)]
pub struct Catalog {
    products: MemoryTable<Product>,
    cereals: MemoryTable<Cereal>,
    images: MemoryTable<ProductImage>,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new(max_rows_per_table: Option<usize>) -> Self {
        Self {
            products: MemoryTable::new(max_rows_per_table),
            cereals: MemoryTable::new(max_rows_per_table),
            images: MemoryTable::new(max_rows_per_table),
        }
    }

    /// Creates a catalog holding the seed records
    pub fn from_seed(seed: SeedData, max_rows_per_table: Option<usize>) -> StoreResult<Self> {
        let catalog = Self {
            products: MemoryTable::with_rows(seed.products, max_rows_per_table)?,
            cereals: MemoryTable::with_rows(seed.cereals, max_rows_per_table)?,
            images: MemoryTable::with_rows(seed.images, max_rows_per_table)?,
        };
        info!(
            target: "cereal::store",
            products = catalog.products.len()?,
            cereals = catalog.cereals.len()?,
            images = catalog.images.len()?,
            "Catalog seeded"
        );
        Ok(catalog)
    }

    /// Creates a catalog from an optional seed file
    pub fn open(seed_file: Option<&Path>, max_rows_per_table: Option<usize>) -> StoreResult<Self> {
        match seed_file {
            Some(path) => Self::from_seed(SeedData::load(path)?, max_rows_per_table),
            None => Ok(Self::new(max_rows_per_table)),
        }
    }

    /// Row count of one table
    pub fn count(&self, kind: RecordKind) -> StoreResult<usize> {
        match kind {
            RecordKind::Product => self.products.len(),
            RecordKind::Cereal => self.cereals.len(),
            RecordKind::Image => self.images.len(),
        }
    }
}

macro_rules! delegate_table {
    ($record:ty, $table:ident) => {
        impl RecordStore<$record> for Catalog {
            type Session<'a> = MemorySession<'a, $record> where Self: 'a;

            fn scan(&self) -> StoreResult<Vec<$record>> {
                self.$table.scan()
            }

            fn get(&self, id: Uuid) -> StoreResult<Option<$record>> {
                self.$table.get(id)
            }

            fn begin(&self) -> StoreResult<Self::Session<'_>> {
                self.$table.begin()
            }
        }
    };
}

delegate_table!(Product, products);
delegate_table!(Cereal, cereals);
delegate_table!(ProductImage, images);
