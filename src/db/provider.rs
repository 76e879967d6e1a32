use std::collections::BTreeMap;

use async_trait::async_trait;
use derive_getters::Getters;
use derive_new::new;
use serde_json::{Value, json};

use crate::errors::StorageError;

/// A row at the storage boundary: column name to cell value.
pub type Record = BTreeMap<String, Value>;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Table {
    Investments,
    ManagedAssets,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Investments => "investments",
            Table::ManagedAssets => "managed_assets",
        }
    }
}

/// Equality match on a single column. The store only ever targets
/// rows by one column, so nothing richer is modeled.
#[derive(Clone, Debug, Getters, new)]
pub struct Filter {
    // derive-getters 0.5 stamps the field's lifetime onto `&self` for
    // reference-typed fields, producing `fn column(&'static self)`, which is
    // uncallable on a borrowed `Filter`. Skip it and provide the equivalent
    // `&self` accessor by hand.
    #[getter(skip)]
    column: &'static str,
    value: Value,
}

impl Filter {
    pub fn column(&self) -> &'static str {
        self.column
    }

    pub fn by_id(id: i64) -> Self {
        Self::new("id", json!(id))
    }
}

/// Persistence capability the transaction store is written against.
/// A write must be visible to the next read within the same process.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    async fn read_all(&self, table: Table) -> Result<Vec<Record>, StorageError>;

    /// Appends a record and returns the id assigned by the backend.
    async fn append(&self, table: Table, record: Record) -> Result<i64, StorageError>;

    async fn update_matching(
        &self,
        table: Table,
        filter: &Filter,
        values: Record,
    ) -> Result<u64, StorageError>;

    async fn delete_matching(&self, table: Table, filter: &Filter) -> Result<u64, StorageError>;
}
