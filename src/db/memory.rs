use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use serde_json::json;

use crate::db::provider::{Filter, Record, StorageProvider, Table};
use crate::errors::StorageError;

/// In-process table store. Reference implementation of the provider
/// contract; the test suite runs the store and aggregator against it.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    tables: Mutex<HashMap<Table, Vec<Record>>>,
    next_id: AtomicI64,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl StorageProvider for MemoryProvider {
    async fn read_all(&self, table: Table) -> Result<Vec<Record>, StorageError> {
        let tables = lock_tables(&self.tables)?;

        Ok(tables.get(&table).cloned().unwrap_or_default())
    }

    async fn append(&self, table: Table, mut record: Record) -> Result<i64, StorageError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        record.insert(String::from("id"), json!(id));

        let mut tables = lock_tables(&self.tables)?;
        tables.entry(table).or_default().push(record);

        Ok(id)
    }

    async fn update_matching(
        &self,
        table: Table,
        filter: &Filter,
        values: Record,
    ) -> Result<u64, StorageError> {
        let mut tables = lock_tables(&self.tables)?;
        let mut updated = 0;

        if let Some(records) = tables.get_mut(&table) {
            for record in records.iter_mut() {
                if record.get(filter.column()) == Some(filter.value()) {
                    for (column, value) in &values {
                        record.insert(column.clone(), value.clone());
                    }
                    updated += 1;
                }
            }
        }

        Ok(updated)
    }

    async fn delete_matching(&self, table: Table, filter: &Filter) -> Result<u64, StorageError> {
        let mut tables = lock_tables(&self.tables)?;
        let mut deleted = 0;

        if let Some(records) = tables.get_mut(&table) {
            let before = records.len();
            records.retain(|record| record.get(filter.column()) != Some(filter.value()));
            deleted = (before - records.len()) as u64;
        }

        Ok(deleted)
    }
}

fn lock_tables(
    tables: &Mutex<HashMap<Table, Vec<Record>>>,
) -> Result<std::sync::MutexGuard<'_, HashMap<Table, Vec<Record>>>, StorageError> {
    tables
        .lock()
        .map_err(|_| StorageError::Backend(String::from("memory store poisoned")))
}
