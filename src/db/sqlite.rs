use async_trait::async_trait;
use serde_json::{Value, json};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqliteQueryResult, SqliteRow};
use sqlx::{Column, Row, Sqlite, TypeInfo};

use crate::db::provider::{Filter, Record, StorageProvider, Table};
use crate::errors::StorageError;

/// Local file-based SQL backend over a SQLite pool.
#[derive(Clone, Debug)]
pub struct SqliteProvider {
    pool: SqlitePool,
}

impl SqliteProvider {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub async fn init(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    create_investments(pool).await?;
    create_managed_assets(pool).await?;
    seed_default_assets(pool).await?;
    Ok(())
}

async fn create_investments(pool: &SqlitePool) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS investments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            asset_type TEXT NOT NULL,
            ticker TEXT NOT NULL,
            amount REAL NOT NULL,
            quantity REAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
}

async fn create_managed_assets(pool: &SqlitePool) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS managed_assets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ticker TEXT NOT NULL UNIQUE,
            asset_type TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
}

async fn seed_default_assets(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM managed_assets")
        .fetch_one(pool)
        .await?;

    if count == 0 {
        for (ticker, asset_type) in [("BTC", "Crypto"), ("ETH", "Crypto"), ("BNB", "Crypto")] {
            sqlx::query("INSERT INTO managed_assets (ticker, asset_type) VALUES (?, ?)")
                .bind(ticker)
                .bind(asset_type)
                .execute(pool)
                .await?;
        }
    }

    Ok(())
}

#[async_trait]
impl StorageProvider for SqliteProvider {
    async fn read_all(&self, table: Table) -> Result<Vec<Record>, StorageError> {
        let sql = format!("SELECT * FROM {}", table.name());
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    async fn append(&self, table: Table, record: Record) -> Result<i64, StorageError> {
        let columns = record.keys().cloned().collect::<Vec<_>>().join(", ");
        let placeholders = vec!["?"; record.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.name(),
            columns,
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for value in record.values() {
            query = bind_value(query, value);
        }

        Ok(query.execute(&self.pool).await?.last_insert_rowid())
    }

    async fn update_matching(
        &self,
        table: Table,
        filter: &Filter,
        values: Record,
    ) -> Result<u64, StorageError> {
        let assignments = values
            .keys()
            .map(|column| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            table.name(),
            assignments,
            filter.column()
        );

        let mut query = sqlx::query(&sql);
        for value in values.values() {
            query = bind_value(query, value);
        }
        query = bind_value(query, filter.value());

        Ok(query.execute(&self.pool).await?.rows_affected())
    }

    async fn delete_matching(&self, table: Table, filter: &Filter) -> Result<u64, StorageError> {
        let sql = format!("DELETE FROM {} WHERE {} = ?", table.name(), filter.column());
        let query = bind_value(sqlx::query(&sql), filter.value());

        Ok(query.execute(&self.pool).await?.rows_affected())
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &'q Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::String(text) => query.bind(text.as_str()),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => query.bind(integer),
            None => query.bind(number.as_f64().unwrap_or_default()),
        },
        Value::Bool(flag) => query.bind(*flag),
        _ => query.bind(Option::<String>::None),
    }
}

fn record_from_row(row: &SqliteRow) -> Record {
    let mut record = Record::new();

    for column in row.columns() {
        let name = column.name();
        let value = match column.type_info().name() {
            "INTEGER" => row
                .try_get::<Option<i64>, _>(name)
                .ok()
                .flatten()
                .map_or(Value::Null, |v| json!(v)),
            "REAL" => row
                .try_get::<Option<f64>, _>(name)
                .ok()
                .flatten()
                .map_or(Value::Null, |v| json!(v)),
            _ => row
                .try_get::<Option<String>, _>(name)
                .ok()
                .flatten()
                .map_or(Value::Null, |v| json!(v)),
        };
        record.insert(name.to_string(), value);
    }

    record
}
