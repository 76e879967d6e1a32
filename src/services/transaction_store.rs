use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::db::provider::{Filter, StorageProvider, Table};
use crate::db::utils::{
    managed_asset_values, parse_managed_asset, parse_transaction, transaction_values,
};
use crate::errors::StoreError;
use crate::models::{AssetType, ManagedAsset, Transaction};

/// Owns all reads and writes of transaction and managed-ticker
/// records. Backend-agnostic: ordering, validation, and uniqueness
/// live here, never in a provider.
pub struct TransactionStore {
    provider: Arc<dyn StorageProvider>,
}

impl TransactionStore {
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    pub async fn add_transaction(
        &self,
        date: NaiveDate,
        asset_type: AssetType,
        ticker: &str,
        amount: Decimal,
        quantity: Decimal,
    ) -> Result<(), StoreError> {
        let ticker = normalize_ticker(ticker)?;
        validate_amounts(amount, quantity)?;

        self.provider
            .append(
                Table::Investments,
                transaction_values(&date, asset_type, &ticker, amount, quantity),
            )
            .await?;

        Ok(())
    }

    /// All transactions, newest first. A failed or partially
    /// unreadable backend degrades to fewer rows, never to an error.
    pub async fn list_transactions(&self) -> Vec<Transaction> {
        let records = match self.provider.read_all(Table::Investments).await {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "failed to read transactions, treating store as empty");
                return Vec::new();
            }
        };

        let mut transactions: Vec<Transaction> = records
            .iter()
            .filter_map(|record| match parse_transaction(record) {
                Ok(transaction) => Some(transaction),
                Err(err) => {
                    warn!(error = %err, "skipping malformed transaction row");
                    None
                }
            })
            .collect();

        transactions.sort_by(|a, b| b.date().cmp(a.date()));
        transactions
    }

    /// Replaces all mutable fields of the matching record. Unknown
    /// ids are a no-op.
    pub async fn update_transaction(
        &self,
        id: i64,
        date: NaiveDate,
        asset_type: AssetType,
        ticker: &str,
        amount: Decimal,
        quantity: Decimal,
    ) -> Result<(), StoreError> {
        let ticker = normalize_ticker(ticker)?;
        validate_amounts(amount, quantity)?;

        self.provider
            .update_matching(
                Table::Investments,
                &Filter::by_id(id),
                transaction_values(&date, asset_type, &ticker, amount, quantity),
            )
            .await?;

        Ok(())
    }

    pub async fn delete_transaction(&self, id: i64) -> Result<(), StoreError> {
        self.provider
            .delete_matching(Table::Investments, &Filter::by_id(id))
            .await?;

        Ok(())
    }

    pub async fn list_managed_assets(
        &self,
        asset_type: Option<AssetType>,
    ) -> Result<Vec<ManagedAsset>, StoreError> {
        let records = self.provider.read_all(Table::ManagedAssets).await?;

        let mut assets: Vec<ManagedAsset> = records
            .iter()
            .filter_map(|record| match parse_managed_asset(record) {
                Ok(asset) => Some(asset),
                Err(err) => {
                    warn!(error = %err, "skipping malformed managed asset row");
                    None
                }
            })
            .collect();

        match asset_type {
            Some(filter) => {
                assets.retain(|asset| *asset.asset_type() == filter);
                assets.sort_by(|a, b| a.ticker().cmp(b.ticker()));
            }
            None => {
                assets.sort_by(|a, b| {
                    (a.asset_type(), a.ticker()).cmp(&(b.asset_type(), b.ticker()))
                });
            }
        }

        Ok(assets)
    }

    /// Returns false on a case-insensitive duplicate instead of
    /// erroring, so callers can show a friendly message.
    pub async fn add_managed_asset(
        &self,
        ticker: &str,
        asset_type: AssetType,
    ) -> Result<bool, StoreError> {
        let ticker = normalize_ticker(ticker)?;

        let existing = self.list_managed_assets(None).await?;
        if existing
            .iter()
            .any(|asset| asset.ticker().eq_ignore_ascii_case(&ticker))
        {
            return Ok(false);
        }

        self.provider
            .append(Table::ManagedAssets, managed_asset_values(&ticker, asset_type))
            .await?;

        Ok(true)
    }

    pub async fn delete_managed_asset(&self, id: i64) -> Result<(), StoreError> {
        self.provider
            .delete_matching(Table::ManagedAssets, &Filter::by_id(id))
            .await?;

        Ok(())
    }
}

fn normalize_ticker(ticker: &str) -> Result<String, StoreError> {
    let ticker = ticker.trim();
    if ticker.is_empty() {
        return Err(StoreError::Validation(String::from(
            "ticker must not be empty",
        )));
    }

    Ok(ticker.to_uppercase())
}

fn validate_amounts(amount: Decimal, quantity: Decimal) -> Result<(), StoreError> {
    if amount <= Decimal::ZERO {
        return Err(StoreError::Validation(String::from(
            "amount must be greater than zero",
        )));
    }
    if quantity <= Decimal::ZERO {
        return Err(StoreError::Validation(String::from(
            "quantity must be greater than zero",
        )));
    }

    Ok(())
}
