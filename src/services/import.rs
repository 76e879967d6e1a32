use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::Reader;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::AssetType;
use crate::services::TransactionStore;

/// Bulk-loads buy records from a CSV file with the columns
/// date,asset_type,ticker,amount,quantity. Malformed rows are skipped
/// with a warning; valid rows go through the same validation as a
/// single add. Returns the number of rows imported.
pub async fn import_transactions(store: &TransactionStore, path: &str) -> Result<usize> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file at path: {}", path))?;

    let mut imported = 0;

    for (row_idx, record) in reader.records().enumerate() {
        let row_no = row_idx + 1;
        let rec =
            record.with_context(|| format!("Failed to read CSV record at row {}", row_no))?;

        if rec.len() < 5 {
            warn!(row = row_no, columns = rec.len(), "skipping short CSV row");
            continue;
        }

        let date = match NaiveDate::parse_from_str(&rec[0], "%Y-%m-%d") {
            Ok(date) => date,
            Err(err) => {
                warn!(row = row_no, value = &rec[0], error = %err, "skipping row with bad date");
                continue;
            }
        };

        let asset_type = match AssetType::from_str(&rec[1]) {
            Ok(asset_type) => asset_type,
            Err(_) => {
                warn!(row = row_no, value = &rec[1], "skipping row with unknown asset type");
                continue;
            }
        };

        let ticker = rec[2].to_string();

        let amount = match rec[3].parse::<Decimal>() {
            Ok(amount) => amount,
            Err(err) => {
                warn!(row = row_no, value = &rec[3], error = %err, "skipping row with bad amount");
                continue;
            }
        };

        let quantity = match rec[4].parse::<Decimal>() {
            Ok(quantity) => quantity,
            Err(err) => {
                warn!(row = row_no, value = &rec[4], error = %err, "skipping row with bad quantity");
                continue;
            }
        };

        match store
            .add_transaction(date, asset_type, &ticker, amount, quantity)
            .await
        {
            Ok(()) => imported += 1,
            Err(err) => {
                warn!(row = row_no, error = %err, "skipping rejected row");
            }
        }
    }

    Ok(imported)
}
