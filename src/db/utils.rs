use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};
use serde_json::{Value, json};
use std::str::FromStr;

use crate::db::provider::Record;
use crate::models::{AssetType, ManagedAsset, Transaction};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_i64(record: &Record, column: &str) -> Result<i64> {
    record
        .get(column)
        .and_then(Value::as_i64)
        .with_context(|| format!("Failed to parse i64 from column '{}'", column))
}

pub fn parse_string(record: &Record, column: &str) -> Result<String> {
    record
        .get(column)
        .and_then(Value::as_str)
        .map(str::to_string)
        .with_context(|| format!("Failed to parse String from column '{}'", column))
}

pub fn parse_decimal(record: &Record, column: &str) -> Result<Decimal> {
    let value = record
        .get(column)
        .with_context(|| format!("Missing column '{}'", column))?;

    match value {
        Value::Number(number) => {
            let raw = number
                .as_f64()
                .with_context(|| format!("Failed to parse f64 from column '{}'", column))?;
            Decimal::from_f64(raw)
                .with_context(|| format!("Failed to convert f64 to Decimal for column '{}'", column))
        }
        Value::String(text) => text
            .parse::<Decimal>()
            .with_context(|| format!("Failed to parse Decimal from column '{}'", column)),
        _ => anyhow::bail!("Unexpected value in column '{}'", column),
    }
}

pub fn parse_date(record: &Record, column: &str) -> Result<NaiveDate> {
    let text = parse_string(record, column)?;
    NaiveDate::parse_from_str(&text, DATE_FORMAT)
        .with_context(|| format!("Failed to parse date '{}' from column '{}'", text, column))
}

pub fn parse_asset_type(record: &Record, column: &str) -> Result<AssetType> {
    let text = parse_string(record, column)?;
    AssetType::from_str(&text)
        .with_context(|| format!("Failed to parse AssetType from column '{}'", column))
}

pub fn parse_transaction(record: &Record) -> Result<Transaction> {
    let id = parse_i64(record, "id")?;
    let date = parse_date(record, "date")?;
    let asset_type = parse_asset_type(record, "asset_type")?;
    let ticker = parse_string(record, "ticker")?;
    let amount = parse_decimal(record, "amount")?;
    let quantity = parse_decimal(record, "quantity")?;

    Ok(Transaction::new(id, date, asset_type, ticker, amount, quantity))
}

pub fn parse_managed_asset(record: &Record) -> Result<ManagedAsset> {
    let id = parse_i64(record, "id")?;
    let ticker = parse_string(record, "ticker")?;
    let asset_type = parse_asset_type(record, "asset_type")?;

    Ok(ManagedAsset::new(id, ticker, asset_type))
}

pub fn transaction_values(
    date: &NaiveDate,
    asset_type: AssetType,
    ticker: &str,
    amount: Decimal,
    quantity: Decimal,
) -> Record {
    Record::from([
        (
            String::from("date"),
            json!(date.format(DATE_FORMAT).to_string()),
        ),
        (String::from("asset_type"), json!(asset_type.to_string())),
        (String::from("ticker"), json!(ticker)),
        (String::from("amount"), json!(amount.to_f64())),
        (String::from("quantity"), json!(quantity.to_f64())),
    ])
}

pub fn managed_asset_values(ticker: &str, asset_type: AssetType) -> Record {
    Record::from([
        (String::from("ticker"), json!(ticker)),
        (String::from("asset_type"), json!(asset_type.to_string())),
    ])
}
