use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

use super::AssetType;

#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct Transaction {
    id: i64,
    date: NaiveDate,
    asset_type: AssetType,
    ticker: String,
    amount: Decimal,
    quantity: Decimal,
}

impl Transaction {
    pub fn price_per_unit(&self) -> Decimal {
        if self.quantity > Decimal::ZERO {
            self.amount / self.quantity
        } else {
            Decimal::ZERO
        }
    }
}
