use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::api::PriceOracle;
use crate::models::{AssetType, PortfolioLine, PortfolioStats};
use crate::services::TransactionStore;

/// Stateless valuation pass over the store: group, price, aggregate.
/// Recomputed from scratch on every call.
pub struct PortfolioService {
    store: Arc<TransactionStore>,
    oracle: Arc<dyn PriceOracle>,
}

impl PortfolioService {
    pub fn new(store: Arc<TransactionStore>, oracle: Arc<dyn PriceOracle>) -> Self {
        Self { store, oracle }
    }

    /// None means "no data", not failure. Unreachable prices degrade
    /// to a zero current value on the affected line only.
    pub async fn portfolio_stats(&self) -> Option<PortfolioStats> {
        let transactions = self.store.list_transactions().await;
        if transactions.is_empty() {
            return None;
        }

        // Composite key: the same ticker under two asset types stays
        // two independent groups. One oracle call per group.
        let mut groups: BTreeMap<(String, AssetType), (Decimal, Decimal)> = BTreeMap::new();
        for transaction in &transactions {
            let entry = groups
                .entry((transaction.ticker().clone(), *transaction.asset_type()))
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            entry.0 += *transaction.amount();
            entry.1 += *transaction.quantity();
        }

        debug!(
            transactions = transactions.len(),
            groups = groups.len(),
            "computing portfolio stats"
        );

        let mut lines = Vec::with_capacity(groups.len());
        let mut total_invested = Decimal::ZERO;
        let mut total_current_value = Decimal::ZERO;

        for ((ticker, asset_type), (invested, quantity)) in groups {
            let current_price = self.oracle.current_price(&ticker, asset_type).await;
            let current_value = match current_price {
                Some(price) => quantity * price,
                None => Decimal::ZERO,
            };
            let profit_loss = current_value - invested;
            let return_pct = if invested > Decimal::ZERO {
                profit_loss / invested * Decimal::from(100)
            } else {
                Decimal::ZERO
            };

            total_invested += invested;
            total_current_value += current_value;

            lines.push(PortfolioLine::new(
                ticker,
                asset_type,
                invested,
                quantity,
                current_price,
                current_value,
                profit_loss,
                return_pct,
            ));
        }

        Some(PortfolioStats::new(
            total_invested,
            total_current_value,
            lines,
        ))
    }
}
