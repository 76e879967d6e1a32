#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::api::PriceOracle;
    use crate::api::oracle::normalize_symbol;
    use crate::db::MemoryProvider;
    use crate::db::provider::{StorageProvider, Table};
    use crate::db::utils::transaction_values;
    use crate::models::AssetType;
    use crate::services::{PortfolioService, TransactionStore};

    struct MockOracle {
        prices: HashMap<String, Decimal>,
        calls: AtomicUsize,
    }

    impl MockOracle {
        fn new(prices: &[(&str, Decimal)]) -> Self {
            Self {
                prices: prices
                    .iter()
                    .map(|(symbol, price)| (symbol.to_string(), *price))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PriceOracle for MockOracle {
        async fn current_price(&self, ticker: &str, asset_type: AssetType) -> Option<Decimal> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prices
                .get(&normalize_symbol(ticker, asset_type))
                .copied()
        }
    }

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    fn service_over(
        provider: Arc<MemoryProvider>,
        oracle: Arc<MockOracle>,
    ) -> PortfolioService {
        let store = Arc::new(TransactionStore::new(provider));
        PortfolioService::new(store, oracle)
    }

    #[tokio::test]
    async fn empty_store_returns_none() {
        let oracle = Arc::new(MockOracle::new(&[]));
        let service = service_over(Arc::new(MemoryProvider::new()), oracle);

        assert!(service.portfolio_stats().await.is_none());
    }

    #[tokio::test]
    async fn grouping_sums_per_ticker() {
        let provider = Arc::new(MemoryProvider::new());
        let oracle = Arc::new(MockOracle::new(&[("BTC-USD", dec!(50000))]));
        let service = service_over(provider.clone(), oracle.clone());

        let store = TransactionStore::new(provider);
        store
            .add_transaction(
                date("2024-01-01"),
                AssetType::Crypto,
                "BTC",
                dec!(100),
                dec!(0.01),
            )
            .await
            .unwrap();
        store
            .add_transaction(
                date("2024-02-01"),
                AssetType::Crypto,
                "BTC",
                dec!(50),
                dec!(0.005),
            )
            .await
            .unwrap();

        let stats = service.portfolio_stats().await.unwrap();
        assert_eq!(stats.lines().len(), 1);

        let line = &stats.lines()[0];
        assert_eq!(line.ticker().as_str(), "BTC");
        assert_eq!(line.invested(), &dec!(150));
        assert_eq!(line.quantity(), &dec!(0.015));
        assert_eq!(line.current_price(), &Some(dec!(50000)));
        assert_eq!(line.current_value(), &dec!(750));
        assert_eq!(line.profit_loss(), &dec!(600));
        assert_eq!(line.return_pct(), &dec!(400));

        assert_eq!(stats.total_invested(), &dec!(150));
        assert_eq!(stats.total_current_value(), &dec!(750));
    }

    #[tokio::test]
    async fn missing_price_degrades_to_zero_value() {
        let provider = Arc::new(MemoryProvider::new());
        let oracle = Arc::new(MockOracle::new(&[("AAPL", dec!(200))]));
        let service = service_over(provider.clone(), oracle.clone());

        let store = TransactionStore::new(provider);
        store
            .add_transaction(
                date("2024-01-01"),
                AssetType::Stock,
                "AAPL",
                dec!(100),
                dec!(1),
            )
            .await
            .unwrap();
        store
            .add_transaction(
                date("2024-01-02"),
                AssetType::Crypto,
                "NOPE",
                dec!(150),
                dec!(3),
            )
            .await
            .unwrap();

        let stats = service.portfolio_stats().await.unwrap();
        assert_eq!(stats.lines().len(), 2);

        let missing = stats
            .lines()
            .iter()
            .find(|line| line.ticker().as_str() == "NOPE")
            .unwrap();
        assert_eq!(missing.current_price(), &None);
        assert_eq!(missing.current_value(), &dec!(0));
        assert_eq!(missing.profit_loss(), &dec!(-150));
        assert_eq!(missing.return_pct(), &dec!(-100));

        // One group's failed lookup must not affect the other.
        let priced = stats
            .lines()
            .iter()
            .find(|line| line.ticker().as_str() == "AAPL")
            .unwrap();
        assert_eq!(priced.current_value(), &dec!(200));

        assert_eq!(stats.total_invested(), &dec!(250));
        assert_eq!(stats.total_current_value(), &dec!(200));
    }

    #[tokio::test]
    async fn zero_invested_group_yields_zero_return() {
        // A legacy row with a zero amount can exist in storage even
        // though the store rejects new ones.
        let provider = Arc::new(MemoryProvider::new());
        provider
            .append(
                Table::Investments,
                transaction_values(
                    &date("2024-01-01"),
                    AssetType::Crypto,
                    "XRP",
                    dec!(0),
                    dec!(1),
                ),
            )
            .await
            .unwrap();

        let oracle = Arc::new(MockOracle::new(&[]));
        let service = service_over(provider, oracle);

        let stats = service.portfolio_stats().await.unwrap();
        let line = &stats.lines()[0];
        assert_eq!(line.return_pct(), &dec!(0));
        assert_eq!(line.profit_loss(), &dec!(0));
    }

    #[tokio::test]
    async fn same_ticker_different_asset_types_stay_split() {
        let provider = Arc::new(MemoryProvider::new());
        let oracle = Arc::new(MockOracle::new(&[
            ("BTC-USD", dec!(50000)),
            ("BTC", dec!(10)),
        ]));
        let service = service_over(provider.clone(), oracle.clone());

        let store = TransactionStore::new(provider);
        store
            .add_transaction(
                date("2024-01-01"),
                AssetType::Crypto,
                "BTC",
                dec!(100),
                dec!(0.01),
            )
            .await
            .unwrap();
        store
            .add_transaction(
                date("2024-01-02"),
                AssetType::Stock,
                "BTC",
                dec!(100),
                dec!(10),
            )
            .await
            .unwrap();

        let stats = service.portfolio_stats().await.unwrap();
        assert_eq!(stats.lines().len(), 2);
        assert_eq!(oracle.calls(), 2);

        let crypto = stats
            .lines()
            .iter()
            .find(|line| line.asset_type() == &AssetType::Crypto)
            .unwrap();
        assert_eq!(crypto.current_value(), &dec!(500));

        let stock = stats
            .lines()
            .iter()
            .find(|line| line.asset_type() == &AssetType::Stock)
            .unwrap();
        assert_eq!(stock.current_value(), &dec!(100));
    }

    #[tokio::test]
    async fn one_oracle_call_per_group() {
        let provider = Arc::new(MemoryProvider::new());
        let oracle = Arc::new(MockOracle::new(&[
            ("BTC-USD", dec!(50000)),
            ("AAPL", dec!(200)),
        ]));
        let service = service_over(provider.clone(), oracle.clone());

        let store = TransactionStore::new(provider);
        for (day, asset_type, ticker) in [
            ("2024-01-01", AssetType::Crypto, "BTC"),
            ("2024-01-02", AssetType::Crypto, "BTC"),
            ("2024-01-03", AssetType::Crypto, "BTC"),
            ("2024-01-04", AssetType::Stock, "AAPL"),
        ] {
            store
                .add_transaction(date(day), asset_type, ticker, dec!(10), dec!(1))
                .await
                .unwrap();
        }

        let stats = service.portfolio_stats().await.unwrap();
        assert_eq!(stats.lines().len(), 2);
        assert_eq!(oracle.calls(), 2);
    }
}
