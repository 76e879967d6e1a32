#[cfg(test)]
mod tests {
    use crate::api::oracle::normalize_symbol;
    use crate::models::AssetType;

    #[test]
    fn crypto_gets_usd_suffix() {
        assert_eq!(normalize_symbol("BTC", AssetType::Crypto), "BTC-USD");
    }

    #[test]
    fn suffixed_crypto_is_untouched() {
        assert_eq!(normalize_symbol("BTC-USD", AssetType::Crypto), "BTC-USD");
    }

    #[test]
    fn stocks_and_etfs_are_untouched() {
        assert_eq!(normalize_symbol("AAPL", AssetType::Stock), "AAPL");
        assert_eq!(normalize_symbol("VWCE", AssetType::ETF), "VWCE");
    }
}
