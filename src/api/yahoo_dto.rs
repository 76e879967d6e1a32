use derive_getters::Getters;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, Getters)]
pub struct YahooQuoteResponseDto {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResultDto,
}

#[derive(Clone, Debug, Deserialize, Getters)]
pub struct YahooQuoteResultDto {
    #[serde(default)]
    result: Vec<YahooQuoteDto>,
}

#[derive(Clone, Debug, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteDto {
    symbol: String,
    regular_market_price: Option<f64>,
    regular_market_previous_close: Option<f64>,
}

impl YahooQuoteDto {
    pub fn market_price(&self) -> Option<Decimal> {
        self.regular_market_price.and_then(Decimal::from_f64)
    }
}

#[derive(Clone, Debug, Deserialize, Getters)]
pub struct YahooChartResponseDto {
    chart: YahooChartResultDto,
}

#[derive(Clone, Debug, Deserialize, Getters)]
pub struct YahooChartResultDto {
    result: Option<Vec<YahooChartDto>>,
}

#[derive(Clone, Debug, Deserialize, Getters)]
pub struct YahooChartDto {
    indicators: YahooIndicatorsDto,
}

#[derive(Clone, Debug, Deserialize, Getters)]
pub struct YahooIndicatorsDto {
    quote: Vec<YahooChartQuoteDto>,
}

#[derive(Clone, Debug, Deserialize, Getters)]
pub struct YahooChartQuoteDto {
    #[serde(default)]
    close: Vec<Option<f64>>,
}
