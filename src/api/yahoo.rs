use anyhow::{Error, Result};
use reqwest::Client;
use rust_decimal::{Decimal, prelude::FromPrimitive};

use super::utils::make_request;
use super::yahoo_dto::{YahooChartResponseDto, YahooQuoteDto, YahooQuoteResponseDto};

const BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Clone, Debug, Default)]
pub struct YahooApi {
    client: Client,
}

impl YahooApi {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub async fn get_quote(&self, symbol: &str) -> Result<YahooQuoteDto> {
        let endpoint = format!("v7/finance/quote?symbols={}", symbol);
        let response =
            make_request::<YahooQuoteResponseDto>(&self.client, BASE_URL, &endpoint).await?;

        response
            .quote_response()
            .result()
            .first()
            .cloned()
            .ok_or_else(|| Error::msg(format!("No quote data found for symbol {}", symbol)))
    }

    /// Latest daily close, used when the quote endpoint fails or
    /// reports a non-positive price.
    pub async fn get_daily_close(&self, symbol: &str) -> Result<Decimal> {
        let endpoint = format!("v8/finance/chart/{}?range=1d&interval=1d", symbol);
        let response =
            make_request::<YahooChartResponseDto>(&self.client, BASE_URL, &endpoint).await?;

        let close = response
            .chart()
            .result()
            .as_ref()
            .and_then(|results| results.first())
            .and_then(|chart| chart.indicators().quote().first())
            .and_then(|quote| quote.close().iter().rev().flatten().next().copied())
            .ok_or_else(|| Error::msg(format!("No close data found for symbol {}", symbol)))?;

        Decimal::from_f64(close)
            .ok_or_else(|| Error::msg(format!("Invalid close price for symbol {}", symbol)))
    }
}
