use anyhow::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

// Yahoo rejects requests without a browser-ish user agent.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; investment-tracker/0.1)";

pub async fn make_request<T>(client: &Client, base_url: &str, endpoint: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let url = format!("{}/{}", base_url, endpoint);
    let res = client
        .get(&url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(Error::msg(format!("Request failed: {}", res.status())));
    }

    Ok(res.json::<T>().await?)
}
