//! Yahoo Finance options API client
//!
//! Production `ChainProvider` backed by Yahoo's public v7 options endpoint,
//! the same source the usual Python tooling wraps. One request returns the
//! expiry list and, when a `date` parameter is given, that expiry's full
//! calls and puts tables.

use super::{ChainProvider, ContractQuote, ProviderError};
use crate::config::ProviderConfig;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// Yahoo Finance API base URL
pub const YAHOO_API_URL: &str = "https://query2.finance.yahoo.com";

/// Configuration for the Yahoo client
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// Base URL for the options API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent header; Yahoo rejects clients without one
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: YAHOO_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: "Mozilla/5.0 (compatible; flowscan/0.1)".to_string(),
        }
    }
}

impl From<&ProviderConfig> for YahooConfig {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Client for Yahoo's options endpoint
pub struct YahooClient {
    config: YahooConfig,
    client: Client,
}

impl YahooClient {
    /// Create a new Yahoo client with default configuration
    pub fn new() -> Self {
        Self::with_config(YahooConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: YahooConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// One round trip to the options endpoint
    ///
    /// Without `date` Yahoo answers with the expiry list and the nearest
    /// expiry's tables; with `date` it answers with that expiry's tables.
    /// Returns `Ok(None)` when the symbol has no options listing.
    async fn fetch_options(
        &self,
        ticker: &str,
        date: Option<i64>,
    ) -> Result<Option<ChainResult>, ProviderError> {
        let url = format!("{}/v7/finance/options/{}", self.config.base_url, ticker);

        tracing::debug!(url = %url, ?date, "Requesting option chain");

        let mut request = self.client.get(&url);
        if let Some(ts) = date {
            request = request.query(&[("date", ts.to_string())]);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::UnknownSymbol(ticker.to_string()));
        }
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }

        let body = response.text().await?;
        parse_chain_body(&body)
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainProvider for YahooClient {
    async fn list_expiries(&self, ticker: &str) -> Result<Vec<NaiveDate>, ProviderError> {
        let result = match self.fetch_options(ticker, None).await? {
            Some(result) => result,
            // No listing at all presents as an empty expiry list
            None => return Ok(vec![]),
        };

        let mut expiries: Vec<NaiveDate> = result
            .expiration_dates
            .iter()
            .filter_map(|ts| timestamp_to_date(*ts))
            .collect();
        expiries.sort_unstable();

        tracing::debug!(
            ticker = %result.underlying_symbol,
            expiries = expiries.len(),
            "Listed expiry dates"
        );

        Ok(expiries)
    }

    async fn fetch_chain(
        &self,
        ticker: &str,
        expiry: NaiveDate,
    ) -> Result<(Vec<ContractQuote>, Vec<ContractQuote>), ProviderError> {
        let result = self
            .fetch_options(ticker, Some(expiry_timestamp(expiry)))
            .await?
            .ok_or_else(|| {
                ProviderError::Malformed(format!("no result for requested expiry {expiry}"))
            })?;

        let block = result.options.into_iter().next().ok_or_else(|| {
            ProviderError::Malformed(format!("missing options block for expiry {expiry}"))
        })?;

        let calls: Vec<ContractQuote> = block
            .calls
            .into_iter()
            .map(|raw| quote_from_raw(raw, expiry))
            .collect();
        let puts: Vec<ContractQuote> = block
            .puts
            .into_iter()
            .map(|raw| quote_from_raw(raw, expiry))
            .collect();

        tracing::debug!(
            calls = calls.len(),
            puts = puts.len(),
            %expiry,
            "Fetched chain tables"
        );

        Ok((calls, puts))
    }
}

/// Response envelope from the options endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionsResponse {
    option_chain: OptionChainEnvelope,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionChainEnvelope {
    #[serde(default)]
    result: Vec<ChainResult>,
    error: Option<ApiError>,
}

/// One underlying's chain data
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChainResult {
    /// Symbol echoed back by the provider
    underlying_symbol: String,
    /// Available expiries as midnight-UTC unix timestamps
    #[serde(default)]
    expiration_dates: Vec<i64>,
    /// Per-expiry call/put tables (one block per requested expiry)
    #[serde(default)]
    options: Vec<OptionsBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionsBlock {
    #[serde(default)]
    calls: Vec<RawContract>,
    #[serde(default)]
    puts: Vec<RawContract>,
}

/// Raw contract row from the provider
///
/// Volume, open interest, and implied volatility are omitted by the
/// provider for contracts that never traded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContract {
    contract_symbol: String,
    strike: Decimal,
    #[serde(default)]
    volume: Option<u64>,
    #[serde(default)]
    open_interest: Option<u64>,
    #[serde(default)]
    implied_volatility: Option<f64>,
    #[serde(default)]
    expiration: Option<i64>,
}

/// Error object Yahoo embeds in the envelope
#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

/// Parse an options-endpoint body into the first chain result
///
/// `Ok(None)` means the provider answered cleanly but has nothing for the
/// symbol; an embedded error object or unparseable body is `Malformed`.
fn parse_chain_body(body: &str) -> Result<Option<ChainResult>, ProviderError> {
    let response: OptionsResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

    let envelope = response.option_chain;
    if let Some(err) = envelope.error {
        return Err(ProviderError::Malformed(format!(
            "{}: {}",
            err.code, err.description
        )));
    }

    Ok(envelope.result.into_iter().next())
}

/// Convert a raw provider row, applying the absent-means-zero policy
fn quote_from_raw(raw: RawContract, fallback_expiry: NaiveDate) -> ContractQuote {
    let expiry = raw
        .expiration
        .and_then(timestamp_to_date)
        .unwrap_or(fallback_expiry);

    ContractQuote {
        contract_symbol: raw.contract_symbol,
        expiry,
        strike: raw.strike,
        volume: raw.volume.unwrap_or(0),
        open_interest: raw.open_interest.unwrap_or(0),
        implied_volatility: raw.implied_volatility.unwrap_or(0.0),
    }
}

/// Midnight-UTC unix timestamp for an expiry date, as the API expects
fn expiry_timestamp(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Date for a provider expiry timestamp
fn timestamp_to_date(ts: i64) -> Option<NaiveDate> {
    Utc.timestamp_opt(ts, 0).single().map(|dt| dt.date_naive())
}
