//! Option chain acquisition module
//!
//! Fetches the call/put chain for a ticker's nearest expiry from the
//! market-data provider and normalizes both sides into one collection.

mod fetcher;
mod yahoo;

pub use fetcher::{ChainFetcher, FetchOutcome};
pub use yahoo::{YahooClient, YahooConfig};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Contract side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionSide {
    Call,
    Put,
}

impl OptionSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionSide::Call => "Call",
            OptionSide::Put => "Put",
        }
    }
}

impl std::fmt::Display for OptionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a provider's calls or puts table, before the side is stamped on
///
/// Volume and open interest are already zero-filled here: providers omit
/// both for contracts that never traded, and the absence means 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractQuote {
    /// Provider contract identifier (e.g. "AAPL240621C00190000")
    pub contract_symbol: String,
    /// Expiry date of the contract
    pub expiry: NaiveDate,
    /// Strike price
    pub strike: Decimal,
    /// Traded volume, 0 when unreported
    pub volume: u64,
    /// Outstanding contracts, 0 when unreported
    pub open_interest: u64,
    /// Implied volatility as a fraction (0.35 = 35%)
    pub implied_volatility: f64,
}

impl ContractQuote {
    /// Stamp the side on, producing a normalized contract record
    pub fn into_contract(self, side: OptionSide) -> OptionContract {
        OptionContract {
            side,
            contract_symbol: self.contract_symbol,
            expiry: self.expiry,
            strike: self.strike,
            volume: self.volume,
            open_interest: self.open_interest,
            implied_volatility: self.implied_volatility,
        }
    }
}

/// A normalized contract record: one provider row plus its side
///
/// The provider's raw tables carry no side discriminator; the side is
/// stamped on during normalization via [`ContractQuote::into_contract`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    pub side: OptionSide,
    pub contract_symbol: String,
    pub expiry: NaiveDate,
    pub strike: Decimal,
    pub volume: u64,
    pub open_interest: u64,
    pub implied_volatility: f64,
}

/// The full call/put chain for one ticker at one expiry
///
/// Calls first, then puts, provider order within each side. Built fresh on
/// every fetch and never cached across scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    pub ticker: String,
    pub expiry: NaiveDate,
    pub contracts: Vec<OptionContract>,
}

impl OptionChain {
    /// Number of contract records in the chain
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Check if the chain holds no contracts
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Iterate the call side
    pub fn calls(&self) -> impl Iterator<Item = &OptionContract> {
        self.contracts
            .iter()
            .filter(|c| c.side == OptionSide::Call)
    }

    /// Iterate the put side
    pub fn puts(&self) -> impl Iterator<Item = &OptionContract> {
        self.contracts.iter().filter(|c| c.side == OptionSide::Put)
    }
}

/// Errors raised by chain provider implementations
///
/// These never cross the fetcher boundary: `ChainFetcher` logs the cause
/// and collapses every variant into the no-data outcome.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Provider answered with a non-success status
    #[error("Provider returned status {0}")]
    Status(reqwest::StatusCode),
    /// Body did not match the expected shape
    #[error("Malformed provider response: {0}")]
    Malformed(String),
    /// Provider has no listing for the symbol
    #[error("Unknown symbol {0}")]
    UnknownSymbol(String),
}

/// Trait for market-data provider implementations
///
/// The provider is an opaque, possibly-failing remote dependency; keeping
/// it behind a trait lets the pipeline run against synthetic chains in
/// tests.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Available expiry dates for a ticker, chronologically ascending
    async fn list_expiries(&self, ticker: &str) -> Result<Vec<NaiveDate>, ProviderError>;

    /// The calls table and puts table for one expiry
    async fn fetch_chain(
        &self,
        ticker: &str,
        expiry: NaiveDate,
    ) -> Result<(Vec<ContractQuote>, Vec<ContractQuote>), ProviderError>;
}
