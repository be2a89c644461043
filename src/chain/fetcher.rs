//! Chain fetching component
//!
//! Pulls the nearest expiry's full chain from a [`ChainProvider`] and
//! normalizes calls and puts into one side-tagged [`OptionChain`]. Provider
//! failures of any kind collapse into [`FetchOutcome::NoData`] so callers
//! see exactly two cases: a chain, or nothing to scan.

use super::{ChainProvider, OptionChain, OptionContract, OptionSide};

/// Result of a chain fetch
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Normalized chain for the nearest expiry
    Chain(OptionChain),
    /// Nothing usable: unknown symbol, no listed expiries, or provider failure
    NoData,
}

impl FetchOutcome {
    pub fn is_no_data(&self) -> bool {
        matches!(self, FetchOutcome::NoData)
    }

    pub fn into_chain(self) -> Option<OptionChain> {
        match self {
            FetchOutcome::Chain(chain) => Some(chain),
            FetchOutcome::NoData => None,
        }
    }
}

/// Fetches and normalizes option chains from a provider
pub struct ChainFetcher<P> {
    provider: P,
}

impl<P: ChainProvider> ChainFetcher<P> {
    /// Create a new fetcher over a provider
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Fetch the nearest expiry's chain for a ticker
    ///
    /// Calls are placed before puts, each record stamped with its side.
    /// An empty expiry list and every provider error map to `NoData`; the
    /// cause is logged here and not surfaced to the caller.
    pub async fn fetch(&self, ticker: &str) -> FetchOutcome {
        let expiries = match self.provider.list_expiries(ticker).await {
            Ok(expiries) => expiries,
            Err(e) => {
                tracing::warn!(ticker = %ticker, error = %e, "Expiry listing failed");
                return FetchOutcome::NoData;
            }
        };

        // Nearest expiry regardless of provider ordering
        let expiry = match expiries.into_iter().min() {
            Some(expiry) => expiry,
            None => {
                tracing::info!(ticker = %ticker, "No listed expiries");
                return FetchOutcome::NoData;
            }
        };

        let (calls, puts) = match self.provider.fetch_chain(ticker, expiry).await {
            Ok(tables) => tables,
            Err(e) => {
                tracing::warn!(ticker = %ticker, expiry = %expiry, error = %e, "Chain fetch failed");
                return FetchOutcome::NoData;
            }
        };

        let mut contracts: Vec<OptionContract> = Vec::with_capacity(calls.len() + puts.len());
        contracts.extend(calls.into_iter().map(|q| q.into_contract(OptionSide::Call)));
        contracts.extend(puts.into_iter().map(|q| q.into_contract(OptionSide::Put)));

        tracing::debug!(
            ticker = %ticker,
            expiry = %expiry,
            contracts = contracts.len(),
            "Normalized chain"
        );

        FetchOutcome::Chain(OptionChain {
            ticker: ticker.to_string(),
            expiry,
            contracts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{ContractQuote, ProviderError};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    struct StubProvider {
        expiries: Vec<NaiveDate>,
        serve_expiry: NaiveDate,
        calls: Vec<ContractQuote>,
        puts: Vec<ContractQuote>,
        fail_listing: bool,
        fail_chain: bool,
    }

    impl StubProvider {
        fn new(expiries: Vec<NaiveDate>, serve_expiry: NaiveDate) -> Self {
            Self {
                expiries,
                serve_expiry,
                calls: vec![],
                puts: vec![],
                fail_listing: false,
                fail_chain: false,
            }
        }
    }

    #[async_trait]
    impl ChainProvider for StubProvider {
        async fn list_expiries(&self, _ticker: &str) -> Result<Vec<NaiveDate>, ProviderError> {
            if self.fail_listing {
                return Err(ProviderError::Status(
                    reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                ));
            }
            Ok(self.expiries.clone())
        }

        async fn fetch_chain(
            &self,
            ticker: &str,
            expiry: NaiveDate,
        ) -> Result<(Vec<ContractQuote>, Vec<ContractQuote>), ProviderError> {
            if self.fail_chain {
                return Err(ProviderError::UnknownSymbol(ticker.to_string()));
            }
            if expiry != self.serve_expiry {
                return Err(ProviderError::Malformed(format!(
                    "unexpected expiry {expiry}"
                )));
            }
            Ok((self.calls.clone(), self.puts.clone()))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn quote(symbol: &str, volume: u64, open_interest: u64) -> ContractQuote {
        ContractQuote {
            contract_symbol: symbol.to_string(),
            expiry: date(2024, 6, 21),
            strike: dec!(190.0),
            volume,
            open_interest,
            implied_volatility: 0.25,
        }
    }

    #[tokio::test]
    async fn test_fetch_normalizes_calls_then_puts() {
        let expiry = date(2024, 6, 21);
        let mut provider = StubProvider::new(vec![expiry], expiry);
        provider.calls = vec![
            quote("AAPL240621C00185000", 100, 500),
            quote("AAPL240621C00190000", 200, 600),
        ];
        provider.puts = vec![quote("AAPL240621P00185000", 50, 300)];

        let fetcher = ChainFetcher::new(provider);
        let chain = fetcher.fetch("AAPL").await.into_chain().unwrap();

        assert_eq!(chain.ticker, "AAPL");
        assert_eq!(chain.expiry, expiry);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.contracts[0].side, OptionSide::Call);
        assert_eq!(chain.contracts[1].side, OptionSide::Call);
        assert_eq!(chain.contracts[2].side, OptionSide::Put);
        assert_eq!(chain.contracts[2].contract_symbol, "AAPL240621P00185000");
    }

    #[tokio::test]
    async fn test_fetch_picks_nearest_expiry() {
        let near = date(2024, 6, 21);
        let far = date(2024, 7, 19);
        // Listing deliberately unsorted; the stub only serves the near one
        let mut provider = StubProvider::new(vec![far, near], near);
        provider.calls = vec![quote("AAPL240621C00190000", 10, 20)];

        let fetcher = ChainFetcher::new(provider);
        let chain = fetcher.fetch("AAPL").await.into_chain().unwrap();
        assert_eq!(chain.expiry, near);
    }

    #[tokio::test]
    async fn test_fetch_empty_expiry_list() {
        let provider = StubProvider::new(vec![], date(2024, 6, 21));
        let fetcher = ChainFetcher::new(provider);
        assert!(fetcher.fetch("AAPL").await.is_no_data());
    }

    #[tokio::test]
    async fn test_fetch_expiry_listing_error() {
        let mut provider = StubProvider::new(vec![date(2024, 6, 21)], date(2024, 6, 21));
        provider.fail_listing = true;

        let fetcher = ChainFetcher::new(provider);
        assert!(fetcher.fetch("ZZZZ").await.is_no_data());
    }

    #[tokio::test]
    async fn test_fetch_chain_error() {
        let mut provider = StubProvider::new(vec![date(2024, 6, 21)], date(2024, 6, 21));
        provider.fail_chain = true;

        let fetcher = ChainFetcher::new(provider);
        assert!(fetcher.fetch("ZZZZ").await.is_no_data());
    }

    #[tokio::test]
    async fn test_fetch_empty_tables_is_still_a_chain() {
        let expiry = date(2024, 6, 21);
        let provider = StubProvider::new(vec![expiry], expiry);

        let fetcher = ChainFetcher::new(provider);
        let chain = fetcher.fetch("AAPL").await.into_chain().unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(FetchOutcome::NoData.is_no_data());
        assert!(FetchOutcome::NoData.into_chain().is_none());

        let outcome = FetchOutcome::Chain(OptionChain {
            ticker: "AAPL".to_string(),
            expiry: date(2024, 6, 21),
            contracts: vec![],
        });
        assert!(!outcome.is_no_data());
        assert!(outcome.into_chain().is_some());
    }
}
