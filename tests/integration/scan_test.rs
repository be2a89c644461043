//! Integration tests for the scan pipeline
//!
//! Drives fetch, detection, and report assembly end to end against a
//! fixture provider, without touching the network.

use async_trait::async_trait;
use chrono::NaiveDate;
use flowscan::anomaly::{AnomalyDetector, ChainBaseline};
use flowscan::chain::{ChainFetcher, ChainProvider, ContractQuote, ProviderError};
use flowscan::report::{no_data_message, ScanReport};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

struct FixtureProvider {
    expiries: Vec<NaiveDate>,
    calls: Vec<ContractQuote>,
    puts: Vec<ContractQuote>,
    fail: bool,
}

#[async_trait]
impl ChainProvider for FixtureProvider {
    async fn list_expiries(&self, ticker: &str) -> Result<Vec<NaiveDate>, ProviderError> {
        if self.fail {
            return Err(ProviderError::UnknownSymbol(ticker.to_string()));
        }
        Ok(self.expiries.clone())
    }

    async fn fetch_chain(
        &self,
        _ticker: &str,
        _expiry: NaiveDate,
    ) -> Result<(Vec<ContractQuote>, Vec<ContractQuote>), ProviderError> {
        Ok((self.calls.clone(), self.puts.clone()))
    }
}

fn expiry() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
}

fn quote(symbol: &str, strike: Decimal, volume: u64, open_interest: u64) -> ContractQuote {
    ContractQuote {
        contract_symbol: symbol.to_string(),
        expiry: expiry(),
        strike,
        volume,
        open_interest,
        implied_volatility: 0.27,
    }
}

#[tokio::test]
async fn test_scan_flags_volume_spike() {
    let provider = FixtureProvider {
        expiries: vec![expiry()],
        calls: vec![
            quote("AAPL240621C00185000", dec!(185.0), 50, 200),
            quote("AAPL240621C00190000", dec!(190.0), 500, 210),
        ],
        puts: vec![quote("AAPL240621P00185000", dec!(185.0), 40, 190)],
        fail: false,
    };

    let chain = ChainFetcher::new(provider)
        .fetch("AAPL")
        .await
        .into_chain()
        .unwrap();

    let baseline = ChainBaseline::compute(&chain);
    let flagged = AnomalyDetector::with_defaults().detect(&chain);
    let report = ScanReport::new(&chain, baseline, flagged);

    assert_eq!(report.contracts_scanned, 3);
    assert_eq!(report.flagged.len(), 1);
    assert_eq!(
        report.flagged[0].contract.contract_symbol,
        "AAPL240621C00190000"
    );
    assert!(report.flagged[0].flags.volume);
    assert_eq!(report.alert(), "Detected 1 unusual options activities.");

    let table = report.format_table();
    assert!(table.contains("AAPL"));
    assert!(table.contains("190.00"));
    assert!(table.contains("Yes"));
}

#[tokio::test]
async fn test_scan_quiet_chain_reports_nothing() {
    let provider = FixtureProvider {
        expiries: vec![expiry()],
        calls: vec![
            quote("AAPL240621C00185000", dec!(185.0), 100, 200),
            quote("AAPL240621C00190000", dec!(190.0), 110, 210),
        ],
        puts: vec![quote("AAPL240621P00185000", dec!(185.0), 90, 190)],
        fail: false,
    };

    let chain = ChainFetcher::new(provider)
        .fetch("AAPL")
        .await
        .into_chain()
        .unwrap();

    let flagged = AnomalyDetector::with_defaults().detect(&chain);
    let report = ScanReport::new(&chain, ChainBaseline::compute(&chain), flagged);

    assert!(!report.has_anomalies());
    assert_eq!(report.alert(), "No unusual options activity detected.");
}

#[tokio::test]
async fn test_scan_unknown_symbol_yields_no_data() {
    let provider = FixtureProvider {
        expiries: vec![],
        calls: vec![],
        puts: vec![],
        fail: true,
    };

    let outcome = ChainFetcher::new(provider).fetch("ZZZZ").await;
    assert!(outcome.is_no_data());
    assert_eq!(no_data_message("ZZZZ"), "No options data available for ZZZZ.");
}

#[tokio::test]
async fn test_scan_report_serializes_to_json() {
    let provider = FixtureProvider {
        expiries: vec![expiry()],
        calls: vec![quote("AAPL240621C00190000", dec!(190.0), 500, 210)],
        puts: vec![quote("AAPL240621P00185000", dec!(185.0), 10, 20)],
        fail: false,
    };

    let chain = ChainFetcher::new(provider)
        .fetch("AAPL")
        .await
        .into_chain()
        .unwrap();

    let flagged = AnomalyDetector::with_defaults().detect(&chain);
    let report = ScanReport::new(&chain, ChainBaseline::compute(&chain), flagged);
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["ticker"], "AAPL");
    assert_eq!(json["expiry"], "2024-06-21");
    assert_eq!(json["contracts_scanned"], 2);
}
