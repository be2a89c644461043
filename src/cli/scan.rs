//! Scan command implementation

use crate::anomaly::{AnomalyDetector, ChainBaseline, DetectorConfig};
use crate::chain::{ChainFetcher, FetchOutcome, YahooClient, YahooConfig};
use crate::config::{Config, ScanConfig};
use crate::history::LastTickerStore;
use crate::report::{no_data_message, ScanReport};
use clap::Args;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Ticker symbol; falls back to the last scanned ticker when omitted
    pub ticker: Option<String>,

    /// Threshold multiplier applied to both volume and open interest
    #[arg(short, long, value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Volume threshold multiplier, takes precedence over --threshold
    #[arg(long, value_parser = parse_threshold)]
    pub volume_threshold: Option<f64>,

    /// Open interest threshold multiplier, takes precedence over --threshold
    #[arg(long, value_parser = parse_threshold)]
    pub oi_threshold: Option<f64>,

    /// Output format: json or table
    #[arg(long, default_value = "table")]
    pub format: String,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let store = LastTickerStore::new(&config.scan.history_path);

        let ticker = match self.resolve_ticker(&store) {
            Some(ticker) => ticker,
            None => anyhow::bail!("No ticker given and no previous ticker on record"),
        };
        store.save(&ticker);

        let detector = AnomalyDetector::new(self.detector_config(&config.scan));
        let client = YahooClient::with_config(YahooConfig::from(&config.provider));
        let fetcher = ChainFetcher::new(client);

        tracing::info!(ticker = %ticker, "Scanning option chain");

        let chain = match fetcher.fetch(&ticker).await {
            FetchOutcome::Chain(chain) => chain,
            FetchOutcome::NoData => {
                println!("{}", no_data_message(&ticker));
                return Ok(());
            }
        };

        let baseline = ChainBaseline::compute(&chain);
        let flagged = detector.detect(&chain);
        let report = ScanReport::new(&chain, baseline, flagged);

        match self.format.as_str() {
            "json" => println!("{}", report.to_json()?),
            "table" => {
                if report.has_anomalies() {
                    print!("{}", report.format_table());
                }
                println!("{}", report.alert());
            }
            other => anyhow::bail!("Unknown output format: {}", other),
        }

        Ok(())
    }

    /// Explicit ticker argument first, then the stored one
    fn resolve_ticker(&self, store: &LastTickerStore) -> Option<String> {
        let given = self
            .ticker
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        match given {
            Some(ticker) => Some(ticker.to_uppercase()),
            None => store.load().map(|ticker| ticker.to_uppercase()),
        }
    }

    /// Configured thresholds, overridden by --threshold, then per-metric flags
    fn detector_config(&self, scan: &ScanConfig) -> DetectorConfig {
        let base = DetectorConfig::from(scan);
        DetectorConfig {
            volume_threshold: self
                .volume_threshold
                .or(self.threshold)
                .unwrap_or(base.volume_threshold),
            oi_threshold: self
                .oi_threshold
                .or(self.threshold)
                .unwrap_or(base.oi_threshold),
        }
    }
}

/// Threshold multipliers mirror the analyzer's 1-10 range
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("`{s}` is not a valid multiplier"))?;
    if !(1.0..=10.0).contains(&value) {
        return Err("multiplier must be between 1.0 and 10.0".to_string());
    }
    Ok(value)
}
