//! Scan report assembly and rendering
//!
//! Carries the outcome of one chain scan and renders it for the terminal
//! or as JSON. The table lists flagged records only, in chain order.

use crate::anomaly::{ChainBaseline, FlaggedContract};
use crate::chain::OptionChain;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use uuid::Uuid;

/// Outcome of one chain scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Unique id for this scan
    pub scan_id: Uuid,
    pub ticker: String,
    /// Expiry the chain was fetched for
    pub expiry: NaiveDate,
    /// Records scanned, calls and puts together
    pub contracts_scanned: usize,
    /// Chain-wide baseline, absent for an empty chain
    pub baseline: Option<ChainBaseline>,
    /// Flagged records in chain order
    pub flagged: Vec<FlaggedContract>,
    pub generated_at: DateTime<Utc>,
}

impl ScanReport {
    /// Assemble a report from a scanned chain and its detection results
    pub fn new(
        chain: &OptionChain,
        baseline: Option<ChainBaseline>,
        flagged: Vec<FlaggedContract>,
    ) -> Self {
        Self {
            scan_id: Uuid::new_v4(),
            ticker: chain.ticker.clone(),
            expiry: chain.expiry,
            contracts_scanned: chain.len(),
            baseline,
            flagged,
            generated_at: Utc::now(),
        }
    }

    pub fn has_anomalies(&self) -> bool {
        !self.flagged.is_empty()
    }

    /// One-line alert for the end of a scan
    pub fn alert(&self) -> String {
        if self.flagged.is_empty() {
            "No unusual options activity detected.".to_string()
        } else {
            format!(
                "Detected {} unusual options activities.",
                self.flagged.len()
            )
        }
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        let (mean_volume, mean_oi) = match self.baseline {
            Some(b) => (
                format!("{:.2}", b.mean_volume),
                format!("{:.2}", b.mean_open_interest),
            ),
            None => ("-".to_string(), "-".to_string()),
        };

        let mut out = format!(
            r#"
══════════════════════════════════════════════════════
            UNUSUAL OPTIONS ACTIVITY
══════════════════════════════════════════════════════

Ticker:           {}
Expiry:           {}
Contracts:        {}
Mean Volume:      {}
Mean Open Int:    {}

FLAGGED CONTRACTS
───────────────────────────────────────────────────────
"#,
            self.ticker, self.expiry, self.contracts_scanned, mean_volume, mean_oi,
        );

        let _ = writeln!(
            out,
            "{:<6} {:>10} {:>10} {:>14} {:>9}  {}",
            "Type", "Strike", "Volume", "Open Interest", "IV", "Anomaly"
        );
        for flagged in &self.flagged {
            let c = &flagged.contract;
            let _ = writeln!(
                out,
                "{:<6} {:>10.2} {:>10} {:>14} {:>8.2}%  {}",
                c.side.as_str(),
                c.strike,
                c.volume,
                c.open_interest,
                c.implied_volatility * 100.0,
                if flagged.flags.any() { "Yes" } else { "No" },
            );
        }

        out.push_str("══════════════════════════════════════════════════════\n");
        out
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Message for a ticker with no retrievable chain
pub fn no_data_message(ticker: &str) -> String {
    format!("No options data available for {ticker}.")
}
