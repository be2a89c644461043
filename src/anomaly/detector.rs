//! Mean-multiplier anomaly detector

use super::{AnomalyFlags, ChainBaseline, FlaggedContract};
use crate::chain::OptionChain;
use crate::config::ScanConfig;

/// Detector thresholds as multiples of the chain-wide mean
#[derive(Debug, Clone, Copy)]
pub struct DetectorConfig {
    /// Volume flag fires above mean volume times this
    pub volume_threshold: f64,
    /// Open interest flag fires above mean open interest times this
    pub oi_threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            volume_threshold: 2.0,
            oi_threshold: 2.0,
        }
    }
}

impl From<&ScanConfig> for DetectorConfig {
    fn from(config: &ScanConfig) -> Self {
        Self {
            volume_threshold: config.volume_threshold,
            oi_threshold: config.oi_threshold,
        }
    }
}

/// Flags chain records whose activity stands out against the chain mean
pub struct AnomalyDetector {
    config: DetectorConfig,
}

impl AnomalyDetector {
    /// Create a detector with explicit thresholds
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Create a detector with the standard 2x thresholds
    pub fn with_defaults() -> Self {
        Self::new(DetectorConfig::default())
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Scan a chain and return the flagged records in chain order
    ///
    /// A record is flagged when its volume strictly exceeds the chain mean
    /// volume times the volume threshold, or its open interest strictly
    /// exceeds the chain mean open interest times the OI threshold. An
    /// empty chain has no baseline and yields no flags.
    pub fn detect(&self, chain: &OptionChain) -> Vec<FlaggedContract> {
        let baseline = match ChainBaseline::compute(chain) {
            Some(baseline) => baseline,
            None => return vec![],
        };

        let volume_cutoff = baseline.mean_volume * self.config.volume_threshold;
        let oi_cutoff = baseline.mean_open_interest * self.config.oi_threshold;

        let flagged: Vec<FlaggedContract> = chain
            .contracts
            .iter()
            .filter_map(|contract| {
                let flags = AnomalyFlags {
                    volume: contract.volume as f64 > volume_cutoff,
                    open_interest: contract.open_interest as f64 > oi_cutoff,
                };
                flags.any().then(|| FlaggedContract {
                    contract: contract.clone(),
                    flags,
                })
            })
            .collect();

        tracing::debug!(
            ticker = %chain.ticker,
            scanned = chain.len(),
            flagged = flagged.len(),
            mean_volume = baseline.mean_volume,
            mean_open_interest = baseline.mean_open_interest,
            "Scanned chain"
        );

        flagged
    }
}
