//! Detection result types

use crate::chain::{OptionChain, OptionContract};
use serde::{Deserialize, Serialize};

/// Which baselines a record exceeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyFlags {
    /// Volume exceeded mean volume times the volume threshold
    pub volume: bool,
    /// Open interest exceeded mean open interest times the OI threshold
    pub open_interest: bool,
}

impl AnomalyFlags {
    /// True when at least one baseline was exceeded
    pub fn any(&self) -> bool {
        self.volume || self.open_interest
    }
}

/// A chain record flagged as unusual, with the flags that fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedContract {
    pub contract: OptionContract,
    pub flags: AnomalyFlags,
}

/// Chain-wide activity baseline
///
/// Means are taken over every record in the chain, calls and puts
/// together, including records that never traded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainBaseline {
    pub mean_volume: f64,
    pub mean_open_interest: f64,
}

impl ChainBaseline {
    /// Compute the baseline for a chain, `None` when the chain is empty
    pub fn compute(chain: &OptionChain) -> Option<Self> {
        if chain.is_empty() {
            return None;
        }

        let count = chain.len() as f64;
        let (volume_sum, oi_sum) = chain.contracts.iter().fold((0.0, 0.0), |(v, oi), c| {
            (v + c.volume as f64, oi + c.open_interest as f64)
        });

        Some(Self {
            mean_volume: volume_sum / count,
            mean_open_interest: oi_sum / count,
        })
    }
}
