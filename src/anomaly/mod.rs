//! Unusual options activity detection
//!
//! Scores every record in a chain against chain-wide mean volume and mean
//! open interest, flagging records that exceed either baseline by a
//! configurable multiplier.

mod detector;
mod types;

pub use detector::{AnomalyDetector, DetectorConfig};
pub use types::{AnomalyFlags, ChainBaseline, FlaggedContract};
