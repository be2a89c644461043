//! Last-ticker persistence
//!
//! Small plain-text store so a scan with no ticker argument can fall back
//! to whatever was scanned last.

use std::fs;
use std::path::{Path, PathBuf};

/// Remembers the last scanned ticker across runs
pub struct LastTickerStore {
    path: PathBuf,
}

impl LastTickerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Last saved ticker, `None` when the file is missing or blank
    pub fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let ticker = raw.trim();
        if ticker.is_empty() {
            None
        } else {
            Some(ticker.to_string())
        }
    }

    /// Persist the ticker; failure is logged, never fatal to the scan
    pub fn save(&self, ticker: &str) {
        if let Err(e) = fs::write(&self.path, ticker.trim()) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to save last ticker"
            );
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
