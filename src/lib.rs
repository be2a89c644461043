//! flowscan: Unusual options activity scanner for equity option chains
//!
//! This library provides the core components for:
//! - Option chain retrieval from the Yahoo Finance options API
//! - Normalization of calls and puts into one side-tagged chain
//! - Mean-multiplier anomaly detection over volume and open interest
//! - Report rendering for terminal and JSON output
//! - Last-ticker persistence between runs

pub mod anomaly;
pub mod chain;
pub mod cli;
pub mod config;
pub mod history;
pub mod report;
pub mod telemetry;
