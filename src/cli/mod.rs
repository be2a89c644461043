//! CLI interface for flowscan
//!
//! Provides subcommands for:
//! - `scan`: Fetch the nearest expiry's chain and flag unusual activity
//! - `expiries`: List available expiry dates for a ticker
//! - `config`: Show resolved configuration

mod expiries;
mod scan;

pub use expiries::ExpiriesArgs;
pub use scan::ScanArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "flowscan")]
#[command(about = "Unusual options activity scanner for equity option chains")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a ticker's nearest expiry for unusual activity
    Scan(ScanArgs),
    /// List available expiry dates for a ticker
    Expiries(ExpiriesArgs),
    /// Show resolved configuration
    Config,
}
