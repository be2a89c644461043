//! Expiries command implementation

use crate::chain::{ChainProvider, YahooClient, YahooConfig};
use crate::config::Config;
use crate::report::no_data_message;
use clap::Args;

#[derive(Args, Debug)]
pub struct ExpiriesArgs {
    /// Ticker symbol
    pub ticker: String,
}

impl ExpiriesArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let ticker = self.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            anyhow::bail!("Ticker must not be empty");
        }

        let client = YahooClient::with_config(YahooConfig::from(&config.provider));
        let expiries = client.list_expiries(&ticker).await?;

        if expiries.is_empty() {
            println!("{}", no_data_message(&ticker));
            return Ok(());
        }

        println!("Expiry dates for {ticker} (nearest first):");
        for expiry in expiries {
            println!("  {expiry}");
        }

        Ok(())
    }
}
