use clap::Parser;
use flowscan::cli::{Cli, Commands};
use flowscan::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    flowscan::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Scan(args) => {
            args.execute(&config).await?;
        }
        Commands::Expiries(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Provider: {}", config.provider.base_url);
            println!("  Timeout: {}s", config.provider.timeout_secs);
            println!(
                "  Thresholds: volume={}x, oi={}x",
                config.scan.volume_threshold, config.scan.oi_threshold
            );
            println!("  History: {}", config.scan.history_path.display());
            println!("  Log level: {}", config.telemetry.log_level);
        }
    }

    Ok(())
}
