use anyhow::Result;
use env_logger::Env;
use log::{error, info};

use nmea_fix_rust::cli::{build_cli, handle_subcommands};
use nmea_fix_rust::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let config = match Config::from_matches(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(2);
        }
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()))
        .init();

    info!("🧭 NMEA Fix Reader v{}", nmea_fix_rust::VERSION);

    if let Err(e) = handle_subcommands(&matches, &config).await {
        error!("❌ {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
