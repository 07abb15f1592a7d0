use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use paddock::core::config::{self, CliOverrides};
use paddock::service::HttpServiceClient;
use paddock::tui;

#[derive(Parser)]
#[command(name = "paddock", about = "Terminal client for a race analysis service")]
struct Args {
    /// Analysis API base URL (e.g. http://localhost:8000/api)
    #[arg(long)]
    api_base: Option<String>,
    /// Race event identifier to analyze
    #[arg(long)]
    race_id: Option<String>,
    /// Race date (YYYY-MM-DD)
    #[arg(long)]
    race_date: Option<String>,
    /// Display name for the race
    #[arg(long)]
    race_name: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the UI, so logs go to paddock.log
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("paddock.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        Default::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            api_base: args.api_base,
            race_id: args.race_id,
            race_date: args.race_date,
            race_name: args.race_name,
        },
    );
    log::info!("Paddock starting up against {}", resolved.api_base);

    let service = Arc::new(HttpServiceClient::new(resolved.api_base.clone()));
    tui::run(resolved, service)
}
