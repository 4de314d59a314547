mod chat;
mod core;
#[cfg(test)]
mod test_support;
mod tui;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "alma", about = "Simulated chat companion for the terminal")]
struct Args {
    /// Fix the reply RNG seed (reproducible template choices)
    #[arg(short, long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to alma.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("alma.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = crate::core::config::load_config().map_err(std::io::Error::other)?;
    let resolved = crate::core::config::resolve(&config, args.seed);

    log::info!("Alma starting up (persona: {})", resolved.persona);

    tui::run(resolved)
}
