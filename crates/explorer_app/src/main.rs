mod config;
mod platform;

use anyhow::Context;
use clap::Parser;
use engine_logging::engine_info;

use config::{AppConfig, Args};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::resolve(Args::parse()).context("invalid configuration")?;
    engine_logging::initialize(config.log_destination, config.log_level, &config.log_file);
    engine_info!(
        "Starting launch explorer against {} (favorites in {:?})",
        config.fetch.endpoint,
        config.data_dir
    );
    platform::run_app(config).context("terminal session failed")
}
