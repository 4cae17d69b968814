mod cli;
mod combine;
mod config;
mod files;
mod group;
mod list;
mod log;
mod table;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::{load_config, DEFAULT_CONFIG};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let file_config = load_config(&config_path)?;

    match cli.command {
        Command::List {
            input,
            search,
            log,
            output,
        } => list::run(input, search, log, output, &file_config),
        Command::Log {
            input,
            search,
            output,
        } => log::run(input, search, output, &file_config),
        Command::Group {
            input,
            search,
            output,
        } => group::run(input, search, output, &file_config),
        Command::Combine {
            cube,
            mask,
            method,
            output,
        } => combine::run(cube, mask, method, output),
    }
}
