use std::path::PathBuf;

use clap::Parser;

/// Rambox: many messaging and email web apps in one window.
#[derive(Parser, Debug)]
#[command(name = "rambox", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override, e.g. `debug` or `rambox=trace`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory holding `services.json` (defaults to the data directory).
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Skip the startup and periodic update checks.
    #[arg(long)]
    pub no_update_check: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
