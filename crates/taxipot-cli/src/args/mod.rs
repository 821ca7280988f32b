mod commands;
mod common;
mod enums;

pub use commands::*;
pub use common::*;
pub use enums::*;

use clap::Parser;

#[derive(Parser)]
#[command(name = "taxipot")]
#[command(about = "Find, join and create SNU shared-taxi rooms", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory [default: $TAXIPOT_PATH, then the platform data dir]
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Server base URL (overrides config.toml)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
