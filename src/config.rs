//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "flight-timer")]
#[command(about = "A suspend-aware flight timer for the GeoFS flight simulator")]
#[command(version)]
pub struct Config {
    /// Directory for persisted timer state (defaults to the platform data dir)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// JSON file polled for the simulator's ground/pause flags
    #[arg(short, long, default_value = "geofs-state.json")]
    pub state_file: PathBuf,

    /// Start with the overlay display hidden
    #[arg(long)]
    pub hidden: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Resolve the data directory, falling back to the platform data dir
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("flight-timer")
        })
    }
}
