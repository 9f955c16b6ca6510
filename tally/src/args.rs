use std::path::PathBuf;

use clap::Parser;

/// tally employee and expense tracking service
#[derive(Debug, Parser)]
#[command(name = "tally", about = "Employee and expense tracking REST service")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "tally.toml", env = "TALLY_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "TALLY_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
