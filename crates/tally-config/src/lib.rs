#![allow(clippy::must_use_candidate)]

pub mod health;
mod loader;
pub mod log;
pub mod server;

use serde::Deserialize;

pub use health::HealthConfig;
pub use log::LogConfig;
pub use server::ServerConfig;

/// Top-level tally configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}
