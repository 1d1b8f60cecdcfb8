//! Runtime configuration read from the environment.

use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_PARAMS_FILE: &str = "cooler_params.json";
pub const DEFAULT_LOG_FILTER: &str = "cooler_engine=info";

/// Server settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Address the HTTP API binds to (`COOLER_BIND_ADDR`).
    pub bind_addr: String,
    /// JSON file overriding business parameters (`COOLER_PARAMS_FILE`).
    /// A missing file means the built-in defaults.
    pub params_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_addr: lookup("COOLER_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            params_file: lookup("COOLER_PARAMS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PARAMS_FILE)),
        }
    }
}
