//! Command-line arguments for the `astreea` binary.
//!
//! The config file is located from `--config`, then `ASTREEA_CONFIG`, then
//! `~/.astreea/config.toml`. `--log-level` overrides the file's `log_level`.

use clap::Parser;
use std::path::PathBuf;

const CONFIG_ENV: &str = "ASTREEA_CONFIG";

/// Astreea support assistant: ask questions about your charger.
#[derive(Parser, Debug)]
#[command(name = "astreea", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Answer a single question and exit, without the simulated delay.
    #[arg(short = 'a', long = "ask", value_name = "QUESTION")]
    pub ask: Option<String>,

    /// With --ask, print the rendered blocks as JSON.
    #[arg(long = "json", requires = "ask")]
    pub json: bool,

    /// Write the effective configuration to the config path and exit.
    #[arg(long = "write-config", conflicts_with = "ask")]
    pub write_config: bool,
}

impl CliArgs {
    pub fn resolve_config_path(&self) -> PathBuf {
        self.config
            .clone()
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .unwrap_or_else(default_config_path)
    }

    /// `--log-level` if given, else the level from the config file.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// `.astreea/config.toml` under the user's home, or the working directory
/// when no home is set.
fn default_config_path() -> PathBuf {
    let home_var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    match std::env::var_os(home_var) {
        Some(home) => PathBuf::from(home).join(".astreea").join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}
