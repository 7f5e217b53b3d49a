use std::path::Path;
use std::path::PathBuf;

use clap::ValueEnum;
use serde_derive::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing::Level;

use crate::error::Result;

pub const ENV_PREFIX: &str = "GEOIP";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Data {
    pub geo_db_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Log {
    #[serde(default)]
    pub level: LogLevel,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Reads `path` if given, then `GEOIP__SECTION__KEY` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.to_path_buf()));
        }
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[derive(Deserialize, Copy, Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    #[serde(rename = "trace")]
    Trace,
    #[serde(rename = "debug")]
    Debug,
    #[default]
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "error")]
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
        .into()
    }
}
