use std::result;

use arrow::error::ArrowError;
use config::ConfigError;
use geoip::GeoIpError;
use query::error::QueryError;
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;

pub type Result<T> = result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("BadRequest: {0}")]
    BadRequest(String),
    #[error("Config: {0:?}")]
    Config(#[from] ConfigError),
    #[error("GeoIp: {0}")]
    GeoIp(#[from] GeoIpError),
    #[error("Query: {0}")]
    Query(#[from] QueryError),
    #[error("Arrow: {0:?}")]
    Arrow(#[from] ArrowError),
    #[error("StdIO: {0:?}")]
    StdIO(#[from] std::io::Error),
    #[error("SetGlobalDefaultError: {0:?}")]
    SetGlobalDefaultError(#[from] SetGlobalDefaultError),
}
