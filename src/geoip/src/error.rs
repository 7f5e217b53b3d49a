use std::path::PathBuf;
use std::result;

use maxminddb::MaxMindDBError;
use thiserror::Error;

pub type Result<T> = result::Result<T, GeoIpError>;

#[derive(Error, Debug)]
pub enum GeoIpError {
    #[error(
        "The function GenericUDFGeoIP( 'input', 'resultfield', 'datafile' ) accepts 3 arguments, got {0}"
    )]
    ArgumentCount(usize),
    #[error("argument {position}: {message}, got {found}")]
    ArgumentType {
        position: usize,
        message: String,
        found: String,
    },
    #[error("{0:?} does not exist")]
    DatabaseNotFound(PathBuf),
    #[error("database path is null")]
    DatabasePathMissing,
    #[error("open {path:?}: {source}")]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: Box<GeoIpError>,
    },
    #[error("maxmind: {0:?}")]
    Maxmind(#[from] MaxMindDBError),
    #[error("io: {0:?}")]
    Io(#[from] std::io::Error),
}

impl GeoIpError {
    pub fn argument_type(position: usize, found: impl Into<String>) -> Self {
        let message = if position == 0 {
            "should be a string or an integer"
        } else {
            "should be a string"
        };

        GeoIpError::ArgumentType {
            position,
            message: message.to_string(),
            found: found.into(),
        }
    }

    /// Position of the offending argument for type errors.
    pub fn position(&self) -> Option<usize> {
        match self {
            GeoIpError::ArgumentType { position, .. } => Some(*position),
            _ => None,
        }
    }
}
