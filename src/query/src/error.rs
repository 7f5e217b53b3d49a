use std::result;

use arrow::error::ArrowError;
use datafusion::error::DataFusionError;
use geoip::GeoIpError;
use thiserror::Error;

pub type Result<T> = result::Result<T, QueryError>;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("geoip {0}")]
    GeoIp(#[from] GeoIpError),
    #[error("datafusion {0:?}")]
    DataFusion(#[from] DataFusionError),
    #[error("arrow {0:?}")]
    Arrow(#[from] ArrowError),
    #[error("io {0:?}")]
    Io(#[from] std::io::Error),
}

impl QueryError {
    /// Wraps this [Error] as an [datafusion::error::DataFusionError::Execution].
    pub fn into_datafusion_execution_error(self) -> DataFusionError {
        DataFusionError::Execution(self.to_string())
    }

    /// Wraps this [Error] as an [datafusion::error::DataFusionError::Plan].
    pub fn into_datafusion_plan_error(self) -> DataFusionError {
        DataFusionError::Plan(self.to_string())
    }
}

impl From<QueryError> for ArrowError {
    fn from(e: QueryError) -> Self {
        ArrowError::ExternalError(Box::new(e))
    }
}
