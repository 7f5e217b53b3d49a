pub mod maxmind;

use std::net::IpAddr;
use std::path::Path;

pub use maxmind::MaxmindBackend;
pub use maxmind::MaxmindFactory;

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Country {
    pub code: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub region: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub dma_code: i32,
    pub area_code: i32,
    pub metro_code: i32,
}

/// Point lookups against an open geo database. `None` means the address has
/// no record. Implementations aren't required to be `Sync`, the handle
/// serializes access.
pub trait Backend: Send {
    fn country(&self, ip: IpAddr) -> Result<Option<Country>>;
    fn location(&self, ip: IpAddr) -> Result<Option<Location>>;
    fn org(&self, ip: IpAddr) -> Result<Option<String>>;
    fn id(&self, ip: IpAddr) -> Result<Option<String>>;
}

pub trait BackendFactory: Send + Sync {
    /// Opens the database at `path`, loading it into memory.
    fn open(&self, path: &Path) -> Result<Box<dyn Backend>>;
}
