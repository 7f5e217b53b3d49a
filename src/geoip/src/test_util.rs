use std::collections::HashMap;
use std::io;
use std::net::IpAddr;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::Backend;
use crate::backend::BackendFactory;
use crate::backend::Country;
use crate::backend::Location;
use crate::error::Result;

#[cfg(any(test, feature = "mmdb-fixture"))]
pub mod mmdb;

pub const US_IP: &str = "209.191.139.200";
/// `US_IP` encoded as an integer.
pub const US_IP_NUM: i64 = 3518991304;
pub const NO_RECORD_IP: &str = "10.0.0.1";
/// Has a location without city, postal code or region.
pub const BARE_LOCATION_IP: &str = "8.8.8.8";

#[derive(Debug, Clone, Default)]
pub struct Record {
    pub country: Option<Country>,
    pub location: Option<Location>,
    pub org: Option<String>,
    pub id: Option<String>,
}

/// In-memory backend keyed by address.
#[derive(Debug, Clone, Default)]
pub struct StubBackend {
    records: Arc<HashMap<IpAddr, Record>>,
}

impl StubBackend {
    pub fn new(records: HashMap<IpAddr, Record>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    fn record(&self, ip: IpAddr) -> Option<&Record> {
        self.records.get(&ip)
    }
}

impl Backend for StubBackend {
    fn country(&self, ip: IpAddr) -> Result<Option<Country>> {
        Ok(self.record(ip).and_then(|r| r.country.clone()))
    }

    fn location(&self, ip: IpAddr) -> Result<Option<Location>> {
        Ok(self.record(ip).and_then(|r| r.location.clone()))
    }

    fn org(&self, ip: IpAddr) -> Result<Option<String>> {
        Ok(self.record(ip).and_then(|r| r.org.clone()))
    }

    fn id(&self, ip: IpAddr) -> Result<Option<String>> {
        Ok(self.record(ip).and_then(|r| r.id.clone()))
    }
}

/// Hands out `StubBackend`s and remembers every path it was asked to open.
#[derive(Debug)]
pub struct StubFactory {
    backend: StubBackend,
    fail: bool,
    opened: Mutex<Vec<PathBuf>>,
}

impl StubFactory {
    pub fn new(backend: StubBackend) -> Self {
        Self {
            backend,
            fail: false,
            opened: Mutex::new(vec![]),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().clone()
    }
}

impl Default for StubFactory {
    fn default() -> Self {
        Self::new(sample_backend())
    }
}

impl BackendFactory for StubFactory {
    fn open(&self, path: &Path) -> Result<Box<dyn Backend>> {
        self.opened.lock().push(path.to_path_buf());
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "corrupt database").into());
        }

        Ok(Box::new(self.backend.clone()))
    }
}

pub fn sample_records() -> HashMap<IpAddr, Record> {
    let mut records = HashMap::new();
    records.insert(
        US_IP.parse().unwrap(),
        Record {
            country: Some(Country {
                code: Some("US".to_string()),
                name: Some("United States".to_string()),
            }),
            location: Some(Location {
                region: Some("CA".to_string()),
                city: Some("Sunnyvale".to_string()),
                postal_code: Some("94089".to_string()),
                latitude: 37.4249,
                longitude: -122.0074,
                dma_code: 807,
                area_code: 408,
                metro_code: 807,
            }),
            org: Some("Yahoo".to_string()),
            id: Some("5400075".to_string()),
        },
    );
    records.insert(
        BARE_LOCATION_IP.parse().unwrap(),
        Record {
            country: Some(Country {
                code: Some("US".to_string()),
                name: Some("United States".to_string()),
            }),
            location: Some(Location {
                latitude: 38.0,
                longitude: -97.0,
                ..Default::default()
            }),
            org: None,
            id: Some("6252001".to_string()),
        },
    );

    records
}

pub fn sample_backend() -> StubBackend {
    StubBackend::new(sample_records())
}
