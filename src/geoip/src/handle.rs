use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use parking_lot::MutexGuard;
use tracing::info;

use crate::backend::Backend;
use crate::backend::BackendFactory;
use crate::error::GeoIpError;
use crate::error::Result;

struct Opened {
    path: PathBuf,
    backend: Mutex<Box<dyn Backend>>,
}

/// Lazily opened database, one per function instance. The path is read on
/// the first successful open only; later calls reuse the backend whatever
/// path they carry.
pub struct DatabaseHandle {
    factory: Arc<dyn BackendFactory>,
    opened: OnceCell<Opened>,
}

impl DatabaseHandle {
    pub fn new(factory: Arc<dyn BackendFactory>) -> Self {
        Self {
            factory,
            opened: OnceCell::new(),
        }
    }

    /// Returns the open backend. `path` is only called when nothing is open yet.
    pub fn get_or_open<F>(&self, path: F) -> Result<MutexGuard<'_, Box<dyn Backend>>>
    where
        F: FnOnce() -> Option<String>,
    {
        let opened = self
            .opened
            .get_or_try_init(|| open(self.factory.as_ref(), path()))?;

        Ok(opened.backend.lock())
    }

    pub fn path(&self) -> Option<&Path> {
        self.opened.get().map(|o| o.path.as_path())
    }

    pub fn is_open(&self) -> bool {
        self.opened.get().is_some()
    }
}

fn open(factory: &dyn BackendFactory, path: Option<String>) -> Result<Opened> {
    let path = PathBuf::from(path.ok_or(GeoIpError::DatabasePathMissing)?);
    if !path.exists() {
        return Err(GeoIpError::DatabaseNotFound(path));
    }

    info!("opening geoip database {:?}", path);
    let backend = factory
        .open(&path)
        .map_err(|err| GeoIpError::DatabaseOpen {
            path: path.clone(),
            source: Box::new(err),
        })?;

    Ok(Opened {
        path,
        backend: Mutex::new(backend),
    })
}

impl fmt::Debug for DatabaseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseHandle")
            .field("path", &self.path())
            .finish()
    }
}
