use std::collections::BTreeMap;
use std::net::IpAddr;
use std::path::Path;

use maxminddb::geoip2;
use maxminddb::MaxMindDBError;
use serde::Deserialize;
use tracing::debug;

use crate::backend::Backend;
use crate::backend::BackendFactory;
use crate::backend::Country;
use crate::backend::Location;
use crate::error::Result;

const LANG: &str = "en";

fn english(names: Option<BTreeMap<&str, &str>>) -> Option<String> {
    names
        .and_then(|names| names.get(LANG).map(|name| name.to_string()))
        .filter(|name| !name.is_empty())
}

fn non_empty(v: Option<&str>) -> Option<String> {
    v.filter(|v| !v.is_empty()).map(|v| v.to_string())
}

/// MMDB reader held fully in memory.
pub struct MaxmindBackend {
    rdr: maxminddb::Reader<Vec<u8>>,
}

impl MaxmindBackend {
    pub fn new(rdr: maxminddb::Reader<Vec<u8>>) -> Self {
        Self { rdr }
    }

    pub fn database_type(&self) -> &str {
        self.rdr.metadata.database_type.as_str()
    }

    fn lookup<'a, T: Deserialize<'a>>(&'a self, ip: IpAddr) -> Result<Option<T>> {
        match self.rdr.lookup::<T>(ip) {
            Ok(v) => Ok(Some(v)),
            Err(MaxMindDBError::AddressNotFoundError(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl Backend for MaxmindBackend {
    fn country(&self, ip: IpAddr) -> Result<Option<Country>> {
        let Some(rec) = self.lookup::<geoip2::Country>(ip)? else {
            return Ok(None);
        };

        Ok(rec.country.or(rec.registered_country).map(|c| Country {
            code: non_empty(c.iso_code),
            name: english(c.names),
        }))
    }

    fn location(&self, ip: IpAddr) -> Result<Option<Location>> {
        let Some(rec) = self.lookup::<geoip2::City>(ip)? else {
            return Ok(None);
        };

        let mut loc = Location {
            region: rec
                .subdivisions
                .and_then(|subs| subs.into_iter().next())
                .and_then(|sub| non_empty(sub.iso_code)),
            city: rec.city.and_then(|city| english(city.names)),
            postal_code: rec.postal.and_then(|postal| non_empty(postal.code)),
            ..Default::default()
        };

        if let Some(l) = rec.location {
            loc.latitude = l.latitude.unwrap_or_default();
            loc.longitude = l.longitude.unwrap_or_default();
            loc.metro_code = l.metro_code.map(i32::from).unwrap_or_default();
            // dma and metro codes identify the same market
            loc.dma_code = loc.metro_code;
        }

        Ok(Some(loc))
    }

    fn org(&self, ip: IpAddr) -> Result<Option<String>> {
        let Some(rec) = self.lookup::<geoip2::Isp>(ip)? else {
            return Ok(None);
        };

        Ok(non_empty(rec.organization)
            .or_else(|| non_empty(rec.isp))
            .or_else(|| non_empty(rec.autonomous_system_organization)))
    }

    fn id(&self, ip: IpAddr) -> Result<Option<String>> {
        let Some(rec) = self.lookup::<geoip2::City>(ip)? else {
            return Ok(None);
        };

        let id = rec
            .city
            .and_then(|c| c.geoname_id)
            .or_else(|| rec.country.and_then(|c| c.geoname_id))
            .or_else(|| rec.registered_country.and_then(|c| c.geoname_id));

        Ok(id.map(|id| id.to_string()))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MaxmindFactory {}

impl MaxmindFactory {
    pub fn new() -> Self {
        Self {}
    }
}

impl BackendFactory for MaxmindFactory {
    fn open(&self, path: &Path) -> Result<Box<dyn Backend>> {
        let rdr = maxminddb::Reader::open_readfile(path)?;
        let backend = MaxmindBackend::new(rdr);
        debug!(
            "loaded {} database from {:?}",
            backend.database_type(),
            path
        );

        Ok(Box::new(backend))
    }
}
