use std::sync::Arc;

use tracing::debug;

use crate::backend::Backend;
use crate::backend::BackendFactory;
use crate::backend::Country;
use crate::backend::Location;
use crate::backend::MaxmindFactory;
use crate::error::Result;
use crate::handle::DatabaseHandle;
use crate::ip::IpInput;
use crate::property::CountryField;
use crate::property::LocationField;
use crate::property::Property;

pub const NAME: &str = "geoip";
pub const DESCRIPTION: &str = "geoip(ip, property, database) - loads database into GEO-IP lookup service, then looks up 'property' of ip.";

/// Renders a call for plan explain output.
pub fn display_string(children: &[String]) -> String {
    format!("GenericUDFGeoIP ( {} )", children.join(", "))
}

/// Renders floats the way a plain number-to-string conversion does, keeping
/// the fractional part of whole numbers.
fn float_to_string(v: f64) -> String {
    format!("{v:?}")
}

fn country_field(country: Country, field: CountryField) -> Option<String> {
    match field {
        CountryField::Name => country.name,
        CountryField::Code => country.code,
    }
}

fn location_field(loc: Location, field: LocationField) -> Option<String> {
    match field {
        LocationField::AreaCode => Some(loc.area_code.to_string()),
        LocationField::City => loc.city,
        LocationField::DmaCode => Some(loc.dma_code.to_string()),
        LocationField::Latitude => Some(float_to_string(loc.latitude)),
        LocationField::Longitude => Some(float_to_string(loc.longitude)),
        LocationField::MetroCode => Some(loc.metro_code.to_string()),
        LocationField::PostalCode => loc.postal_code,
        LocationField::Region => loc.region,
    }
}

/// Looks up `property` of `ip` in an open backend. Addresses without a
/// record, and unparseable addresses, yield `None`.
pub fn resolve(backend: &dyn Backend, ip: IpInput, property: Property) -> Result<Option<String>> {
    let Some(addr) = ip.to_addr() else {
        debug!("unparseable address {:?}", ip);
        return Ok(None);
    };

    let res = match property {
        Property::Country(field) => backend
            .country(addr)?
            .and_then(|c| country_field(c, field)),
        Property::Location(field) => backend
            .location(addr)?
            .and_then(|loc| location_field(loc, field)),
        Property::Org => backend.org(addr)?,
        Property::Id => backend.id(addr)?,
    };

    Ok(res.filter(|v| !v.is_empty()))
}

/// The `geoip(ip, property, database)` function. Holds the database handle
/// for its whole lifetime.
#[derive(Debug)]
pub struct GeoIpFunction {
    handle: DatabaseHandle,
}

impl GeoIpFunction {
    pub fn new(factory: Arc<dyn BackendFactory>) -> Self {
        Self {
            handle: DatabaseHandle::new(factory),
        }
    }

    pub fn maxmind() -> Self {
        Self::new(Arc::new(MaxmindFactory::new()))
    }

    pub fn handle(&self) -> &DatabaseHandle {
        &self.handle
    }

    /// Evaluates a single row. `database` is read only if no database has
    /// been opened by this instance yet.
    pub fn evaluate<F>(
        &self,
        ip: Option<IpInput>,
        property: Option<&str>,
        database: F,
    ) -> Result<Option<String>>
    where
        F: FnOnce() -> Option<String>,
    {
        let backend = self.handle.get_or_open(database)?;

        let (Some(ip), Some(property)) = (ip, property) else {
            return Ok(None);
        };

        match Property::parse(property) {
            Some(property) => resolve(&**backend, ip, property),
            None => {
                debug!("unknown geoip property {:?}", property);
                Ok(None)
            }
        }
    }
}
