//! IP geolocation lookups against a MaxMind database, shaped as a three
//! argument scalar function: `geoip(ip, property, database)`.

pub mod backend;
pub mod error;
pub mod function;
pub mod handle;
pub mod ip;
pub mod property;
pub mod test_util;
pub mod validator;

pub use error::GeoIpError;
pub use error::Result;
pub use function::GeoIpFunction;
pub use ip::IpInput;
pub use ip::IpKind;
pub use property::Property;
pub use property::PropertyCategory;
pub use validator::validate;
pub use validator::ArgType;
