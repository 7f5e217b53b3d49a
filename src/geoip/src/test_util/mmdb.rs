//! City database fixture written with the `matchy` MMDB builder.
//!
//! Records:
//! - `US_IP`: full city record with organization and isp
//! - `BARE_LOCATION_IP`: country and coordinates only
//! - `REGISTERED_COUNTRY_IP`: registered country only
//! - `ISP_IP`: isp and AS organization, no organization
//! - `ASN_IP`: AS organization only

use std::collections::HashMap;
use std::path::Path;

use matchy::DataValue;
use matchy::DatabaseBuilder;
use matchy::MatchMode;

use crate::test_util::BARE_LOCATION_IP;
use crate::test_util::US_IP;

pub const DATABASE_TYPE: &str = "GeoIP2-City";
pub const REGISTERED_COUNTRY_IP: &str = "81.2.69.160";
pub const ISP_IP: &str = "24.0.0.1";
pub const ASN_IP: &str = "1.128.0.1";

fn s(v: &str) -> DataValue {
    DataValue::String(v.to_string())
}

fn entries<T: FromIterator<(String, DataValue)>, const N: usize>(
    kv: [(&str, DataValue); N],
) -> T {
    kv.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn map<const N: usize>(kv: [(&str, DataValue); N]) -> DataValue {
    DataValue::Map(entries(kv))
}

fn names(en: &str) -> DataValue {
    map([("en", s(en)), ("de", s(&format!("{en} (de)")))])
}

fn us() -> DataValue {
    map([
        ("geoname_id", DataValue::Uint32(6252001)),
        ("iso_code", s("US")),
        ("names", names("United States")),
    ])
}

fn records() -> Vec<(&'static str, HashMap<String, DataValue>)> {
    vec![
        (
            US_IP,
            entries([
                (
                    "city",
                    map([
                        ("geoname_id", DataValue::Uint32(5400075)),
                        ("names", names("Sunnyvale")),
                    ]),
                ),
                ("country", us()),
                ("registered_country", us()),
                (
                    "location",
                    map([
                        ("latitude", DataValue::Double(37.4249)),
                        ("longitude", DataValue::Double(-122.0074)),
                        ("metro_code", DataValue::Uint16(807)),
                        ("time_zone", s("America/Los_Angeles")),
                    ]),
                ),
                ("postal", map([("code", s("94089"))])),
                (
                    "subdivisions",
                    DataValue::Array(vec![
                        map([("iso_code", s("CA")), ("names", names("California"))]),
                        map([("iso_code", s("SC")), ("names", names("Santa Clara"))]),
                    ]),
                ),
                ("organization", s("Yahoo")),
                ("isp", s("Yahoo! Inc.")),
                ("autonomous_system_organization", s("YAHOO-3")),
            ]),
        ),
        (
            BARE_LOCATION_IP,
            entries([
                ("country", us()),
                (
                    "location",
                    map([
                        ("latitude", DataValue::Double(38.0)),
                        ("longitude", DataValue::Double(-97.0)),
                    ]),
                ),
            ]),
        ),
        (
            REGISTERED_COUNTRY_IP,
            entries([(
                "registered_country",
                map([
                    ("geoname_id", DataValue::Uint32(2635167)),
                    ("iso_code", s("GB")),
                    ("names", names("United Kingdom")),
                ]),
            )]),
        ),
        (
            ISP_IP,
            entries([
                ("isp", s("Comcast Cable")),
                ("autonomous_system_organization", s("COMCAST-7922")),
            ]),
        ),
        (
            ASN_IP,
            entries([("autonomous_system_organization", s("Telstra"))]),
        ),
    ]
}

/// Writes the fixture database to `path`.
///
/// Panics if the database can't be built or written.
pub fn write_city_database(path: &Path) {
    let mut builder =
        DatabaseBuilder::new(MatchMode::CaseSensitive).with_database_type(DATABASE_TYPE);
    for (ip, data) in records() {
        builder.add_ip(ip, data).unwrap();
    }

    std::fs::write(path, builder.build().unwrap()).unwrap();
}
