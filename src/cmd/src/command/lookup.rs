use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use geoip::function::display_string;
use geoip::validate;
use geoip::ArgType;
use geoip::GeoIpFunction;
use geoip::IpInput;
use geoip::IpKind;
use tracing::debug;

use crate::command::NULL_DISPLAY;
use crate::config::Config;
use crate::error::Error;
use crate::error::Result;

#[derive(Parser, Clone, Debug)]
pub struct Lookup {
    /// Property to look up, e.g. COUNTRY_NAME or CITY
    #[arg(long)]
    pub property: String,
    /// Database file, overrides data.geo_db_path
    #[arg(long)]
    pub db: Option<PathBuf>,
    /// Addresses are integer encoded IPv4 addresses
    #[arg(long, default_value = "false")]
    pub numeric: bool,
    #[arg(required = true)]
    pub ips: Vec<String>,
}

pub fn run<W: Write>(args: &Lookup, cfg: &Config, out: &mut W) -> Result<()> {
    let db = match (&args.db, &cfg.data.geo_db_path) {
        (Some(db), _) => db.clone(),
        (None, Some(db)) => db.clone(),
        (None, None) => {
            return Err(Error::BadRequest(
                "database is not specified, use --db or data.geo_db_path".to_string(),
            ));
        }
    };

    lookup(&GeoIpFunction::maxmind(), args, &db, out)
}

pub fn lookup<W: Write>(
    function: &GeoIpFunction,
    args: &Lookup,
    db: &Path,
    out: &mut W,
) -> Result<()> {
    let ip_type = if args.numeric {
        ArgType::Integer
    } else {
        ArgType::Text
    };
    let kind = validate(&[ip_type, ArgType::Text, ArgType::Text])?;
    let db = db.to_string_lossy().to_string();

    for ip in &args.ips {
        debug!(
            "{}",
            display_string(&[ip.clone(), args.property.clone(), db.clone()])
        );
        let input = match kind {
            IpKind::Text => IpInput::Text(ip),
            IpKind::Integer => IpInput::Integer(
                ip.parse()
                    .map_err(|_| Error::BadRequest(format!("{ip} is not an integer")))?,
            ),
        };

        let res = function.evaluate(Some(input), Some(args.property.as_str()), || {
            Some(db.clone())
        })?;
        writeln!(out, "{}\t{}", ip, res.as_deref().unwrap_or(NULL_DISPLAY))?;
    }

    Ok(())
}
