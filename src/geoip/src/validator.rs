use std::fmt;

use tracing::debug;

use crate::error::GeoIpError;
use crate::error::Result;
use crate::ip::IpKind;

pub const ARGUMENTS: usize = 3;

/// Declared scalar type of an argument as seen by the host engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgType {
    Text,
    /// Integer type representable in 64 bits.
    Integer,
    Other(String),
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgType::Text => write!(f, "string"),
            ArgType::Integer => write!(f, "bigint"),
            ArgType::Other(name) => write!(f, "{name}"),
        }
    }
}

impl ArgType {
    /// How an address argument of this type is read.
    pub fn ip_kind(&self) -> Result<IpKind> {
        match self {
            ArgType::Text => Ok(IpKind::Text),
            ArgType::Integer => Ok(IpKind::Integer),
            other => Err(GeoIpError::argument_type(0, other.to_string())),
        }
    }
}

/// Checks arity and argument types, resolving how the address argument is
/// read at evaluation time.
pub fn validate(args: &[ArgType]) -> Result<IpKind> {
    if args.len() != ARGUMENTS {
        return Err(GeoIpError::ArgumentCount(args.len()));
    }

    let kind = args[0].ip_kind()?;

    for (position, arg) in args.iter().enumerate().skip(1) {
        if *arg != ArgType::Text {
            return Err(GeoIpError::argument_type(position, arg.to_string()));
        }
    }

    debug!("geoip arguments validated, ip is {kind}");

    Ok(kind)
}
