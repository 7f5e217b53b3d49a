use std::fmt;
use std::net::IpAddr;
use std::net::Ipv4Addr;

/// Representation of the address argument, fixed by its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpKind {
    Text,
    Integer,
}

impl fmt::Display for IpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpKind::Text => write!(f, "text"),
            IpKind::Integer => write!(f, "integer"),
        }
    }
}

/// Address value of a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpInput<'a> {
    Text(&'a str),
    Integer(i64),
}

impl<'a> IpInput<'a> {
    pub fn kind(&self) -> IpKind {
        match self {
            IpInput::Text(_) => IpKind::Text,
            IpInput::Integer(_) => IpKind::Integer,
        }
    }

    /// Resolves the row value to an address. Malformed text and integers that
    /// don't fit an IPv4 address have no address, which callers treat as "no record".
    pub fn to_addr(&self) -> Option<IpAddr> {
        match self {
            IpInput::Text(s) => s.trim().parse::<IpAddr>().ok(),
            IpInput::Integer(v) => u32::try_from(*v)
                .ok()
                .map(|v| IpAddr::V4(Ipv4Addr::from(v))),
        }
    }
}

impl<'a> From<&'a str> for IpInput<'a> {
    fn from(s: &'a str) -> Self {
        IpInput::Text(s)
    }
}

impl From<i64> for IpInput<'_> {
    fn from(v: i64) -> Self {
        IpInput::Integer(v)
    }
}

#[cfg(test)]
mod tests {
    use std::net::IpAddr;
    use std::net::Ipv4Addr;
    use std::net::Ipv6Addr;

    use super::IpInput;
    use super::IpKind;

    #[test]
    fn text_addresses() {
        assert_eq!(
            IpInput::Text("209.191.139.200").to_addr(),
            Some(IpAddr::V4(Ipv4Addr::new(209, 191, 139, 200)))
        );
        assert_eq!(
            IpInput::Text(" 2001:db8::1 ").to_addr(),
            Some(IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1)))
        );
        assert_eq!(IpInput::Text("twelve").to_addr(), None);
        assert_eq!(IpInput::Text("").to_addr(), None);
        assert_eq!(IpInput::Text("256.1.1.1").to_addr(), None);
    }

    #[test]
    fn integer_addresses() {
        assert_eq!(
            IpInput::Integer(3518991304).to_addr(),
            Some(IpAddr::V4(Ipv4Addr::new(209, 191, 139, 200)))
        );
        assert_eq!(
            IpInput::Integer(0).to_addr(),
            Some(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
        );
        assert_eq!(
            IpInput::Integer(u32::MAX as i64).to_addr(),
            Some(IpAddr::V4(Ipv4Addr::BROADCAST))
        );
        assert_eq!(IpInput::Integer(-1).to_addr(), None);
        assert_eq!(IpInput::Integer(u32::MAX as i64 + 1).to_addr(), None);
    }

    #[test]
    fn kind() {
        assert_eq!(IpInput::from("1.1.1.1").kind(), IpKind::Text);
        assert_eq!(IpInput::from(16843009i64).kind(), IpKind::Integer);
    }
}
