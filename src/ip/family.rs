//! Address family tag and family-aware literal parsing.
//!
//! Descriptor files tag every address and network with the family it
//! belongs to (`ipv4` / `ipv6`). Parsing goes through the tag so that a
//! literal of the wrong family is rejected instead of silently accepted.

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::net::NetworkOps;

/// The two address families a community can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Ipv4,
    Ipv6,
}

impl Family {
    /// Width of an address of this family in bits
    pub fn bits(self) -> u8 {
        match self {
            Family::Ipv4 => 32,
            Family::Ipv6 => 128,
        }
    }

    pub fn of_address(address: &IpAddr) -> Self {
        match address {
            IpAddr::V4(_) => Family::Ipv4,
            IpAddr::V6(_) => Family::Ipv6,
        }
    }

    pub fn of_network(network: &IpNet) -> Self {
        match network {
            IpNet::V4(_) => Family::Ipv4,
            IpNet::V6(_) => Family::Ipv6,
        }
    }

    /// Parse an address literal that must belong to this family
    pub fn parse_address(self, literal: &str) -> Result<IpAddr, FormatError> {
        let trimmed = literal.trim();
        let parsed = match self {
            Family::Ipv4 => trimmed.parse::<Ipv4Addr>().map(IpAddr::V4),
            Family::Ipv6 => trimmed.parse::<Ipv6Addr>().map(IpAddr::V6),
        };
        parsed.map_err(|_| FormatError::InvalidAddress {
            family: self,
            literal: literal.to_string(),
        })
    }

    /// Parse a CIDR literal that must belong to this family.
    ///
    /// Parsing is strict: host bits set below the prefix length are an error.
    pub fn parse_network(self, literal: &str) -> Result<IpNet, FormatError> {
        match self {
            Family::Ipv4 => Ipv4Net::parse_strict(literal).map(IpNet::V4),
            Family::Ipv6 => Ipv6Net::parse_strict(literal).map(IpNet::V6),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Ipv4 => write!(f, "IPv4"),
            Family::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// Malformed address or network literal
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FormatError {
    #[error("'{literal}' is not a valid {family} address")]
    InvalidAddress { family: Family, literal: String },

    #[error("'{literal}' is not a valid {family} network")]
    InvalidNetwork { family: Family, literal: String },

    #[error("'{literal}' is not a valid IP network")]
    InvalidCidr { literal: String },

    #[error("'{literal}' has host bits set (network is {network})")]
    HostBitsSet { literal: String, network: IpNet },
}

/// Parse a CIDR literal of either family, detecting the family from the text
pub fn parse_any_network(literal: &str) -> Result<IpNet, FormatError> {
    let family = if literal.contains(':') {
        Family::Ipv6
    } else {
        Family::Ipv4
    };
    family.parse_network(literal).map_err(|e| match e {
        FormatError::InvalidNetwork { literal, .. } => FormatError::InvalidCidr { literal },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address_by_family() {
        assert_eq!(
            Family::Ipv4.parse_address("10.207.0.1").unwrap(),
            "10.207.0.1".parse::<IpAddr>().unwrap()
        );
        assert!(Family::Ipv6.parse_address("fec0::a:cf:0:1").is_ok());

        // Wrong family for the tag
        let err = Family::Ipv4.parse_address("fec0::1").unwrap_err();
        assert!(matches!(err, FormatError::InvalidAddress { family: Family::Ipv4, .. }));
        assert!(Family::Ipv6.parse_address("10.0.0.1").is_err());
        assert!(Family::Ipv4.parse_address("10.0.0.256").is_err());
    }

    #[test]
    fn test_parse_network_is_strict() {
        assert!(Family::Ipv4.parse_network("198.51.100.0/24").is_ok());
        assert!(Family::Ipv6.parse_network("2001:db8:1::/48").is_ok());

        let err = Family::Ipv4.parse_network("198.51.100.1/24").unwrap_err();
        match err {
            FormatError::HostBitsSet { network, .. } => {
                assert_eq!(network, "198.51.100.0/24".parse::<IpNet>().unwrap());
            }
            other => panic!("unexpected error: {:?}", other),
        }

        assert!(Family::Ipv4.parse_network("2001:db8::/32").is_err());
        assert!(Family::Ipv4.parse_network("10.0.0.0/33").is_err());
        assert!(Family::Ipv4.parse_network("not-a-network").is_err());
    }

    #[test]
    fn test_parse_any_network_detects_family() {
        assert_eq!(Family::of_network(&parse_any_network("10.0.0.0/8").unwrap()), Family::Ipv4);
        assert_eq!(Family::of_network(&parse_any_network("fd00::/8").unwrap()), Family::Ipv6);
        assert!(matches!(
            parse_any_network("bogus"),
            Err(FormatError::InvalidCidr { .. })
        ));
    }

    #[test]
    fn test_family_tags_deserialize() {
        let family: Family = serde_yaml::from_str("ipv6").unwrap();
        assert_eq!(family, Family::Ipv6);
        assert!(serde_yaml::from_str::<Family>("ipv5").is_err());
        assert_eq!(Family::Ipv4.to_string(), "IPv4");
    }
}
