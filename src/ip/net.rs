//! Containment and overlap predicates for CIDR networks.
//!
//! Both families implement [`NetworkOps`]; the free functions dispatch over
//! [`IpNet`] and answer `false` whenever the two sides differ in family.

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::family::{Family, FormatError};

/// Per-family network capabilities
pub trait NetworkOps: Sized + Copy + Eq + Into<IpNet> {
    type Addr;

    const FAMILY: Family;

    /// Parse a CIDR literal, rejecting host bits below the prefix
    fn parse_strict(literal: &str) -> Result<Self, FormatError>;

    /// True iff the address ranges intersect (equality and nesting included)
    fn overlaps_with(&self, other: &Self) -> bool;

    fn contains_address(&self, address: &Self::Addr) -> bool;

    /// True iff `child` widened to this prefix length is exactly `self`.
    ///
    /// Never true when `self` is more specific than `child`.
    fn is_exact_ancestor_of(&self, child: &Self) -> bool;
}

macro_rules! impl_network_ops {
    ($net:ty, $addr:ty, $family:expr) => {
        impl NetworkOps for $net {
            type Addr = $addr;

            const FAMILY: Family = $family;

            fn parse_strict(literal: &str) -> Result<Self, FormatError> {
                let net: $net = literal.trim().parse().map_err(|_| FormatError::InvalidNetwork {
                    family: Self::FAMILY,
                    literal: literal.to_string(),
                })?;
                if net.trunc() != net {
                    return Err(FormatError::HostBitsSet {
                        literal: literal.to_string(),
                        network: net.trunc().into(),
                    });
                }
                Ok(net)
            }

            fn overlaps_with(&self, other: &Self) -> bool {
                // CIDR blocks are either nested or disjoint
                self.contains(&other.network()) || other.contains(&self.network())
            }

            fn contains_address(&self, address: &Self::Addr) -> bool {
                self.contains(address)
            }

            fn is_exact_ancestor_of(&self, child: &Self) -> bool {
                if self.prefix_len() > child.prefix_len() {
                    return false;
                }
                match <$net>::new(child.network(), self.prefix_len()) {
                    Ok(widened) => widened.trunc() == *self,
                    Err(_) => false,
                }
            }
        }
    };
}

impl_network_ops!(Ipv4Net, Ipv4Addr, Family::Ipv4);
impl_network_ops!(Ipv6Net, Ipv6Addr, Family::Ipv6);

pub fn overlaps(a: &IpNet, b: &IpNet) -> bool {
    match (a, b) {
        (IpNet::V4(a), IpNet::V4(b)) => a.overlaps_with(b),
        (IpNet::V6(a), IpNet::V6(b)) => a.overlaps_with(b),
        _ => false,
    }
}

pub fn contains(network: &IpNet, address: &IpAddr) -> bool {
    match (network, address) {
        (IpNet::V4(net), IpAddr::V4(addr)) => net.contains_address(addr),
        (IpNet::V6(net), IpAddr::V6(addr)) => net.contains_address(addr),
        _ => false,
    }
}

pub fn is_exact_ancestor(candidate_parent: &IpNet, child: &IpNet) -> bool {
    match (candidate_parent, child) {
        (IpNet::V4(parent), IpNet::V4(child)) => parent.is_exact_ancestor_of(child),
        (IpNet::V6(parent), IpNet::V6(child)) => parent.is_exact_ancestor_of(child),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> IpNet {
        s.parse().unwrap()
    }

    #[test]
    fn test_overlaps() {
        // Equality
        assert!(overlaps(&net("10.0.0.0/24"), &net("10.0.0.0/24")));
        // Containment in both directions
        assert!(overlaps(&net("10.0.0.0/16"), &net("10.0.5.0/24")));
        assert!(overlaps(&net("10.0.5.0/24"), &net("10.0.0.0/16")));
        // Disjoint neighbours
        assert!(!overlaps(&net("10.0.0.0/24"), &net("10.0.1.0/24")));
        assert!(overlaps(&net("2001:db8::/32"), &net("2001:db8:1::/48")));
        assert!(!overlaps(&net("2001:db8::/32"), &net("2001:db9::/32")));
        // Families never overlap
        assert!(!overlaps(&net("0.0.0.0/0"), &net("::/0")));
    }

    #[test]
    fn test_contains() {
        let pool = net("10.207.0.0/16");
        assert!(contains(&pool, &"10.207.12.1".parse().unwrap()));
        assert!(!contains(&pool, &"10.208.0.1".parse().unwrap()));
        assert!(!contains(&pool, &"fec0::1".parse().unwrap()));
    }

    #[test]
    fn test_is_exact_ancestor() {
        let parent = net("172.20.0.0/16");
        assert!(is_exact_ancestor(&parent, &net("172.20.4.0/24")));
        assert!(is_exact_ancestor(&parent, &parent));
        assert!(!is_exact_ancestor(&parent, &net("172.21.4.0/24")));
        // A coarser child never matches
        assert!(!is_exact_ancestor(&net("172.20.4.0/24"), &parent));
        assert!(is_exact_ancestor(&net("2001:db8::/32"), &net("2001:db8:ff00::/40")));
        assert!(!is_exact_ancestor(&net("2001:db8::/32"), &net("172.20.4.0/24")));
    }

    #[test]
    fn test_parse_strict_via_trait() {
        assert!(Ipv6Net::parse_strict(" fd00::/8 ").is_ok());
        assert!(matches!(
            Ipv6Net::parse_strict("fd00::1/8"),
            Err(FormatError::HostBitsSet { .. })
        ));
        assert!(matches!(
            Ipv4Net::parse_strict("fd00::/8"),
            Err(FormatError::InvalidNetwork { family: Family::Ipv4, .. })
        ));
    }
}
