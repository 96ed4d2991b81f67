//! Fixed BGP peering address pools.
//!
//! Every BGP peering address must lie inside its family's pool. The pools
//! also define how many low-order host bits a dual-stack peer is expected
//! to share between its IPv4 and IPv6 addresses.

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::family::Family;
use super::net;

/// Default IPv4 peering pool: 10.207.0.0/16
pub const DEFAULT_IPV4_POOL: Ipv4Net = Ipv4Net::new_assert(Ipv4Addr::new(10, 207, 0, 0), 16);

/// Default IPv6 peering pool: fec0::a:cf:0:0/96
pub const DEFAULT_IPV6_POOL: Ipv6Net =
    Ipv6Net::new_assert(Ipv6Addr::new(0xfec0, 0, 0, 0, 0xa, 0xcf, 0, 0), 96);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgpPools {
    pub ipv4: Ipv4Net,
    pub ipv6: Ipv6Net,
}

impl Default for BgpPools {
    fn default() -> Self {
        Self {
            ipv4: DEFAULT_IPV4_POOL,
            ipv6: DEFAULT_IPV6_POOL,
        }
    }
}

impl BgpPools {
    pub fn pool(&self, family: Family) -> IpNet {
        match family {
            Family::Ipv4 => IpNet::V4(self.ipv4),
            Family::Ipv6 => IpNet::V6(self.ipv6),
        }
    }

    /// Check that an address lies within its family's pool
    pub fn contains(&self, address: &IpAddr) -> bool {
        net::contains(&self.pool(Family::of_address(address)), address)
    }

    /// Number of low-order bits a peer's addresses must agree on:
    /// half of the host part of the family's pool, rounded down.
    pub fn match_bits(&self, family: Family) -> u32 {
        let prefix = self.pool(family).prefix_len();
        u32::from(family.bits() - prefix) / 2
    }

    /// Low `match_bits` bits of an address, used to compare a peer's
    /// addresses across families.
    pub fn host_suffix(&self, address: &IpAddr) -> u128 {
        let bits = self.match_bits(Family::of_address(address));
        let value = match address {
            IpAddr::V4(addr) => u128::from(u32::from(*addr)),
            IpAddr::V6(addr) => u128::from(*addr),
        };
        match bits {
            0 => 0,
            bits if bits >= 128 => value,
            _ => value & ((1u128 << bits) - 1),
        }
    }
}
