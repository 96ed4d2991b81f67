//! # Global Registry Module
//!
//! This module holds the state a validation run accumulates while records
//! stream through: who claimed which value, and which networks are already
//! allocated.
//!
//! ## Registry Types
//!
//! **Claim registries** (`claims.rs`):
//! - ASN -> community
//! - BGP peer name -> community
//! - BGP peering address -> community
//! - Upper-cased domain -> community
//!
//! **Allocated networks** (`networks.rs`):
//! - One set per address family
//! - No two entries of the same family may overlap
//!
//! ## Lifecycle
//!
//! All registries start empty, are filled record by record in stream
//! order, and are dropped at the end of the run. A check only ever sees
//! claims made by records earlier in the stream, so which community is
//! reported as the existing owner depends on stream order.

pub mod claims;
pub mod networks;

pub use claims::{ClaimKind, ClaimRegistry, DuplicateError};
pub use networks::{AllocatedNetworks, OverlapError};

use std::net::IpAddr;

/// Every registry a validation run writes to
#[derive(Debug)]
pub struct Registries {
    pub asns: ClaimRegistry<u32>,
    pub peer_names: ClaimRegistry<String>,
    pub bgp_ips: ClaimRegistry<IpAddr>,
    pub domains: ClaimRegistry<String>,
    pub networks: AllocatedNetworks,
}

impl Registries {
    pub fn new() -> Self {
        Registries {
            asns: ClaimRegistry::new(ClaimKind::Asn),
            peer_names: ClaimRegistry::new(ClaimKind::BgpPeer),
            bgp_ips: ClaimRegistry::new(ClaimKind::BgpIp),
            domains: ClaimRegistry::new(ClaimKind::Domain),
            networks: AllocatedNetworks::new(),
        }
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::new()
    }
}
