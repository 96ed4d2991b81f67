//! IP address and network utilities.
//!
//! This module handles family-aware parsing of address and CIDR literals,
//! the overlap/containment predicates used by the registry checks, and the
//! fixed BGP peering pools.

pub mod family;
pub mod net;
pub mod pools;

// Re-export commonly used types
pub use family::{parse_any_network, Family, FormatError};
pub use net::{contains, is_exact_ancestor, overlaps, NetworkOps};
pub use pools::{BgpPools, DEFAULT_IPV4_POOL, DEFAULT_IPV6_POOL};
