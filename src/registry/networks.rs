//! Allocated-network set.
//!
//! One list per address family of every network accepted so far. Networks
//! are not kept sorted, so a new network is compared against every prior
//! entry of its family.

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use serde::Serialize;

use crate::ip::{Family, NetworkOps};

/// A network that intersects an already allocated one
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[error("network {network} of {owner} overlaps {existing} owned by {existing_owner}")]
pub struct OverlapError {
    pub network: IpNet,
    pub owner: String,
    pub existing: IpNet,
    pub existing_owner: String,
}

#[derive(Debug, Default)]
pub struct AllocatedNetworks {
    ipv4: Vec<(Ipv4Net, String)>,
    ipv6: Vec<(Ipv6Net, String)>,
}

impl AllocatedNetworks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a network unless it overlaps an existing entry of its family.
    ///
    /// On overlap nothing is inserted.
    pub fn insert(&mut self, network: IpNet, owner: &str) -> Result<(), OverlapError> {
        match network {
            IpNet::V4(net) => insert_into(&mut self.ipv4, net, owner),
            IpNet::V6(net) => insert_into(&mut self.ipv6, net, owner),
        }
    }

    /// Get the owner of an exact allocated network
    pub fn owner_of(&self, network: &IpNet) -> Option<&str> {
        match network {
            IpNet::V4(net) => find_owner(&self.ipv4, net),
            IpNet::V6(net) => find_owner(&self.ipv6, net),
        }
    }

    pub fn len(&self, family: Family) -> usize {
        match family {
            Family::Ipv4 => self.ipv4.len(),
            Family::Ipv6 => self.ipv6.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ipv4.is_empty() && self.ipv6.is_empty()
    }
}

fn insert_into<N: NetworkOps>(
    entries: &mut Vec<(N, String)>,
    network: N,
    owner: &str,
) -> Result<(), OverlapError> {
    if let Some((existing, existing_owner)) = entries.iter().find(|(n, _)| n.overlaps_with(&network)) {
        return Err(OverlapError {
            network: network.into(),
            owner: owner.to_string(),
            existing: (*existing).into(),
            existing_owner: existing_owner.clone(),
        });
    }
    entries.push((network, owner.to_string()));
    Ok(())
}

fn find_owner<'a, N: NetworkOps>(entries: &'a [(N, String)], network: &N) -> Option<&'a str> {
    entries
        .iter()
        .find(|(n, _)| n == network)
        .map(|(_, owner)| owner.as_str())
}
