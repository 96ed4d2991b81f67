//! BGP peering address validation.
//!
//! Peering addresses are globally unique, must lie inside their family's
//! pool, and a dual-stack peer should encode the same host suffix in all
//! of its addresses. The suffix rule only produces a warning.

use crate::diagnostics::{Issue, Report};
use crate::ip::{BgpPools, Family};
use crate::registry::Registries;
use std::collections::{BTreeMap, BTreeSet};

pub fn check_bgp(
    community: &str,
    bgp: &BTreeMap<String, BTreeMap<Family, String>>,
    pools: &BgpPools,
    registries: &mut Registries,
    report: &mut Report,
) {
    for (peer, addresses) in bgp {
        if let Err(duplicate) = registries.peer_names.claim(peer.clone(), community) {
            report.push(community, Issue::Duplicate(duplicate));
        }

        // Peer names end up as identifiers in generated router configs
        if peer.contains('-') {
            report.push(community, Issue::PeerNameHyphen { peer: peer.clone() });
        }

        let mut suffixes = BTreeSet::new();
        for (family, literal) in addresses {
            let address = match family.parse_address(literal) {
                Ok(address) => address,
                Err(error) => {
                    report.push(
                        community,
                        Issue::Malformed {
                            field: format!("BGP address of peer '{}'", peer),
                            error,
                        },
                    );
                    continue;
                }
            };

            if let Err(duplicate) = registries.bgp_ips.claim(address, community) {
                report.push(community, Issue::Duplicate(duplicate));
            }

            if !pools.contains(&address) {
                report.push(
                    community,
                    Issue::WrongSubnet {
                        peer: peer.clone(),
                        address,
                        pool: pools.pool(*family),
                    },
                );
            }

            suffixes.insert(pools.host_suffix(&address));
        }

        if suffixes.len() > 1 {
            report.push(
                community,
                Issue::SuffixMismatch {
                    peer: peer.clone(),
                    suffixes: suffixes.into_iter().collect(),
                },
            );
        }
    }
}
