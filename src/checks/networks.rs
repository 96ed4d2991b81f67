//! Network overlap check.

use crate::diagnostics::{Issue, Report};
use crate::ip::Family;
use crate::registry::AllocatedNetworks;
use std::collections::BTreeMap;

/// Validate a community's declared networks and allocate the ones that
/// parse and do not overlap anything allocated before.
pub fn check_networks(
    community: &str,
    networks: &BTreeMap<Family, Vec<String>>,
    allocated: &mut AllocatedNetworks,
    report: &mut Report,
) {
    for (family, literals) in networks {
        for literal in literals {
            let network = match family.parse_network(literal) {
                Ok(network) => network,
                Err(error) => {
                    report.push(
                        community,
                        Issue::Malformed {
                            field: format!("{} network", family),
                            error,
                        },
                    );
                    continue;
                }
            };

            match allocated.insert(network, community) {
                Ok(()) => log::debug!("[{}] allocated {}", community, network),
                Err(overlap) => report.push(community, Issue::NetworkOverlap(overlap)),
            }
        }
    }
}
