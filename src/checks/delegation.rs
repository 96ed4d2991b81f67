//! Delegation containment check.
//!
//! A delegated network must sit exactly inside one of the delegating
//! community's own networks of the same family.
//!
//! The ASN a range is delegated to is carried along for reporting only. It
//! is not looked up in the ASN registry: during a single forward pass that
//! registry only knows the communities seen so far, so the lookup would
//! depend on stream order.

use crate::diagnostics::{Issue, Report};
use crate::ip::{self, Family};
use crate::record::Record;

/// Check every delegated network of a record
pub fn check_delegations(community: &str, record: &Record, report: &mut Report) {
    for (asn, literals) in &record.delegate {
        for literal in literals {
            check_delegation(community, record, literal, *asn, report);
        }
    }
}

/// Check one delegated network against the delegator's own networks.
///
/// Returns true if a containing parent was found.
pub fn check_delegation(
    community: &str,
    delegator: &Record,
    delegated: &str,
    asn: u32,
    report: &mut Report,
) -> bool {
    let delegated = match ip::parse_any_network(delegated) {
        Ok(network) => network,
        Err(error) => {
            report.push(
                community,
                Issue::Malformed {
                    field: format!("network delegated to AS{}", asn),
                    error,
                },
            );
            return false;
        }
    };
    let family = Family::of_network(&delegated);

    for (candidate_family, literal) in delegator.network_literals() {
        if candidate_family != family {
            continue;
        }
        let candidate = match candidate_family.parse_network(literal) {
            Ok(candidate) => candidate,
            Err(error) => {
                report.push(
                    community,
                    Issue::Malformed {
                        field: format!("{} network", candidate_family),
                        error,
                    },
                );
                continue;
            }
        };

        // A delegated range cannot be coarser than its parent
        if delegated.prefix_len() < candidate.prefix_len() {
            continue;
        }
        if ip::is_exact_ancestor(&candidate, &delegated) {
            log::debug!("[{}] {} delegated to AS{} inside {}", community, delegated, asn, candidate);
            return true;
        }
    }

    report.push(community, Issue::UncontainedDelegation { asn, network: delegated });
    false
}
