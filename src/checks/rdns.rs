//! Reverse-DNS zone derivation and matching.
//!
//! A community may only announce reverse zones it has full authority over.
//! The zone of a network covers whole nibbles (IPv6) or whole octets
//! (IPv4) of its prefix; a prefix that ends mid-nibble or mid-octet is
//! rounded down, so the derived zone is never broader than the network.

use crate::diagnostics::{Issue, Report};
use ipnet::IpNet;

pub const IP6_ARPA: &str = "ip6.arpa";
pub const IN_ADDR_ARPA: &str = "in-addr.arpa";

/// Reverse zone a network has full authority over
pub fn reverse_zone(network: &IpNet) -> String {
    let labels: Vec<String> = match network {
        IpNet::V6(net) => {
            let nibbles = usize::from(net.prefix_len() / 4);
            format!("{:032x}", u128::from(net.network()))
                .chars()
                .take(nibbles)
                .map(String::from)
                .collect()
        }
        IpNet::V4(net) => {
            let octets = usize::from(net.prefix_len() / 8);
            net.network()
                .octets()
                .iter()
                .take(octets)
                .map(u8::to_string)
                .collect()
        }
    };

    let suffix = match network {
        IpNet::V6(_) => IP6_ARPA,
        IpNet::V4(_) => IN_ADDR_ARPA,
    };

    let mut zone: Vec<&str> = labels.iter().rev().map(String::as_str).collect();
    zone.push(suffix);
    zone.join(".")
}

/// Reverse zones of all given networks, in order
pub fn allowed_zones<'a>(networks: impl IntoIterator<Item = &'a IpNet>) -> Vec<String> {
    networks.into_iter().map(reverse_zone).collect()
}

fn normalize(domain: &str) -> String {
    domain.trim_end_matches('.').to_ascii_lowercase()
}

/// Whether a domain names a reverse-DNS zone
pub fn is_reverse_domain(domain: &str) -> bool {
    let domain = normalize(domain);
    domain.ends_with(&format!(".{}", IP6_ARPA)) || domain.ends_with(&format!(".{}", IN_ADDR_ARPA))
}

/// Whether `domain` is `zone` itself or a zone below it
pub fn zone_covers(zone: &str, domain: &str) -> bool {
    let zone = normalize(zone);
    let domain = normalize(domain);
    domain == zone || domain.ends_with(&format!(".{}", zone))
}

/// Check announced reverse zones against the community's own networks
pub fn check_rdns(community: &str, networks: &[IpNet], domains: &[String], report: &mut Report) {
    let allowed = allowed_zones(networks);

    for domain in domains.iter().filter(|d| is_reverse_domain(d)) {
        if allowed.iter().any(|zone| zone_covers(zone, domain)) {
            continue;
        }
        report.push(
            community,
            Issue::InvalidRdns {
                domain: domain.clone(),
                allowed: allowed.clone(),
            },
        );
    }
}
