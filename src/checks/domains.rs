//! Domain uniqueness and IDNA encoding.

use crate::diagnostics::{Issue, Report};
use crate::registry::ClaimRegistry;
use crate::tld::TldTable;

/// Check that a domain is pure ASCII and decodes as an internationalized
/// domain name. Returns the decoded (Unicode) form.
pub fn check_idna(domain: &str) -> Result<String, String> {
    if !domain.is_ascii() {
        return Err("contains non-ASCII characters; use its punycode form".to_string());
    }
    let (decoded, result) = idna::domain_to_unicode(domain);
    result.map(|_| decoded).map_err(|e| e.to_string())
}

pub fn check_domains(
    community: &str,
    domains: &[String],
    tlds: &TldTable,
    registry: &mut ClaimRegistry<String>,
    report: &mut Report,
) {
    for domain in domains {
        if let Err(duplicate) = registry.claim(domain.to_uppercase(), community) {
            report.push(community, Issue::Duplicate(duplicate));
        }

        if let Err(reason) = check_idna(domain) {
            report.push(
                community,
                Issue::InvalidDomainEncoding {
                    domain: domain.clone(),
                    reason,
                },
            );
        }

        // Informational only
        if !tlds.is_empty() {
            match tlds.lookup(domain) {
                Some(source) => log::debug!("[{}] {} has a TLD listed in {}", community, domain, source),
                None => log::info!("[{}] {} does not use a known TLD", community, domain),
            }
        }
    }
}
