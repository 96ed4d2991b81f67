//! Classified diagnostics and run counters.
//!
//! Checks never abort: every problem becomes an [`Issue`] recorded in the
//! run's [`Report`] together with the community it concerns. The report
//! keeps one counter per severity; the run fails iff the error counter is
//! non-zero.

use ipnet::IpNet;
use serde::Serialize;
use std::fmt;
use std::net::IpAddr;

use crate::ip::FormatError;
use crate::registry::{DuplicateError, OverlapError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Everything a check can report
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Issue {
    #[error(transparent)]
    Duplicate(DuplicateError),

    #[error(transparent)]
    NetworkOverlap(OverlapError),

    #[error("malformed {field}: {error}")]
    Malformed { field: String, error: FormatError },

    #[error("BGP peer name '{peer}' must not contain '-'")]
    PeerNameHyphen { peer: String },

    #[error("BGP IP {address} of peer '{peer}' is in the wrong subnet (expected {pool})")]
    WrongSubnet {
        peer: String,
        address: IpAddr,
        pool: IpNet,
    },

    #[error("BGP peer '{peer}' addresses disagree on their host suffix: {}", join_suffixes(.suffixes))]
    SuffixMismatch { peer: String, suffixes: Vec<u128> },

    #[error("delegated network {network} (to AS{asn}) is not inside any network of this community")]
    UncontainedDelegation { asn: u32, network: IpNet },

    #[error("reverse DNS zone '{domain}' is not covered by this community's networks (allowed: {})", .allowed.join(", "))]
    InvalidRdns { domain: String, allowed: Vec<String> },

    #[error("domain '{domain}' is not a valid IDNA name: {reason}")]
    InvalidDomainEncoding { domain: String, reason: String },

    #[error("malformed record: {reason}")]
    MalformedRecord { reason: String },

    #[error("TLD list unavailable ({reason}), TLD checks skipped")]
    TldUnavailable { reason: String },
}

fn join_suffixes(suffixes: &[u128]) -> String {
    suffixes
        .iter()
        .map(|s| format!("{:#x}", s))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::SuffixMismatch { .. } | Issue::TldUnavailable { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// One recorded issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The community the issue concerns; `None` for run-wide issues
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
    pub issue: Issue,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.community {
            Some(community) => write!(f, "[{}] {}", community, self.issue),
            None => write!(f, "{}", self.issue),
        }
    }
}

/// Final outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub warnings: usize,
    pub errors: usize,
}

impl Verdict {
    /// Warnings never fail a run
    pub fn passed(&self) -> bool {
        self.errors == 0
    }
}

/// Accumulated diagnostics of a run
#[derive(Debug, Default, Clone, Serialize)]
pub struct Report {
    communities: usize,
    warnings: usize,
    errors: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue against a community and log it
    pub fn record(&mut self, community: Option<&str>, issue: Issue) {
        let diagnostic = Diagnostic {
            severity: issue.severity(),
            community: community.map(str::to_string),
            issue,
        };
        match diagnostic.severity {
            Severity::Warning => {
                self.warnings += 1;
                log::warn!("{}", diagnostic);
            }
            Severity::Error => {
                self.errors += 1;
                log::error!("{}", diagnostic);
            }
        }
        self.diagnostics.push(diagnostic);
    }

    /// Shorthand for an issue about one community
    pub fn push(&mut self, community: &str, issue: Issue) {
        self.record(Some(community), issue);
    }

    pub(crate) fn count_community(&mut self) {
        self.communities += 1;
    }

    pub fn communities(&self) -> usize {
        self.communities
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics concerning one community
    pub fn for_community<'a>(&'a self, community: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics
            .iter()
            .filter(move |d| d.community.as_deref() == Some(community))
    }

    pub fn verdict(&self) -> Verdict {
        Verdict {
            warnings: self.warnings,
            errors: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ClaimKind;

    #[test]
    fn test_counters_follow_severity() {
        let mut report = Report::new();
        report.push("alpha", Issue::PeerNameHyphen { peer: "a-b".to_string() });
        report.push(
            "alpha",
            Issue::SuffixMismatch {
                peer: "ab".to_string(),
                suffixes: vec![1, 2],
            },
        );
        report.record(None, Issue::TldUnavailable { reason: "offline".to_string() });

        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 2);
        assert_eq!(report.diagnostics().len(), 3);
        assert_eq!(report.for_community("alpha").count(), 2);
        assert!(!report.verdict().passed());
    }

    #[test]
    fn test_warnings_only_passes() {
        let mut report = Report::new();
        report.record(None, Issue::TldUnavailable { reason: "offline".to_string() });
        let verdict = report.verdict();
        assert_eq!(verdict, Verdict { warnings: 1, errors: 0 });
        assert!(verdict.passed());
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic {
            severity: Severity::Error,
            community: Some("beta".to_string()),
            issue: Issue::Duplicate(DuplicateError {
                kind: ClaimKind::Asn,
                value: "4242420001".to_string(),
                existing_owner: "alpha".to_string(),
                owner: "beta".to_string(),
            }),
        };
        assert_eq!(
            diagnostic.to_string(),
            "[beta] duplicate ASN 4242420001: claimed by beta, already owned by alpha"
        );

        let mismatch = Issue::SuffixMismatch {
            peer: "p".to_string(),
            suffixes: vec![0x2a, 0x2b],
        };
        assert!(mismatch.to_string().ends_with("0x2a, 0x2b"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut report = Report::new();
        report.push("alpha", Issue::PeerNameHyphen { peer: "a-b".to_string() });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["errors"], 1);
        assert_eq!(json["diagnostics"][0]["issue"]["type"], "peer_name_hyphen");
        assert_eq!(json["diagnostics"][0]["community"], "alpha");
    }
}
