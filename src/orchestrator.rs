//! Validation orchestrator.
//!
//! This module drives a validation run: it folds the record stream over the
//! run's registries, applying every check to one record before moving on
//! to the next. Registries only ever grow, so a record is checked against
//! everything claimed by the records before it in the stream.

use crate::checks;
use crate::config::CheckerConfig;
use crate::diagnostics::{Issue, Report, Verdict};
use crate::record::Record;
use crate::registry::Registries;
use crate::tld::{TldError, TldTable};
use log::{debug, info};

#[derive(Debug)]
pub struct Validator {
    config: CheckerConfig,
    tlds: TldTable,
    registries: Registries,
    report: Report,
}

impl Validator {
    /// Start a run with empty registries and no TLD table
    pub fn new(config: CheckerConfig) -> Self {
        Validator {
            config,
            tlds: TldTable::default(),
            registries: Registries::new(),
            report: Report::new(),
        }
    }

    /// Install the TLD table; an unavailable table costs one warning
    pub fn with_tld_source(mut self, source: Result<TldTable, TldError>) -> Self {
        match source {
            Ok(tlds) => {
                info!("Using TLD table with {} entries", tlds.len());
                self.tlds = tlds;
            }
            Err(e) => {
                self.report.record(None, Issue::TldUnavailable { reason: e.to_string() });
                self.tlds = TldTable::default();
            }
        }
        self
    }

    /// Run every check against one community's record
    pub fn validate(&mut self, community: &str, record: &Record) {
        debug!("Validating community {}", community);
        self.report.count_community();

        let report = &mut self.report;
        let registries = &mut self.registries;

        if let Some(asn) = record.asn {
            if let Err(duplicate) = registries.asns.claim(asn, community) {
                report.push(community, Issue::Duplicate(duplicate));
            }
        }

        checks::check_bgp(community, &record.bgp, &self.config.pools, registries, report);

        checks::check_networks(community, &record.networks, &mut registries.networks, report);

        checks::check_domains(community, &record.domains, &self.tlds, &mut registries.domains, report);
        checks::check_rdns(community, &record.valid_networks(), &record.domains, report);

        checks::check_delegations(community, record, report);
    }

    /// Validate every record of a stream, in stream order
    pub fn run<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = (String, Record)>,
    {
        for (community, record) in records {
            self.validate(&community, &record);
        }
    }

    /// Record an issue found outside the checks (e.g. by the record source)
    pub fn record_issue(&mut self, community: Option<&str>, issue: Issue) {
        self.report.record(community, issue);
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn verdict(&self) -> Verdict {
        self.report.verdict()
    }

    /// End the run, discarding the registries
    pub fn finish(self) -> Report {
        let verdict = self.report.verdict();
        info!(
            "Checked {} communities: {} warning(s), {} error(s)",
            self.report.communities(),
            verdict.warnings,
            verdict.errors
        );
        self.report
    }
}
