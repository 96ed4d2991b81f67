//! # Meshcheck - Global consistency checks for community mesh registries
//!
//! Every community (autonomous participant) of the mesh describes its own
//! resources in a descriptor file: its ASN, BGP peering addresses, IP
//! allocations, domains and delegations. Each file can be valid on its own
//! while the registry as a whole is not. This library runs the checks that
//! need all records at once.
//!
//! ## Checks
//!
//! - **Uniqueness**: no two communities claim the same ASN, BGP peer name,
//!   BGP peering address or domain
//! - **Allocations**: no two networks of the same family overlap
//! - **BGP**: peering addresses lie in the fixed peering pools, and a
//!   dual-stack peer uses the same host suffix in all its addresses
//! - **Delegations**: a delegated range lies exactly inside one of the
//!   delegating community's own networks
//! - **Reverse DNS**: announced `in-addr.arpa` / `ip6.arpa` zones are
//!   covered by the community's own networks
//! - **Domains**: announced domains are ASCII and valid IDNA
//!
//! ## Architecture
//!
//! - `ip`: family-aware parsing, overlap/containment predicates, BGP pools
//! - `registry`: duplicate-claim registries and the allocated-network set
//! - `checks`: one module per check
//! - `diagnostics`: classified issues, report and verdict
//! - `record` / `record_loader`: descriptor model and directory source
//! - `tld`: top-level domain table
//! - `config`: checker configuration
//! - `orchestrator`: the validation run
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use meshcheck::config::CheckerConfig;
//! use meshcheck::orchestrator::Validator;
//! use meshcheck::record_loader::{LoadError, RecordSource};
//! use meshcheck::tld::TldTable;
//! use std::path::Path;
//!
//! let mut validator = Validator::new(CheckerConfig::default())
//!     .with_tld_source(TldTable::load(Path::new("tlds-alpha-by-domain.txt")));
//!
//! let records = RecordSource::open(Path::new("communities"), |path: &Path, e: LoadError| {
//!     eprintln!("skipping {:?}: {}", path, e);
//! })?;
//! validator.run(records);
//!
//! let report = validator.finish();
//! assert!(report.verdict().passed());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Checks never abort a run. Each problem is recorded as a classified
//! diagnostic naming the community concerned; the run fails iff at least
//! one diagnostic is an error. Setup failures (unreadable directory or
//! configuration) are returned as typed `thiserror` errors.

pub mod checks;
pub mod config;
pub mod diagnostics;
pub mod ip;
pub mod orchestrator;
pub mod record;
pub mod record_loader;
pub mod registry;
pub mod tld;
