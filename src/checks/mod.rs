//! Per-record consistency checks.
//!
//! Each check reads one part of a community's record, consults or extends
//! the run's registries, and records any problems in the run's report. None
//! of them stops on the first problem.

pub mod bgp;
pub mod delegation;
pub mod domains;
pub mod networks;
pub mod rdns;

pub use bgp::check_bgp;
pub use delegation::{check_delegation, check_delegations};
pub use domains::{check_domains, check_idna};
pub use networks::check_networks;
pub use rdns::{allowed_zones, check_rdns, reverse_zone};
