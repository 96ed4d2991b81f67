//! Duplicate-claim registries.
//!
//! Each registry maps a claimed value (ASN, peer name, peering address,
//! domain) to the community that claimed it first. A value can belong to
//! one community only; a second community claiming it is reported and the
//! original owner is kept.

use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// What kind of value a registry tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    Asn,
    BgpPeer,
    BgpIp,
    Domain,
}

impl fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClaimKind::Asn => "ASN",
            ClaimKind::BgpPeer => "BGP peer",
            ClaimKind::BgpIp => "BGP IP",
            ClaimKind::Domain => "Domain",
        };
        f.write_str(name)
    }
}

/// A value claimed by a second community
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[error("duplicate {kind} {value}: claimed by {owner}, already owned by {existing_owner}")]
pub struct DuplicateError {
    pub kind: ClaimKind,
    pub value: String,
    pub existing_owner: String,
    pub owner: String,
}

#[derive(Debug)]
pub struct ClaimRegistry<K> {
    kind: ClaimKind,
    /// Claimed value -> owning community
    owners: HashMap<K, String>,
}

impl<K> ClaimRegistry<K>
where
    K: Eq + Hash + fmt::Display,
{
    pub fn new(kind: ClaimKind) -> Self {
        ClaimRegistry {
            kind,
            owners: HashMap::new(),
        }
    }

    pub fn kind(&self) -> ClaimKind {
        self.kind
    }

    /// Record `value` as owned by `owner`.
    ///
    /// Claiming a value the same community already owns is a no-op.
    /// On conflict the existing mapping is left untouched.
    pub fn claim(&mut self, value: K, owner: &str) -> Result<(), DuplicateError> {
        match self.owners.entry(value) {
            Entry::Occupied(existing) => {
                if existing.get() == owner {
                    Ok(())
                } else {
                    Err(DuplicateError {
                        kind: self.kind,
                        value: existing.key().to_string(),
                        existing_owner: existing.get().clone(),
                        owner: owner.to_string(),
                    })
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(owner.to_string());
                Ok(())
            }
        }
    }

    /// Get the community that owns a value
    pub fn owner_of(&self, value: &K) -> Option<&str> {
        self.owners.get(value).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
