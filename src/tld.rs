//! Top-level domain table.
//!
//! The table maps an upper-cased domain suffix to the source it was read
//! from. It is loaded once before the run; when it cannot be loaded the run
//! continues with an empty table, which disables TLD lookups.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum TldError {
    #[error("no TLD list configured")]
    NotConfigured,

    #[error("failed to read TLD list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("TLD list {} has no entries", .path.display())]
    Empty { path: PathBuf },
}

#[derive(Debug, Clone, Default)]
pub struct TldTable {
    /// Upper-cased suffix -> source tag
    entries: HashMap<String, String>,
}

impl TldTable {
    /// Parse newline-separated suffixes; `#` starts a comment line
    pub fn parse(text: &str, tag: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| (line.trim_start_matches('.').to_uppercase(), tag.to_string()))
            .collect();
        TldTable { entries }
    }

    /// Read a TLD list file, tagging entries with the file name
    pub fn load(path: &Path) -> Result<Self, TldError> {
        let text = fs::read_to_string(path).map_err(|source| TldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tag = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let table = Self::parse(&text, &tag);
        if table.is_empty() {
            return Err(TldError::Empty {
                path: path.to_path_buf(),
            });
        }
        log::info!("Loaded {} TLDs from {:?}", table.len(), path);
        Ok(table)
    }

    /// Source tag of a domain's top-level label, if known
    pub fn lookup(&self, domain: &str) -> Option<&str> {
        let tld = domain.trim_end_matches('.').rsplit('.').next()?;
        self.entries.get(&tld.to_uppercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
