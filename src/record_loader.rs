//! Directory record source.
//!
//! Community descriptors are YAML files (`*.yaml` / `*.yml`) in a single
//! directory, one file per community, named after it. Files are parsed
//! lazily in file-name order; a file that cannot be read or parsed is
//! handed to the caller's error callback and skipped.

use crate::record::Record;
use log::{debug, info};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read record directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Community identity of a descriptor file: its file stem
pub fn community_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_descriptor(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map_or(false, |ext| ext == "yaml" || ext == "yml")
}

/// Load and parse one descriptor file
pub fn load_record(path: &Path) -> Result<Record, LoadError> {
    debug!("Loading record from: {:?}", path);

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_reader(file).map_err(|source| LoadError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Lazy stream of `(community, record)` pairs from a directory
pub struct RecordSource<F> {
    paths: std::vec::IntoIter<PathBuf>,
    on_error: F,
}

impl<F> RecordSource<F>
where
    F: FnMut(&Path, LoadError),
{
    /// List the descriptor files of `dir`; nothing is parsed yet
    pub fn open(dir: &Path, on_error: F) -> Result<Self, LoadError> {
        let entries = fs::read_dir(dir).map_err(|source| LoadError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| LoadError::Directory {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if is_descriptor(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        info!("Found {} community descriptor(s) in {:?}", paths.len(), dir);

        Ok(RecordSource {
            paths: paths.into_iter(),
            on_error,
        })
    }
}

impl<F> Iterator for RecordSource<F>
where
    F: FnMut(&Path, LoadError),
{
    type Item = (String, Record);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let path = self.paths.next()?;
            match load_record(&path) {
                Ok(record) => return Some((community_name(&path), record)),
                Err(e) => (self.on_error)(&path, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_records_in_file_name_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("beta.yaml"), "asn: 2\n").unwrap();
        fs::write(dir.path().join("alpha.yml"), "asn: 1\n").unwrap();
        fs::write(dir.path().join("README.md"), "not a record").unwrap();

        let source = RecordSource::open(dir.path(), |path: &Path, e: LoadError| {
            panic!("unexpected error for {:?}: {}", path, e)
        })
        .unwrap();
        let records: Vec<_> = source.collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, "alpha");
        assert_eq!(records[0].1.asn, Some(1));
        assert_eq!(records[1].0, "beta");
    }

    #[test]
    fn test_malformed_record_goes_to_callback() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("alpha.yaml"), "asn: 1\n").unwrap();
        fs::write(dir.path().join("broken.yaml"), "asn: [not, a, number\n").unwrap();
        fs::write(dir.path().join("gamma.yaml"), "asn: 3\n").unwrap();

        let mut failures = Vec::new();
        let names: Vec<String> = RecordSource::open(dir.path(), |path: &Path, e: LoadError| {
            assert!(matches!(e, LoadError::Yaml { .. }));
            failures.push(community_name(path));
        })
        .unwrap()
        .map(|(name, _)| name)
        .collect();

        assert_eq!(names, vec!["alpha".to_string(), "gamma".to_string()]);
        assert_eq!(failures, vec!["broken".to_string()]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let result = RecordSource::open(&missing, |_: &Path, _: LoadError| {});
        assert!(matches!(result, Err(LoadError::Directory { .. })));
    }
}
