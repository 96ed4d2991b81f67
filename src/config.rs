//! Checker configuration.
//!
//! The only tunable is the pair of BGP peering pools. Both default to the
//! mesh-wide constants; a YAML file may override either one. The
//! configuration is fixed for the whole run once loaded.

use crate::ip::{BgpPools, Family};
use ipnet::IpNet;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerConfig {
    #[serde(default)]
    pub pools: BgpPools,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to open configuration {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{family} BGP pool {pool} has host bits set")]
    PoolHostBits { family: Family, pool: IpNet },
}

impl CheckerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for family in [Family::Ipv4, Family::Ipv6] {
            let pool = self.pools.pool(family);
            if pool.trunc() != pool {
                return Err(ConfigError::PoolHostBits { family, pool });
            }
        }
        Ok(())
    }
}

/// Load and validate a checker configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<CheckerConfig, ConfigError> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path).map_err(|source| ConfigError::Io {
        path: config_path.to_path_buf(),
        source,
    })?;

    let config: CheckerConfig = serde_yaml::from_reader(file).map_err(|source| ConfigError::Yaml {
        path: config_path.to_path_buf(),
        source,
    })?;

    config.validate()?;

    info!(
        "BGP pools: {} / {}",
        config.pools.ipv4, config.pools.ipv6
    );

    Ok(config)
}
