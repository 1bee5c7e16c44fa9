//! Centralized configuration for a SlateFS volume.
//!
//! Goals:
//! - Single place for tunables instead of scattering env lookups.
//! - VolumeConfig::from_env() reads the same env vars the tooling uses.
//! - Fluent setters for tests and embedders.

use std::fmt;

use crate::consts::{DEFAULT_MAX_RECORDS, MAX_RECORDS_LIMIT};
use crate::error::{FsError, Result};

/// Top-level configuration for a volume.
#[derive(Clone, Debug)]
pub struct VolumeConfig {
    /// Maximum number of records (N). The on-media index field is 7 bits
    /// wide and biased by one, so the hard ceiling is 126.
    /// Env: SLATE_MAX_RECORDS (default 32)
    pub max_records: u8,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

impl VolumeConfig {
    /// Load configuration from environment variables.
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("SLATE_MAX_RECORDS") {
            if let Ok(n) = v.trim().parse::<u8>() {
                cfg.max_records = n;
            }
        }

        cfg
    }

    pub fn with_max_records(mut self, n: u8) -> Self {
        self.max_records = n;
        self
    }

    /// Check the configuration before a volume is built around it.
    pub fn validate(&self) -> Result<()> {
        if self.max_records == 0 || self.max_records > MAX_RECORDS_LIMIT {
            return Err(FsError::Config(format!(
                "max_records must be in 1..={}, got {}",
                MAX_RECORDS_LIMIT, self.max_records
            )));
        }
        Ok(())
    }
}

impl fmt::Display for VolumeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VolumeConfig {{ max_records: {} }}", self.max_records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(VolumeConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_band() {
        assert!(VolumeConfig::default()
            .with_max_records(0)
            .validate()
            .is_err());
        assert!(VolumeConfig::default()
            .with_max_records(127)
            .validate()
            .is_err());
        assert!(VolumeConfig::default()
            .with_max_records(126)
            .validate()
            .is_ok());
    }
}
