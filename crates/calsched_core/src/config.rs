//! Runtime configuration for the scheduler core.
//!
//! # Responsibility
//! - Resolve where the snapshot, quote seed and log files live.
//! - Read overrides from the environment.
//!
//! # Invariants
//! - All resolved paths are absolute, as required by `init_logging`.
//! - Blank environment values are ignored.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

pub const SNAPSHOT_FILE_NAME: &str = "calsched_snapshot.json";
pub const QUOTE_SEED_FILE_NAME: &str = "quotes.txt";
pub const LOG_DIR_NAME: &str = "logs";

pub const DATA_DIR_ENV: &str = "CALSCHED_DATA_DIR";
pub const QUOTES_ENV: &str = "CALSCHED_QUOTES";
pub const LOG_LEVEL_ENV: &str = "CALSCHED_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub data_dir: PathBuf,
    pub snapshot_path: PathBuf,
    pub quote_seed_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl SchedulerConfig {
    /// Default layout rooted at `data_dir`.
    pub fn for_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = absolutize(data_dir.as_ref());
        Self {
            snapshot_path: data_dir.join(SNAPSHOT_FILE_NAME),
            quote_seed_path: data_dir.join(QUOTE_SEED_FILE_NAME),
            log_dir: data_dir.join(LOG_DIR_NAME),
            log_level: default_log_level().to_string(),
            data_dir,
        }
    }

    /// Configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary key lookup.
    ///
    /// The data directory falls back to the current directory.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let data_dir = non_blank(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut config = Self::for_data_dir(data_dir);

        if let Some(quotes) = non_blank(QUOTES_ENV) {
            config.quote_seed_path = absolutize(Path::new(&quotes));
        }
        if let Some(level) = non_blank(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        config
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::{SchedulerConfig, DATA_DIR_ENV, LOG_LEVEL_ENV, QUOTES_ENV};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn data_dir_drives_default_layout() {
        let dir = std::env::temp_dir().join("calsched-config");
        let config = SchedulerConfig::from_lookup(lookup_from(&[(
            DATA_DIR_ENV,
            dir.to_str().unwrap(),
        )]));
        assert_eq!(config.snapshot_path, dir.join("calsched_snapshot.json"));
        assert_eq!(config.quote_seed_path, dir.join("quotes.txt"));
        assert_eq!(config.log_dir, dir.join("logs"));
    }

    #[test]
    fn overrides_are_trimmed_and_blank_values_ignored() {
        let quotes = std::env::temp_dir().join("seed.txt");
        let config = SchedulerConfig::from_lookup(lookup_from(&[
            (DATA_DIR_ENV, "   "),
            (QUOTES_ENV, quotes.to_str().unwrap()),
            (LOG_LEVEL_ENV, " warn "),
        ]));
        assert!(config.data_dir.is_absolute());
        assert_eq!(config.quote_seed_path, quotes);
        assert_eq!(config.log_level, "warn");
    }
}
