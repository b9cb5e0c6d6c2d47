//! Configuration of an [`crate::EnrichmentContext`]
use std::path::{Path, PathBuf};

use crate::{PathwayError, PathwayResult};

/// Environment variable with the size of the gene universe
pub const ENV_UNIVERSE_SIZE: &str = "PATHWAY_UNIVERSE_SIZE";
/// Environment variable with the folder of the pathway data
pub const ENV_DATA_DIR: &str = "PATHWAY_DATA_DIR";

/// Deployment specific settings
///
/// The size of the gene universe depends on the gene annotation that
/// was used to build the pathway datasets and differs between deployments.
/// It must always be provided explicitly.
///
/// # Examples
///
/// ```
/// use pathway::Config;
///
/// let config = Config::new(42_577).with_data_dir("tests/data");
/// assert_eq!(config.universe_size(), 42_577);
/// assert!(config.data_dir().is_some());
///
/// let config = Config::from_lookup(|key| match key {
///     "PATHWAY_UNIVERSE_SIZE" => Some("45956".to_string()),
///     _ => None,
/// }).unwrap();
/// assert_eq!(config.universe_size(), 45_956);
/// assert!(config.data_dir().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    universe_size: u64,
    data_dir: Option<PathBuf>,
}

impl Config {
    /// Constructs a new [`Config`] with the given universe size
    pub fn new(universe_size: u64) -> Self {
        Self {
            universe_size,
            data_dir: None,
        }
    }

    /// Sets the folder that contains the pathway data
    ///
    /// See [`crate::MemoryStore::from_folder`] for the expected layout
    #[must_use]
    pub fn with_data_dir<P: Into<PathBuf>>(mut self, data_dir: P) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Reads the configuration from environment variables
    ///
    /// - `PATHWAY_UNIVERSE_SIZE` (required): size of the gene universe
    /// - `PATHWAY_DATA_DIR` (optional): folder of the pathway data
    ///
    /// # Errors
    ///
    /// See [`Config::from_lookup`]
    pub fn from_env() -> PathwayResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration from a key-value lookup
    ///
    /// # Errors
    ///
    /// - [`PathwayError::InvalidInput`]: The universe size is missing or `0`
    /// - [`PathwayError::ParseIntError`]: The universe size is not a positive integer
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> PathwayResult<Self> {
        let Some(raw) = lookup(ENV_UNIVERSE_SIZE) else {
            return Err(PathwayError::InvalidInput(format!(
                "{ENV_UNIVERSE_SIZE} is not set"
            )));
        };
        let universe_size = raw.trim().parse::<u64>()?;
        if universe_size == 0 {
            return Err(PathwayError::InvalidInput(format!(
                "{ENV_UNIVERSE_SIZE} must be positive"
            )));
        }

        let mut config = Config::new(universe_size);
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|dir| !dir.trim().is_empty()) {
            config = config.with_data_dir(dir);
        }
        Ok(config)
    }

    /// The size `N` of the gene universe
    pub fn universe_size(&self) -> u64 {
        self.universe_size
    }

    /// The folder of the pathway data, if configured
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }
}
