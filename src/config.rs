//! Runtime configuration of the bulletin engine and its updater.
//!
//! The storage directory defaults to `<cache dir>/iers_cache` (e.g. `~/.cache/iers_cache` on
//! Linux) and can be moved with the `IERS_DATA_DIR` environment variable or
//! [`IersConfig::with_storage_dir`].
use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use log::warn;

use crate::{
    constants::{DEFAULT_HALF_WIDTH, DEFAULT_UPDATE_INTERVAL_HOURS},
    iers_errors::IersError,
};

/// Environment variable overriding the default storage directory.
pub const IERS_DATA_DIR_ENV: &str = "IERS_DATA_DIR";

/// Name of the storage directory inside the user cache directory.
pub const CACHE_DIR_NAME: &str = "iers_cache";

/// IERS mirrors publishing the bulletins, tried in this order.
pub const DEFAULT_SERVERS: [&str; 3] = [
    "https://maia.usno.navy.mil/ser7/",
    "https://toshi.nofs.navy.mil/ser7/",
    "https://cddis.nasa.gov/archive/products/iers/",
];

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IersConfig {
    /// Directory holding the local copy of the bulletins
    pub storage_dir: Utf8PathBuf,
    /// Base URLs of the mirrors, each ending with `/`
    pub servers: Vec<String>,
    /// Minimum time between two refreshes of the local files, in hours
    pub update_interval_hours: f64,
    /// Number of records taken on each side of a query
    pub half_width: usize,
    /// Directory of bulletins copied into a freshly created storage directory
    pub seed_dir: Option<Utf8PathBuf>,
}

impl IersConfig {
    /// Configuration with the default storage directory.
    ///
    /// Return
    /// ------
    /// * the configuration, or an error when no storage directory can be derived
    ///   (no `IERS_DATA_DIR` and no user cache directory)
    pub fn new() -> Result<Self, IersError> {
        Ok(Self::with_dir(default_storage_dir()?))
    }

    fn with_dir(storage_dir: Utf8PathBuf) -> Self {
        IersConfig {
            storage_dir,
            servers: DEFAULT_SERVERS.iter().map(|s| s.to_string()).collect(),
            update_interval_hours: DEFAULT_UPDATE_INTERVAL_HOURS,
            half_width: DEFAULT_HALF_WIDTH,
            seed_dir: None,
        }
    }

    pub fn with_storage_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    pub fn with_servers<I, T>(mut self, servers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.servers = servers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_update_interval_hours(mut self, hours: f64) -> Self {
        self.update_interval_hours = hours;
        self
    }

    pub fn with_half_width(mut self, half_width: usize) -> Self {
        self.half_width = half_width;
        self
    }

    pub fn with_seed_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.seed_dir = Some(dir.into());
        self
    }

    pub fn storage_dir(&self) -> &Utf8Path {
        &self.storage_dir
    }
}

impl Default for IersConfig {
    /// Same as [`IersConfig::new`], falling back to `./iers_cache` when no cache directory exists.
    fn default() -> Self {
        match default_storage_dir() {
            Ok(dir) => Self::with_dir(dir),
            Err(err) => {
                warn!("{err}, using ./{CACHE_DIR_NAME}");
                Self::with_dir(Utf8PathBuf::from(CACHE_DIR_NAME))
            }
        }
    }
}

/// Storage directory from `IERS_DATA_DIR`, or `<user cache dir>/iers_cache`.
pub fn default_storage_dir() -> Result<Utf8PathBuf, IersError> {
    if let Ok(dir) = std::env::var(IERS_DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(Utf8PathBuf::from(dir));
        }
    }

    let base_dirs = BaseDirs::new().ok_or_else(|| {
        IersError::UnableToCreateStorageDir("cannot find the user cache directory".into())
    })?;
    let cache_path = Utf8Path::from_path(base_dirs.cache_dir()).ok_or_else(|| {
        IersError::Utf8PathError(format!(
            "cache directory {} is not valid UTF-8",
            base_dirs.cache_dir().display()
        ))
    })?;
    Ok(cache_path.join(CACHE_DIR_NAME))
}
