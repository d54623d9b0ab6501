//! # IERS environment state
//!
//! This module defines [`IersEnv`], the object responsible for the **local copy of the bulletins**:
//!
//! - a persistent **HTTP client** ([`ureq::Agent`]) used to reach the IERS mirrors,
//! - the **storage directory** where the bulletins live, with its bookkeeping files.
//!
//! ## Storage layout
//!
//! ```text
//! <storage_dir>/
//! ├── finals.all, deltat.data, deltat.preds, historic_deltat.data, tai-utc.dat, readme, readme.finals
//! ├── .gitignore   ("*", keeps the directory out of version control)
//! ├── .updated     (unix time of the last update check)
//! └── .log         (one "<UTC date>\t<message>" line per downloaded file)
//! ```
//!
//! ## Update policy
//!
//! [`IersEnv::update`] does nothing while every file exists and the last check is more recent
//! than the configured interval. Otherwise it picks the first reachable mirror, compares the
//! remote size of each file with the local one and downloads those that differ. Mirrors are
//! tried once each; there is no retry.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use iers::{env_state::IersEnv, IersConfig, JulianDay};
//!
//! let env = IersEnv::new(IersConfig::new()?);
//! let updated = env.update()?;
//! println!("{} file(s) downloaded", updated.len());
//!
//! let eop = env.earth_orientation()?;
//! let dut1 = eop.dut1(JulianDay::now()?)?;
//! # Ok::<(), iers::IersError>(())
//! ```
use std::{fs, io::Write, time::Duration};

use camino::{Utf8Path, Utf8PathBuf};
use hifitime::Epoch;
use log::{info, warn};
use ureq::Agent;

use crate::{
    bulletin::{store::LocalBulletinStore, BulletinFile},
    config::IersConfig,
    constants::SECONDS_PER_HOUR,
    earth_orientation::EarthOrientation,
    iers_errors::IersError,
};

/// Timestamp of the last update check.
pub const UPDATED_FILE: &str = ".updated";
/// Activity log of the updater.
pub const LOG_FILE: &str = ".log";
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Upper bound on the size of a downloaded bulletin.
const MAX_BULLETIN_SIZE: u64 = 64 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct IersEnv {
    pub http_client: Agent,
    config: IersConfig,
}

impl IersEnv {
    /// Create the environment, with an HTTP client timing out after 10 seconds.
    ///
    /// Nothing is read or written on disk until a method needs the storage directory.
    pub fn new(config: IersConfig) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(10)))
            .build();
        let agent: Agent = agent_config.into();

        IersEnv {
            http_client: agent,
            config,
        }
    }

    pub fn config(&self) -> &IersConfig {
        &self.config
    }

    pub fn storage_dir(&self) -> &Utf8Path {
        self.config.storage_dir()
    }

    fn storage_path(&self, name: &str) -> Utf8PathBuf {
        self.storage_dir().join(name)
    }

    /// Create the storage directory if needed.
    ///
    /// A new directory is filled with the bulletins of [`IersConfig::seed_dir`] when one is
    /// configured. The `.gitignore` file is (re)written whenever it is missing.
    pub fn ensure_storage(&self) -> Result<(), IersError> {
        let dir = self.storage_dir();
        if !dir.exists() {
            fs::create_dir_all(dir)
                .map_err(|e| IersError::UnableToCreateStorageDir(format!("{dir}: {e}")))?;
            info!("Created IERS storage directory {dir}");

            if let Some(seed) = &self.config.seed_dir {
                self.seed_from(seed)?;
            }
        }

        let gitignore = self.storage_path(GITIGNORE_FILE);
        if !gitignore.exists() {
            fs::write(gitignore, "*")?;
        }
        Ok(())
    }

    fn seed_from(&self, seed: &Utf8Path) -> Result<(), IersError> {
        for file in BulletinFile::ALL {
            let src = seed.join(file.file_name());
            if src.exists() {
                fs::copy(&src, self.storage_path(file.file_name()))?;
            }
        }
        info!("Seeded IERS storage from {seed}");
        Ok(())
    }

    /// Whether every bulletin of [`BulletinFile::ALL`] is present locally.
    pub fn files_exist(&self) -> bool {
        BulletinFile::ALL
            .iter()
            .all(|file| self.storage_path(file.file_name()).exists())
    }

    /// Hours elapsed since the last update check.
    ///
    /// Return
    /// ------
    /// * the elapsed time read from `.updated`, or the update interval itself when the stamp
    ///   is missing or unreadable, which makes the next [`IersEnv::update`] check the mirrors
    pub fn hours_since_update(&self) -> Result<f64, IersError> {
        let path = self.storage_path(UPDATED_FILE);
        if !path.exists() {
            return Ok(self.config.update_interval_hours);
        }

        let stamp = fs::read_to_string(&path)?;
        match stamp.trim().parse::<f64>() {
            Ok(updated) => Ok((unix_now()? - updated) / SECONDS_PER_HOUR),
            Err(_) => {
                warn!("Ignoring unreadable update stamp {stamp:?} in {path}");
                Ok(self.config.update_interval_hours)
            }
        }
    }

    /// Whether [`IersEnv::update`] would contact a mirror.
    pub fn needs_update(&self) -> Result<bool, IersError> {
        Ok(!self.files_exist() || self.hours_since_update()? >= self.config.update_interval_hours)
    }

    /// Refresh the local bulletins from the IERS mirrors.
    ///
    /// Return
    /// ------
    /// * the files that were downloaded, empty when nothing was due or everything was up to date
    /// * [`IersError::NoServerAvailable`] when no mirror answers
    /// * an HTTP or I/O error interrupting a download
    pub fn update(&self) -> Result<Vec<BulletinFile>, IersError> {
        self.ensure_storage()?;
        if !self.needs_update()? {
            return Ok(Vec::new());
        }

        let server = self.select_server()?;
        let mut updated = Vec::new();
        for file in BulletinFile::ALL {
            let url = format!("{server}{}", file.file_name());
            let local = self.storage_path(file.file_name());
            let local_size = fs::metadata(&local).map(|m| m.len()).unwrap_or(0);

            if self.remote_size(&url)? == Some(local_size) {
                continue;
            }

            self.download(&url, &local)?;
            info!("Downloaded {url}");
            self.activity_log(&format!("Updated {file} from {url}"))?;
            updated.push(file);
        }

        self.set_updated_now()?;
        Ok(updated)
    }

    /// First mirror answering a `HEAD` request for a bulletin.
    fn select_server(&self) -> Result<&str, IersError> {
        let probe = BulletinFile::ALL[0].file_name();
        for server in &self.config.servers {
            let url = format!("{server}{probe}");
            match self.http_client.head(url.as_str()).call() {
                Ok(_) => return Ok(server.as_str()),
                Err(err) => warn!("IERS mirror {server} unavailable: {err}"),
            }
        }
        Err(IersError::NoServerAvailable)
    }

    /// `Content-Length` announced by the server, `None` when it does not send one.
    fn remote_size(&self, url: &str) -> Result<Option<u64>, IersError> {
        let response = self.http_client.head(url).call()?;
        Ok(response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok()))
    }

    /// Download `url` next to `path` then move it in place, so readers never see a partial file.
    fn download(&self, url: &str, path: &Utf8Path) -> Result<(), IersError> {
        let mut response = self.http_client.get(url).call()?;
        let bytes = response
            .body_mut()
            .with_config()
            .limit(MAX_BULLETIN_SIZE)
            .read_to_vec()?;

        let partial = Utf8PathBuf::from(format!("{path}.part"));
        fs::write(&partial, bytes)?;
        fs::rename(&partial, path)?;
        Ok(())
    }

    /// Record the current time as the last update check.
    pub fn set_updated_now(&self) -> Result<(), IersError> {
        let now = unix_now()?.floor() as i64;
        fs::write(self.storage_path(UPDATED_FILE), now.to_string())?;
        Ok(())
    }

    /// Append `"<UTC date>\t<msg>"` to the activity log.
    pub fn activity_log(&self, msg: &str) -> Result<(), IersError> {
        let mut log = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.storage_path(LOG_FILE))?;
        writeln!(log, "{}\t{msg}", Epoch::now()?)?;
        Ok(())
    }

    /// Store over the storage directory, created if needed.
    pub fn store(&self) -> Result<LocalBulletinStore, IersError> {
        self.ensure_storage()?;
        Ok(LocalBulletinStore::new(self.storage_dir()))
    }

    /// Query engine over the local bulletins.
    pub fn earth_orientation(&self) -> Result<EarthOrientation<LocalBulletinStore>, IersError> {
        Ok(EarthOrientation::new(self.store()?, &self.config))
    }
}

fn unix_now() -> Result<f64, IersError> {
    Ok(Epoch::now()?.to_unix_seconds())
}
