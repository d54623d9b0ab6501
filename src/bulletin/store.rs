//! Line-indexed access to the bulletin files.
//!
//! Queries never hold a file open: each one asks the [`BulletinStore`] for the current
//! content of the source it needs, as [`BulletinLines`], and reads records by index.
//!
//! Two stores are provided:
//! - [`LocalBulletinStore`] reads the files from a directory, usually the cache directory
//!   maintained by [`IersEnv`](crate::env_state::IersEnv).
//! - [`MemoryBulletinStore`] serves contents held in memory, for tests and for embedding
//!   bulletins in a binary.
use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};

use super::BulletinFile;
use crate::iers_errors::IersError;

/// Source of bulletin contents.
pub trait BulletinStore {
    /// Read the whole current content of a bulletin.
    ///
    /// Return
    /// ------
    /// * the lines of the file, or [`IersError::MissingBulletin`] if the store does not hold it
    fn open(&self, file: BulletinFile) -> Result<BulletinLines, IersError>;
}

impl<S: BulletinStore + ?Sized> BulletinStore for &S {
    fn open(&self, file: BulletinFile) -> Result<BulletinLines, IersError> {
        (**self).open(file)
    }
}

/// The lines of one bulletin file, without their line terminators.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulletinLines {
    lines: Vec<String>,
}

impl BulletinLines {
    /// Split a file content into lines, `\n` and `\r\n` terminated lines both accepted.
    pub fn from_content(content: &str) -> Self {
        BulletinLines {
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    /// Line at 0-based index `i`, `None` past the end of the file.
    pub fn line(&self, i: usize) -> Option<&str> {
        self.lines.get(i).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the last non-blank line, `None` when the file has no content.
    ///
    /// Bulletins are often published with trailing blank lines; these are not records.
    pub fn max_line(&self) -> Option<usize> {
        self.lines.iter().rposition(|l| !l.trim().is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// Bulletins stored as files in a directory, under their server file names.
#[derive(Debug, Clone)]
pub struct LocalBulletinStore {
    dir: Utf8PathBuf,
}

impl LocalBulletinStore {
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        LocalBulletinStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Path of a bulletin inside the store directory.
    pub fn path(&self, file: BulletinFile) -> Utf8PathBuf {
        self.dir.join(file.file_name())
    }
}

impl BulletinStore for LocalBulletinStore {
    fn open(&self, file: BulletinFile) -> Result<BulletinLines, IersError> {
        let path = self.path(file);
        if !path.exists() {
            return Err(IersError::MissingBulletin(path.to_string()));
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(BulletinLines::from_content(&content))
    }
}

/// Bulletins held in memory.
///
/// ```rust
/// use iers::bulletin::{store::{BulletinStore, MemoryBulletinStore}, BulletinFile};
///
/// let store = MemoryBulletinStore::new()
///     .with(BulletinFile::DeltaTData, " 1973  2  1  43.4724\n");
/// let lines = store.open(BulletinFile::DeltaTData).unwrap();
/// assert_eq!(lines.max_line(), Some(0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBulletinStore {
    files: HashMap<BulletinFile, String>,
}

impl MemoryBulletinStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the content of a bulletin.
    pub fn with(mut self, file: BulletinFile, content: impl Into<String>) -> Self {
        self.insert(file, content);
        self
    }

    pub fn insert(&mut self, file: BulletinFile, content: impl Into<String>) {
        self.files.insert(file, content.into());
    }
}

impl BulletinStore for MemoryBulletinStore {
    fn open(&self, file: BulletinFile) -> Result<BulletinLines, IersError> {
        self.files
            .get(&file)
            .map(|content| BulletinLines::from_content(content))
            .ok_or_else(|| IersError::MissingBulletin(file.file_name().to_string()))
    }
}
