use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::store::schema::UserProgress;

/// Fixed key the progress snapshot lives under.
pub const PROGRESS_KEY: &str = "lingo_progress";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("progress storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("progress snapshot is corrupted: {0}")]
    Parse(#[from] serde_json::Error),
}

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self, StoreError> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lingo");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }

    /// `Ok(None)` when nothing has been stored under `key` yet.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.file_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn save<T: Serialize>(&self, key: &str, data: &T) -> Result<(), StoreError> {
        let path = self.file_path(key);
        let tmp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load_progress(&self) -> Result<Option<UserProgress>, StoreError> {
        self.load(PROGRESS_KEY)
    }

    pub fn save_progress(&self, progress: &UserProgress) -> Result<(), StoreError> {
        self.save(PROGRESS_KEY, progress)
    }

    /// Move an unreadable snapshot out of the way so the next save doesn't
    /// silently destroy it. Returns the new location.
    pub fn quarantine_progress(&self) -> Result<PathBuf, StoreError> {
        let path = self.file_path(PROGRESS_KEY);
        let corrupt = path.with_extension("json.corrupt");
        fs::rename(&path, &corrupt)?;
        Ok(corrupt)
    }
}
