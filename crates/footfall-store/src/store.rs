//! JSON-file storage for prediction records.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{PredictionFilter, PredictionRecord, RecordId};

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to determine the application data directory.
    #[error("Failed to determine application data directory")]
    NoDataDir,

    /// Failed to create a directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to delete a file.
    #[error("Failed to delete file '{path}': {source}")]
    DeleteFile {
        /// The path that could not be deleted.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read a directory.
    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse a record file.
    #[error("Failed to parse record file '{path}': {source}")]
    ParseJson {
        /// The path that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Failed to serialize a record.
    #[error("Failed to serialize record: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// Record not found.
    #[error("Prediction not found: {0}")]
    NotFound(RecordId),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistent log of predictions, one JSON file per record.
#[derive(Debug, Clone)]
pub struct PredictionStore {
    path: PathBuf,
}

impl PredictionStore {
    /// Opens a store rooted at `path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            fs::create_dir_all(&path).map_err(|e| StoreError::CreateDir {
                path: path.clone(),
                source: e,
            })?;
        }
        Ok(Self { path })
    }

    /// Returns the default location of the prediction log.
    ///
    /// Uses the `directories` crate to find the platform data directory:
    /// - Linux: `~/.local/share/footfall/predictions/`
    /// - macOS: `~/Library/Application Support/footfall/predictions/`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\footfall\predictions\`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoDataDir`] if no home directory can be found.
    pub fn default_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "footfall")
            .map(|dirs| dirs.data_dir().join("predictions"))
            .ok_or(StoreError::NoDataDir)
    }

    /// Opens the store at [`PredictionStore::default_path`].
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory is unknown or cannot be created.
    pub fn with_default_path() -> Result<Self> {
        Self::new(Self::default_path()?)
    }

    /// Returns the directory holding the record files.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file a record is stored in.
    #[must_use]
    pub fn record_path(&self, id: RecordId) -> PathBuf {
        self.path.join(format!("{id}.json"))
    }

    /// Writes a record, replacing any previous file with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    pub fn save(&self, record: &PredictionRecord) -> Result<()> {
        let path = self.record_path(record.id);
        let json = serde_json::to_string_pretty(record)?;

        fs::write(&path, json).map_err(|e| StoreError::WriteFile { path, source: e })?;
        debug!(id = %record.id, location = %record.location, "saved prediction");
        Ok(())
    }

    /// Loads a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such record exists, or an
    /// error if its file cannot be read or parsed.
    pub fn load(&self, id: RecordId) -> Result<PredictionRecord> {
        let path = self.record_path(id);

        if !path.exists() {
            return Err(StoreError::NotFound(id));
        }

        let content = fs::read_to_string(&path).map_err(|e| StoreError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| StoreError::ParseJson { path, source: e })
    }

    /// Lists records matching `filter`, newest first, up to the filter's limit.
    ///
    /// Files that cannot be read or parsed are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory itself cannot be read.
    pub fn list(&self, filter: &PredictionFilter) -> Result<Vec<PredictionRecord>> {
        let entries = fs::read_dir(&self.path).map_err(|e| StoreError::ReadDir {
            path: self.path.clone(),
            source: e,
        })?;

        let mut records = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| StoreError::ReadDir {
                path: self.path.clone(),
                source: e,
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }

            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable record file");
                    continue;
                }
            };

            match serde_json::from_str::<PredictionRecord>(&content) {
                Ok(record) if filter.matches(&record) => records.push(record),
                Ok(_) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "skipping corrupt record file"),
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        records.truncate(filter.limit_or_default());

        Ok(records)
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such record exists, or an
    /// error if its file cannot be removed.
    pub fn delete(&self, id: RecordId) -> Result<()> {
        let path = self.record_path(id);

        if !path.exists() {
            return Err(StoreError::NotFound(id));
        }

        fs::remove_file(&path).map_err(|e| StoreError::DeleteFile { path, source: e })
    }
}
