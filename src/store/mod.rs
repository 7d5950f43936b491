use crate::config::Config;
use crate::core::input::StageDetectionInput;
use crate::core::report::StageDetectionResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

pub mod file;

pub type SubmissionId = Uuid;

/// A scored submission waiting to be persisted.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub user_id: String,
    pub input: StageDetectionInput,
    pub result: StageDetectionResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub input: StageDetectionInput,
    pub result: StageDetectionResult,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("submission not found: {0}")]
    NotFound(SubmissionId),

    #[error("invalid submission id: {0}")]
    InvalidId(String),

    #[error("invalid user id {0:?} (use letters, digits, '.', '_', '@' or '-')")]
    InvalidUser(String),

    #[error("store I/O failed at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt submission record at {}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn serialization(path: &Path, source: serde_json::Error) -> Self {
        Self::Serialization {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Persistence boundary for scored submissions. Implementations assign the
/// id and creation time on save.
pub trait SubmissionStore {
    fn name(&self) -> &'static str;
    fn save(&self, submission: NewSubmission) -> Result<SubmissionId, StoreError>;
    /// Newest first.
    fn list_by_user(&self, user_id: &str) -> Result<Vec<SubmissionRecord>, StoreError>;
    fn get_by_id(&self, id: SubmissionId) -> Result<SubmissionRecord, StoreError>;
}

pub fn parse_submission_id(raw: &str) -> Result<SubmissionId, StoreError> {
    Uuid::parse_str(raw.trim()).map_err(|_| StoreError::InvalidId(raw.to_string()))
}

pub fn open_store(cfg: &Config, cwd: &Path) -> Box<dyn SubmissionStore> {
    let data_dir = if cfg.store.data_dir.is_absolute() {
        cfg.store.data_dir.clone()
    } else {
        cwd.join(&cfg.store.data_dir)
    };

    Box::new(file::FileStore::new(data_dir))
}
