use crate::store::{NewSubmission, StoreError, SubmissionId, SubmissionRecord, SubmissionStore};
use crate::utils::fs::{is_json_file, write_atomic};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;
use walkdir::WalkDir;

static USER_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._@-]{1,128}$").expect("valid user id regex"));

/// Stores each submission as `<data_dir>/<user_id>/<id>.json`.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn user_dir(&self, user_id: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_user_id(user_id) {
            return Err(StoreError::InvalidUser(user_id.to_string()));
        }
        Ok(self.data_dir.join(user_id))
    }

    fn find_record_path(&self, id: SubmissionId) -> Option<PathBuf> {
        let file_name = format!("{}.json", id);
        WalkDir::new(&self.data_dir)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(Result::ok)
            .find(|entry| {
                entry.file_type().is_file() && entry.file_name() == file_name.as_str()
            })
            .map(|entry| entry.into_path())
    }
}

pub fn is_valid_user_id(user_id: &str) -> bool {
    USER_ID_RE.is_match(user_id) && user_id != "." && user_id != ".."
}

fn read_record(path: &Path) -> Result<SubmissionRecord, StoreError> {
    let content = fs::read_to_string(path).map_err(|err| StoreError::io(path, err))?;
    serde_json::from_str(&content).map_err(|err| StoreError::serialization(path, err))
}

impl SubmissionStore for FileStore {
    fn name(&self) -> &'static str {
        "file"
    }

    fn save(&self, submission: NewSubmission) -> Result<SubmissionId, StoreError> {
        let user_dir = self.user_dir(&submission.user_id)?;
        fs::create_dir_all(&user_dir).map_err(|err| StoreError::io(&user_dir, err))?;

        let record = SubmissionRecord {
            id: Uuid::new_v4(),
            user_id: submission.user_id,
            created_at: Utc::now(),
            input: submission.input,
            result: submission.result,
        };

        let path = user_dir.join(format!("{}.json", record.id));
        let content = serde_json::to_string_pretty(&record)
            .map_err(|err| StoreError::serialization(&path, err))?;
        write_atomic(&path, content.as_bytes()).map_err(|err| StoreError::io(&path, err))?;

        debug!(id = %record.id, user = %record.user_id, path = %path.display(), "saved submission");
        Ok(record.id)
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<SubmissionRecord>, StoreError> {
        let user_dir = self.user_dir(user_id)?;
        let entries = match fs::read_dir(&user_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io(&user_dir, err)),
        };

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| StoreError::io(&user_dir, err))?;
            let path = entry.path();
            if !path.is_file() || !is_json_file(&path) {
                continue;
            }

            match read_record(&path) {
                Ok(record) if record.user_id == user_id => records.push(record),
                Ok(record) => warn!(
                    path = %path.display(),
                    owner = %record.user_id,
                    "skipping submission filed under the wrong user"
                ),
                Err(err) => warn!(
                    path = %path.display(),
                    error = %err,
                    "skipping unreadable submission"
                ),
            }
        }

        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        debug!(user = %user_id, count = records.len(), "listed submissions");
        Ok(records)
    }

    fn get_by_id(&self, id: SubmissionId) -> Result<SubmissionRecord, StoreError> {
        let path = self.find_record_path(id).ok_or(StoreError::NotFound(id))?;
        let record = read_record(&path)?;
        if record.id != id {
            warn!(
                path = %path.display(),
                stored_id = %record.id,
                "submission file name does not match its id"
            );
            return Err(StoreError::NotFound(id));
        }
        debug!(id = %id, path = %path.display(), "loaded submission");
        Ok(record)
    }
}
