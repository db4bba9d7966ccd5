use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use outreach_intake::error::AppError;
use outreach_intake::wizard::{
    IntakeRecord, RepositoryError, StoredSubmission, SubmissionId, SubmissionRepository,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Keyed by idempotency key, which is what makes retried submissions safe.
#[derive(Default, Clone)]
pub(crate) struct InMemorySubmissionRepository {
    records: Arc<Mutex<HashMap<SubmissionId, StoredSubmission>>>,
}

impl SubmissionRepository for InMemorySubmissionRepository {
    fn insert(&self, submission: StoredSubmission) -> Result<StoredSubmission, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        if guard.contains_key(&submission.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(submission.id.clone(), submission.clone());
        Ok(submission)
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<StoredSubmission>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }
}

/// Load an intake record from a JSON file saved by the form (or a fixture).
pub(crate) fn read_record(path: &Path) -> Result<IntakeRecord, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let record = serde_json::from_str(&raw)?;
    Ok(record)
}
