use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::submission::SubmissionPayload;

/// Identifier a stored submission is filed under: the idempotency key the
/// client sent with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

/// Repository record for one accepted submission, triage recomputed
/// server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSubmission {
    pub id: SubmissionId,
    pub payload: SubmissionPayload,
    pub received_at: DateTime<Utc>,
}

impl StoredSubmission {
    pub fn receipt_view(&self) -> ReceiptView {
        ReceiptView {
            id: self.id.clone(),
            status: "received",
            priority: self.payload.triage.priority.label(),
            received_at: self.received_at,
        }
    }
}

/// Storage abstraction so the intake service can be exercised in isolation.
pub trait SubmissionRepository: Send + Sync {
    fn insert(&self, submission: StoredSubmission) -> Result<StoredSubmission, RepositoryError>;
    fn fetch(&self, id: &SubmissionId) -> Result<Option<StoredSubmission>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("submission already exists")]
    Conflict,
    #[error("submission not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Public response shape for the intake endpoint; carries no personal data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptView {
    pub id: SubmissionId,
    pub status: &'static str,
    pub priority: &'static str,
    pub received_at: DateTime<Utc>,
}
