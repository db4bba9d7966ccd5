use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::repository::{RepositoryError, StoredSubmission, SubmissionId, SubmissionRepository};
use super::submission::SubmissionPayload;
use super::triage::classify;
use super::validation::{validate_record, FieldErrors};

/// Outcome of receiving a submission: freshly stored, or an idempotent
/// replay of one the repository already holds under the same key.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceivedSubmission {
    Accepted(StoredSubmission),
    Replayed(StoredSubmission),
}

impl ReceivedSubmission {
    pub fn submission(&self) -> &StoredSubmission {
        match self {
            ReceivedSubmission::Accepted(stored) | ReceivedSubmission::Replayed(stored) => stored,
        }
    }
}

/// Server-side counterpart of the wizard: re-validates, re-classifies, and
/// stores what the client sent.
pub struct IntakeService<R> {
    repository: Arc<R>,
}

impl<R> IntakeService<R>
where
    R: SubmissionRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> IntakeService<R> {
        IntakeService { repository }
    }

    /// Accept one submission.
    ///
    /// The client's triage block is never trusted: the classifier is
    /// deterministic, so the server recomputes it from the record and
    /// overwrites whatever was sent. A key conflict replays the stored
    /// submission, which is exactly the deduplication the idempotency key
    /// exists for.
    pub fn receive(
        &self,
        id: SubmissionId,
        mut payload: SubmissionPayload,
    ) -> Result<ReceivedSubmission, IntakeServiceError> {
        let errors = validate_record(&payload.record);
        if !errors.is_empty() {
            return Err(IntakeServiceError::Invalid(errors));
        }

        payload.record = payload.record.sanitized();
        payload.triage = classify(&payload.record);

        let submission = StoredSubmission {
            id: id.clone(),
            payload,
            received_at: Utc::now(),
        };

        match self.repository.insert(submission) {
            Ok(stored) => {
                info!(id = %stored.id.0, priority = stored.payload.triage.priority.label(),
                    "intake submission stored");
                Ok(ReceivedSubmission::Accepted(stored))
            }
            Err(RepositoryError::Conflict) => {
                let existing = self
                    .repository
                    .fetch(&id)?
                    .ok_or(RepositoryError::NotFound)?;
                info!(id = %existing.id.0, "intake submission replayed");
                Ok(ReceivedSubmission::Replayed(existing))
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Look up a stored submission for receipt endpoints.
    pub fn get(&self, id: &SubmissionId) -> Result<StoredSubmission, IntakeServiceError> {
        let stored = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(stored)
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error("submission failed validation ({} field(s))", .0.len())]
    Invalid(FieldErrors),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
