use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::wizard::domain::{
    ConcernKey, EmploymentStatus, HousingSituation, IntakeRecord, PreferredContact,
    RelationshipStatus, Severity,
};
use crate::wizard::repository::{
    RepositoryError, StoredSubmission, SubmissionId, SubmissionRepository,
};
use crate::wizard::router::intake_router;
use crate::wizard::service::IntakeService;
use crate::wizard::submission::{
    IntakeTransport, SubmissionPayload, SubmissionRequest, TransportError,
};

/// A record that passes every wizard step.
pub(super) fn complete_record() -> IntakeRecord {
    let mut record = IntakeRecord::default();
    record.identity.first_name = "Ada".to_string();
    record.identity.last_name = "Okafor".to_string();
    record.identity.email = "ada.okafor@example.org".to_string();
    record.identity.phone = Some("07700 900123".to_string());
    record.identity.postcode = Some("SW1A 1AA".to_string());
    record.background.employment = Some(EmploymentStatus::Employed);
    record.background.relationship = Some(RelationshipStatus::Single);
    record.background.housing = Some(HousingSituation::Secure);
    record.issues.concerns.insert(ConcernKey::Emotional);
    record.issues.severity = Some(Severity::Moderate);
    record.preferences.preferred_contact = Some(PreferredContact::Email);
    record.consent.privacy_policy_accepted = true;
    record
}

/// A complete record whose severity requires the crisis-protocol consent.
pub(super) fn crisis_record() -> IntakeRecord {
    let mut record = complete_record();
    record.issues.severity = Some(Severity::Crisis);
    record.consent.crisis_protocol_ok = true;
    record
}

pub(super) fn payload(record: &IntakeRecord) -> SubmissionPayload {
    SubmissionPayload::assemble(record)
}

pub(super) fn submission_id(suffix: &str) -> SubmissionId {
    SubmissionId(format!("key-{suffix}"))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<SubmissionId, StoredSubmission>>>,
}

impl SubmissionRepository for MemoryRepository {
    fn insert(&self, submission: StoredSubmission) -> Result<StoredSubmission, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&submission.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(submission.id.clone(), submission.clone());
        Ok(submission)
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<StoredSubmission>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl SubmissionRepository for UnavailableRepository {
    fn insert(&self, _submission: StoredSubmission) -> Result<StoredSubmission, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SubmissionId) -> Result<Option<StoredSubmission>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn build_service() -> (IntakeService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = IntakeService::new(repository.clone());
    (service, repository)
}

pub(super) fn router_with_service(service: IntakeService<MemoryRepository>) -> axum::Router {
    intake_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Transport double that records every delivered request.
#[derive(Default, Clone)]
pub(super) struct RecordingTransport {
    pub(super) requests: Arc<Mutex<Vec<SubmissionRequest>>>,
}

impl RecordingTransport {
    pub(super) fn deliveries(&self) -> Vec<SubmissionRequest> {
        self.requests.lock().expect("transport mutex poisoned").clone()
    }
}

#[async_trait]
impl IntakeTransport for RecordingTransport {
    async fn deliver(&self, request: SubmissionRequest) -> Result<(), TransportError> {
        self.requests
            .lock()
            .expect("transport mutex poisoned")
            .push(request);
        Ok(())
    }
}

/// Transport double that always fails, for retry-path assertions.
pub(super) struct FailingTransport {
    pub(super) error: fn() -> TransportError,
}

#[async_trait]
impl IntakeTransport for FailingTransport {
    async fn deliver(&self, _request: SubmissionRequest) -> Result<(), TransportError> {
        Err((self.error)())
    }
}
