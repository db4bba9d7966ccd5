//! Assistance-request intake: data model, per-step validation, triage
//! classification, sanitisation, and the submission boundary on both sides
//! of the wire.
//!
//! Everything here is either pure (validation, triage, sanitisation) or
//! built over explicit trait seams (transport, repository) so the wizard
//! flow can be driven entirely by tests.

pub mod domain;
pub mod repository;
pub mod router;
pub mod sanitize;
pub mod service;
pub mod submission;
pub mod triage;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AgeBand, Background, ConcernKey, Consent, ContactPreferences, Dependents, EmploymentStatus,
    HousingSituation, Identity, IntakeRecord, PreferredContact, PresentingIssues,
    RelationshipStatus, ReferralSource, RiskFlags, Severity, SupportPreference,
};
pub use repository::{
    ReceiptView, RepositoryError, StoredSubmission, SubmissionId, SubmissionRepository,
};
pub use router::intake_router;
pub use sanitize::{sanitize_text, visible_len, MAX_NAME_LEN, MAX_TEXT_LEN};
pub use service::{IntakeService, IntakeServiceError, ReceivedSubmission};
pub use submission::{
    HttpTransport, IdempotencyKey, IntakeTransport, KeyError, SubmissionClient, SubmissionError,
    SubmissionPayload, SubmissionReceipt, SubmissionRequest, TransportError, SCHEMA_VERSION,
};
pub use triage::{classify, Priority, SupportBucket, TriageResult};
pub use validation::{validate_record, validate_step, FieldErrors, WizardStep};
