use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::domain::IntakeRecord;
use super::triage::{classify, TriageResult};
use super::validation::{validate_record, FieldErrors};

/// Version stamped into every outbound payload.
pub const SCHEMA_VERSION: u32 = 1;

/// Client-generated token the backend uses to deduplicate retried
/// submissions. Always drawn from the operating system's CSPRNG; there is
/// deliberately no clock-based fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdempotencyKey(pub Uuid);

impl IdempotencyKey {
    pub fn generate() -> Result<IdempotencyKey, KeyError> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|source| KeyError::RandomSource(source.to_string()))?;
        Ok(IdempotencyKey(
            uuid::Builder::from_random_bytes(bytes).into_uuid(),
        ))
    }
}

impl std::fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Failure to obtain cryptographically strong randomness. Fatal for the
/// submission attempt: a predictable key is worse than no submission.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("no cryptographically strong random source available: {0}")]
    RandomSource(String),
}

/// The JSON body handed to the intake endpoint: the sanitized record plus
/// the triage result, timestamp, and schema version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    #[serde(flatten)]
    pub record: IntakeRecord,
    pub triage: TriageResult,
    pub submitted_at: DateTime<Utc>,
    pub schema_version: u32,
}

impl SubmissionPayload {
    /// Sanitize the record, classify it fresh, and stamp the envelope.
    pub fn assemble(record: &IntakeRecord) -> SubmissionPayload {
        let record = record.sanitized();
        let triage = classify(&record);
        SubmissionPayload {
            record,
            triage,
            submitted_at: Utc::now(),
            schema_version: SCHEMA_VERSION,
        }
    }
}

/// Everything a transport needs to deliver one submission.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub key: IdempotencyKey,
    pub csrf_token: Option<String>,
    pub payload: SubmissionPayload,
}

/// Transport failures, pre-translation: the client collapses both variants
/// into a single user-facing condition.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("endpoint rejected submission ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Outbound seam to the intake endpoint, so the client can be exercised
/// against in-memory doubles.
#[async_trait]
pub trait IntakeTransport: Send + Sync {
    async fn deliver(&self, request: SubmissionRequest) -> Result<(), TransportError>;
}

/// Returned to the caller once a submission has fully succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub key: IdempotencyKey,
    pub submitted_at: DateTime<Utc>,
}

/// Errors surfaced to the wizard. Validation failures never reach the
/// transport; transport failures carry one human-readable message with the
/// raw detail logged, never shown.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("record is incomplete ({} field(s) failed validation)", .0.len())]
    Incomplete(FieldErrors),
    #[error(transparent)]
    RandomSource(#[from] KeyError),
    #[error("{message}")]
    Failed { message: String },
}

const FAILED_MESSAGE: &str =
    "We couldn't send your request. Nothing you entered has been lost - please try again.";

/// Drives one submission end to end: final validation gate, idempotency
/// key, payload assembly, delivery.
///
/// The caller keeps ownership of the record throughout, so a failed
/// submission leaves it fully intact for retry. No partial-success state
/// exists.
pub struct SubmissionClient<T> {
    transport: T,
    csrf_token: Option<String>,
}

impl<T> SubmissionClient<T>
where
    T: IntakeTransport,
{
    pub fn new(transport: T) -> SubmissionClient<T> {
        SubmissionClient {
            transport,
            csrf_token: None,
        }
    }

    /// Attach a CSRF token discovered from page metadata or a cookie.
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> SubmissionClient<T> {
        self.csrf_token = Some(token.into());
        self
    }

    pub async fn submit(&self, record: &IntakeRecord) -> Result<SubmissionReceipt, SubmissionError> {
        let errors = validate_record(record);
        if !errors.is_empty() {
            return Err(SubmissionError::Incomplete(errors));
        }

        let key = IdempotencyKey::generate()?;
        let payload = SubmissionPayload::assemble(record);
        let submitted_at = payload.submitted_at;

        let request = SubmissionRequest {
            key: key.clone(),
            csrf_token: self.csrf_token.clone(),
            payload,
        };

        match self.transport.deliver(request).await {
            Ok(()) => Ok(SubmissionReceipt { key, submitted_at }),
            Err(error) => {
                warn!(%key, %error, "intake submission failed");
                Err(SubmissionError::Failed {
                    message: FAILED_MESSAGE.to_string(),
                })
            }
        }
    }
}

/// HTTP transport posting JSON to the intake endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> HttpTransport {
        HttpTransport {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl IntakeTransport for HttpTransport {
    async fn deliver(&self, request: SubmissionRequest) -> Result<(), TransportError> {
        let mut outbound = self
            .client
            .post(&self.endpoint)
            .header("X-Idempotency-Key", request.key.to_string())
            .json(&request.payload);
        if let Some(token) = &request.csrf_token {
            outbound = outbound.header("X-CSRF-Token", token);
        }

        let response = outbound
            .send()
            .await
            .map_err(|error| TransportError::Network(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(|value| value.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("endpoint returned {status}"));

        Err(TransportError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
