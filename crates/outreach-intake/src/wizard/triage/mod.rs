//! Deterministic triage classification.
//!
//! A fixed, hand-authored scoring rule, not a configurable policy engine.
//! The same record always produces the same `{risk_score, buckets,
//! priority}`, which is why the form can recompute it on every field edit
//! and the server can recompute it again at submission time.

mod buckets;
mod rules;

pub use buckets::SupportBucket;

use serde::{Deserialize, Serialize};

use super::domain::IntakeRecord;

/// Coarse priority derived from the risk score; inclusive lower bounds,
/// highest threshold wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Immediate,
}

impl Priority {
    pub const fn from_score(score: u8) -> Priority {
        match score {
            12.. => Priority::Immediate,
            8.. => Priority::High,
            4.. => Priority::Medium,
            _ => Priority::Low,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Immediate => "Immediate",
        }
    }
}

/// The explainable triage signal attached to every submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResult {
    pub risk_score: u8,
    pub buckets: Vec<SupportBucket>,
    pub priority: Priority,
}

/// Classify a record: additive risk score, canonical-order buckets, and
/// the threshold-mapped priority. Pure; safe to call on every keystroke.
pub fn classify(record: &IntakeRecord) -> TriageResult {
    let risk_score = rules::risk_score(record);
    let buckets = buckets::buckets_for(&record.issues.concerns);
    let priority = Priority::from_score(risk_score);

    TriageResult {
        risk_score,
        buckets,
        priority,
    }
}
