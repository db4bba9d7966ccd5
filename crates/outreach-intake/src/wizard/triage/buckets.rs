use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::wizard::domain::ConcernKey;

/// Topical support categories, serialized as their display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportBucket {
    #[serde(rename = "Safety/Crisis")]
    SafetyCrisis,
    #[serde(rename = "Mental Health & Addiction")]
    MentalHealthAndAddiction,
    #[serde(rename = "Employment & Skills")]
    EmploymentAndSkills,
    #[serde(rename = "Money/Debt Advice")]
    MoneyDebtAdvice,
    #[serde(rename = "Housing Support")]
    HousingSupport,
    #[serde(rename = "Family/Relationship Support")]
    FamilyRelationshipSupport,
    #[serde(rename = "Physical Health Navigation")]
    PhysicalHealthNavigation,
    #[serde(rename = "Connection/Peer Support")]
    ConnectionPeerSupport,
}

impl SupportBucket {
    pub const fn label(self) -> &'static str {
        match self {
            SupportBucket::SafetyCrisis => "Safety/Crisis",
            SupportBucket::MentalHealthAndAddiction => "Mental Health & Addiction",
            SupportBucket::EmploymentAndSkills => "Employment & Skills",
            SupportBucket::MoneyDebtAdvice => "Money/Debt Advice",
            SupportBucket::HousingSupport => "Housing Support",
            SupportBucket::FamilyRelationshipSupport => "Family/Relationship Support",
            SupportBucket::PhysicalHealthNavigation => "Physical Health Navigation",
            SupportBucket::ConnectionPeerSupport => "Connection/Peer Support",
        }
    }
}

/// Canonical rule table: consulted top to bottom, which fixes the display
/// order of the derived buckets regardless of how the concern set was built.
/// A bucket is appended once when any of its trigger keys is present.
const BUCKET_RULES: &[(SupportBucket, &[ConcernKey])] = &[
    (SupportBucket::SafetyCrisis, &[ConcernKey::Abuse]),
    (
        SupportBucket::MentalHealthAndAddiction,
        &[ConcernKey::Emotional, ConcernKey::Addiction],
    ),
    (SupportBucket::EmploymentAndSkills, &[ConcernKey::Employment]),
    (SupportBucket::MoneyDebtAdvice, &[ConcernKey::Finance]),
    (SupportBucket::HousingSupport, &[ConcernKey::Housing]),
    (
        SupportBucket::FamilyRelationshipSupport,
        &[ConcernKey::Relationships],
    ),
    (
        SupportBucket::PhysicalHealthNavigation,
        &[ConcernKey::Health],
    ),
    (SupportBucket::ConnectionPeerSupport, &[ConcernKey::Social]),
];

pub(crate) fn buckets_for(concerns: &BTreeSet<ConcernKey>) -> Vec<SupportBucket> {
    BUCKET_RULES
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|key| concerns.contains(key)))
        .map(|(bucket, _)| *bucket)
        .collect()
}
