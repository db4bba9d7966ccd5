use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One visitor's assistance request, built up across the five wizard steps.
///
/// A record starts empty (`IntakeRecord::default()`), is mutated in place by
/// the active step, and is only serialized outward once the final consent
/// step validates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRecord {
    #[serde(default)]
    pub identity: Identity,
    #[serde(default)]
    pub background: Background,
    #[serde(default)]
    pub issues: PresentingIssues,
    #[serde(default)]
    pub preferences: ContactPreferences,
    #[serde(default)]
    pub consent: Consent,
    #[serde(default)]
    pub source: ReferralSource,
}

/// Step 1 fields: who the visitor is and how to reach them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronouns: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_band: Option<AgeBand>,
}

/// Step 2 fields: household and circumstance context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment: Option<EmploymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<RelationshipStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub housing: Option<HousingSituation>,
    #[serde(default)]
    pub dependents: Dependents,
}

/// Step 3 fields: what the visitor is asking for help with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentingIssues {
    #[serde(default)]
    pub concerns: BTreeSet<ConcernKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concern_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub risk_flags: RiskFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gp_registered: Option<bool>,
}

/// Four independent acute-safety indicators, checked regardless of severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFlags {
    #[serde(default)]
    pub self_harm: bool,
    #[serde(default)]
    pub harm_to_others: bool,
    #[serde(default)]
    pub domestic_abuse: bool,
    #[serde(default)]
    pub substance_risk: bool,
}

/// Step 4 fields: how and when support should be delivered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPreferences {
    #[serde(default)]
    pub support_preferences: BTreeSet<SupportPreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_contact: Option<PreferredContact>,
}

/// Step 5 fields: the four independent consent choices.
///
/// `anonymised_insights` defaults to `true` (opt-out), preserving the
/// behaviour of the live form; whether that default is intentional is an
/// open product question tracked in DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consent {
    #[serde(default)]
    pub privacy_policy_accepted: bool,
    #[serde(default)]
    pub share_with_partners: bool,
    #[serde(default = "default_true")]
    pub anonymised_insights: bool,
    #[serde(default)]
    pub crisis_protocol_ok: bool,
}

impl Default for Consent {
    fn default() -> Self {
        Self {
            privacy_policy_accepted: false,
            share_with_partners: false,
            anonymised_insights: true,
            crisis_protocol_ok: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Age bands offered by the form; never free-form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgeBand {
    Under18,
    #[serde(rename = "18-24")]
    From18To24,
    #[serde(rename = "25-34")]
    From25To34,
    #[serde(rename = "35-44")]
    From35To44,
    #[serde(rename = "45-54")]
    From45To54,
    #[serde(rename = "55-64")]
    From55To64,
    #[serde(rename = "65+")]
    Over65,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
    Student,
    Retired,
    Carer,
    UnableToWork,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipStatus {
    Single,
    Married,
    Partnered,
    Separated,
    Widowed,
    PreferNotToSay,
}

/// Housing situations ordered roughly by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HousingSituation {
    Secure,
    Temporary,
    SofaSurfing,
    AtRisk,
    Homeless,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dependents {
    #[default]
    None,
    Children,
    AdultDependents,
    Both,
}

/// Self-reported severity of the presenting issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Crisis,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Crisis => "crisis",
        }
    }

    /// High and crisis submissions require the crisis-protocol consent.
    pub const fn requires_crisis_protocol(self) -> bool {
        matches!(self, Severity::High | Severity::Crisis)
    }
}

/// The fixed catalog of topics a visitor can raise. "Other" feeds no
/// support bucket; everything else maps to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConcernKey {
    Abuse,
    Emotional,
    Addiction,
    Employment,
    Finance,
    Housing,
    Relationships,
    Health,
    Social,
    Other,
}

/// The fixed catalog of delivery modes a visitor can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SupportPreference {
    OneToOne,
    GroupSessions,
    PhoneCall,
    OnlineChat,
    SelfHelpResources,
    DropIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreferredContact {
    Email,
    Phone,
    Sms,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferralSource {
    #[default]
    Web,
    Phone,
    Referral,
}
