use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::domain::IntakeRecord;
use super::sanitize::{visible_len, MAX_NAME_LEN, MAX_TEXT_LEN};

/// The five wizard steps, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Identity,
    Background,
    Concerns,
    Preferences,
    Consent,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Identity,
        WizardStep::Background,
        WizardStep::Concerns,
        WizardStep::Preferences,
        WizardStep::Consent,
    ];

    /// Map the 1-based step number used by the form to a step, if valid.
    pub const fn from_number(number: u8) -> Option<WizardStep> {
        match number {
            1 => Some(WizardStep::Identity),
            2 => Some(WizardStep::Background),
            3 => Some(WizardStep::Concerns),
            4 => Some(WizardStep::Preferences),
            5 => Some(WizardStep::Consent),
            _ => None,
        }
    }

    pub const fn number(self) -> u8 {
        match self {
            WizardStep::Identity => 1,
            WizardStep::Background => 2,
            WizardStep::Concerns => 3,
            WizardStep::Preferences => 4,
            WizardStep::Consent => 5,
        }
    }
}

/// Field-keyed error map; empty means the step may proceed.
pub type FieldErrors = BTreeMap<&'static str, String>;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[A-Za-z]{2,}$").expect("email pattern compiles")
    })
}

fn uk_phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Mobile (07 / +447) or landline (01,02,03 / +441...) after separator
    // stripping; 10 or 11 digits in national form.
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:\+44|0)(?:7\d{9}|[123]\d{8,9})$").expect("phone pattern compiles")
    })
}

fn uk_postcode_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z]{1,2}\d[A-Za-z\d]?\s*\d[A-Za-z]{2}$")
            .expect("postcode pattern compiles")
    })
}

fn valid_uk_phone(raw: &str) -> bool {
    let stripped: String = raw
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '-' | '(' | ')'))
        .collect();
    uk_phone_pattern().is_match(&stripped)
}

/// Decide whether the visitor may advance past `step`.
///
/// Pure and idempotent; rules are step-scoped, so validating one step never
/// inspects fields introduced by a later one. Every violated rule yields
/// exactly one entry keyed by the wire field name.
pub fn validate_step(step: WizardStep, record: &IntakeRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match step {
        WizardStep::Identity => {
            let first = record.identity.first_name.trim();
            if first.is_empty() {
                errors.insert("firstName", "Please enter your first name".to_string());
            } else if visible_len(first) > MAX_NAME_LEN {
                errors.insert(
                    "firstName",
                    format!("First name must be {MAX_NAME_LEN} characters or fewer"),
                );
            }

            let last = record.identity.last_name.trim();
            if last.is_empty() {
                errors.insert("lastName", "Please enter your last name".to_string());
            } else if visible_len(last) > MAX_NAME_LEN {
                errors.insert(
                    "lastName",
                    format!("Last name must be {MAX_NAME_LEN} characters or fewer"),
                );
            }

            let email = record.identity.email.trim();
            if email.is_empty() {
                errors.insert("email", "Please enter your email address".to_string());
            } else if !email_pattern().is_match(email) {
                errors.insert("email", "Please enter a valid email address".to_string());
            }

            if let Some(phone) = record.identity.phone.as_deref() {
                let phone = phone.trim();
                if !phone.is_empty() && !valid_uk_phone(phone) {
                    errors.insert("phone", "Please enter a valid UK phone number".to_string());
                }
            }

            if let Some(postcode) = record.identity.postcode.as_deref() {
                let postcode = postcode.trim();
                if !postcode.is_empty() && !uk_postcode_pattern().is_match(postcode) {
                    errors.insert("postcode", "Please enter a valid UK postcode".to_string());
                }
            }
        }
        WizardStep::Background => {
            if record.background.employment.is_none() {
                errors.insert(
                    "employmentStatus",
                    "Please select your employment status".to_string(),
                );
            }
            if record.background.relationship.is_none() {
                errors.insert(
                    "relationshipStatus",
                    "Please select your relationship status".to_string(),
                );
            }
            if record.background.housing.is_none() {
                errors.insert("housing", "Please select your housing situation".to_string());
            }
        }
        WizardStep::Concerns => {
            if record.issues.concerns.is_empty() {
                errors.insert("concerns", "Please select at least one concern".to_string());
            }
            if record.issues.severity.is_none() {
                errors.insert(
                    "severity",
                    "Please tell us how urgent things feel right now".to_string(),
                );
            }
            if let Some(details) = record.issues.concern_details.as_deref() {
                if visible_len(details) > MAX_TEXT_LEN {
                    errors.insert(
                        "concernDetails",
                        format!("Details must be {MAX_TEXT_LEN} characters or fewer"),
                    );
                }
            }
        }
        WizardStep::Preferences => {
            if record.preferences.preferred_contact.is_none() {
                errors.insert(
                    "preferredContact",
                    "Please choose how you would like us to contact you".to_string(),
                );
            }
        }
        WizardStep::Consent => {
            if !record.consent.privacy_policy_accepted {
                errors.insert(
                    "privacy",
                    "You must accept the privacy policy to continue".to_string(),
                );
            }
            let needs_crisis_consent = record
                .issues
                .severity
                .map(|severity| severity.requires_crisis_protocol())
                .unwrap_or(false);
            if needs_crisis_consent && !record.consent.crisis_protocol_ok {
                errors.insert(
                    "crisis",
                    "Please confirm you understand our crisis response protocol".to_string(),
                );
            }
        }
    }

    errors
}

/// Final submission gate: every step's rules, folded into one map.
///
/// Rule sets are disjoint per field across steps, so folding cannot
/// overwrite one step's message with another's.
pub fn validate_record(record: &IntakeRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for step in WizardStep::ALL {
        errors.extend(validate_step(step, record));
    }
    errors
}
