use crate::wizard::domain::{EmploymentStatus, HousingSituation, IntakeRecord, Severity};

const SEVERITY_MODERATE: u8 = 2;
const SEVERITY_HIGH: u8 = 4;
const SEVERITY_CRISIS: u8 = 6;

const FLAG_SELF_HARM: u8 = 6;
const FLAG_DOMESTIC_ABUSE: u8 = 6;
const FLAG_HARM_TO_OTHERS: u8 = 4;
const FLAG_SUBSTANCE_RISK: u8 = 3;

const HOUSING_INSECURE: u8 = 3;
const EMPLOYMENT_OUT_OF_WORK: u8 = 2;

/// Sum the fixed additive contributions into a risk score.
///
/// Each contribution is independent, so the total is insensitive to
/// evaluation order; the maximum attainable is 30.
pub(crate) fn risk_score(record: &IntakeRecord) -> u8 {
    let mut score = 0u8;

    score += match record.issues.severity {
        Some(Severity::Moderate) => SEVERITY_MODERATE,
        Some(Severity::High) => SEVERITY_HIGH,
        Some(Severity::Crisis) => SEVERITY_CRISIS,
        Some(Severity::Low) | None => 0,
    };

    let flags = record.issues.risk_flags;
    if flags.self_harm {
        score += FLAG_SELF_HARM;
    }
    if flags.domestic_abuse {
        score += FLAG_DOMESTIC_ABUSE;
    }
    if flags.harm_to_others {
        score += FLAG_HARM_TO_OTHERS;
    }
    if flags.substance_risk {
        score += FLAG_SUBSTANCE_RISK;
    }

    if matches!(
        record.background.housing,
        Some(HousingSituation::Homeless) | Some(HousingSituation::AtRisk)
    ) {
        score += HOUSING_INSECURE;
    }

    if matches!(
        record.background.employment,
        Some(EmploymentStatus::Unemployed) | Some(EmploymentStatus::UnableToWork)
    ) {
        score += EMPLOYMENT_OUT_OF_WORK;
    }

    score
}
