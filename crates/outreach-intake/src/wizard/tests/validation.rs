use super::common::{complete_record, crisis_record};
use crate::wizard::domain::{IntakeRecord, Severity};
use crate::wizard::validation::{validate_record, validate_step, WizardStep};

#[test]
fn step_numbers_round_trip() {
    for step in WizardStep::ALL {
        assert_eq!(WizardStep::from_number(step.number()), Some(step));
    }
    assert_eq!(WizardStep::from_number(0), None);
    assert_eq!(WizardStep::from_number(6), None);
}

#[test]
fn empty_record_passes_no_step_but_preferences_only_checks_contact() {
    let record = IntakeRecord::default();
    let errors = validate_step(WizardStep::Preferences, &record);
    assert_eq!(errors.len(), 1);
    assert!(errors.contains_key("preferredContact"));
}

#[test]
fn identity_step_flags_missing_and_malformed_fields() {
    let mut record = complete_record();
    record.identity.first_name = "".to_string();
    record.identity.email = "not-an-email".to_string();

    let errors = validate_step(WizardStep::Identity, &record);
    assert!(errors.contains_key("firstName"));
    assert!(errors.contains_key("email"));
    assert!(!errors.contains_key("lastName"));
}

#[test]
fn identity_step_accepts_whitespace_trimmed_names() {
    let mut record = complete_record();
    record.identity.first_name = "  Ada  ".to_string();
    assert!(validate_step(WizardStep::Identity, &record).is_empty());

    record.identity.first_name = "   ".to_string();
    assert!(validate_step(WizardStep::Identity, &record).contains_key("firstName"));
}

#[test]
fn identity_step_caps_name_length() {
    let mut record = complete_record();
    record.identity.last_name = "x".repeat(101);
    let errors = validate_step(WizardStep::Identity, &record);
    assert!(errors.contains_key("lastName"));

    record.identity.last_name = "x".repeat(100);
    assert!(validate_step(WizardStep::Identity, &record).is_empty());
}

#[test]
fn phone_validation_accepts_uk_shapes() {
    let valid = [
        "07700 900123",
        "+44 7700 900123",
        "+447700900123",
        "020 7946 0958",
        "(020) 7946-0958",
        "0114 496 0000",
    ];
    for number in valid {
        let mut record = complete_record();
        record.identity.phone = Some(number.to_string());
        assert!(
            validate_step(WizardStep::Identity, &record).is_empty(),
            "expected {number} to validate"
        );
    }

    let invalid = ["12345", "0770090", "+1 555 0100", "call me maybe"];
    for number in invalid {
        let mut record = complete_record();
        record.identity.phone = Some(number.to_string());
        assert!(
            validate_step(WizardStep::Identity, &record).contains_key("phone"),
            "expected {number} to be rejected"
        );
    }
}

#[test]
fn optional_phone_and_postcode_skip_format_checks_when_absent() {
    let mut record = complete_record();
    record.identity.phone = None;
    record.identity.postcode = None;
    assert!(validate_step(WizardStep::Identity, &record).is_empty());
}

#[test]
fn postcode_validation_accepts_standard_shapes() {
    for postcode in ["SW1A 1AA", "M1 1AE", "CR2 6XH", "DN55 1PT", "EC1A1BB"] {
        let mut record = complete_record();
        record.identity.postcode = Some(postcode.to_string());
        assert!(
            validate_step(WizardStep::Identity, &record).is_empty(),
            "expected {postcode} to validate"
        );
    }

    let mut record = complete_record();
    record.identity.postcode = Some("12345".to_string());
    assert!(validate_step(WizardStep::Identity, &record).contains_key("postcode"));
}

#[test]
fn background_step_requires_all_three_selections() {
    let record = IntakeRecord::default();
    let errors = validate_step(WizardStep::Background, &record);
    assert!(errors.contains_key("employmentStatus"));
    assert!(errors.contains_key("relationshipStatus"));
    assert!(errors.contains_key("housing"));

    assert!(validate_step(WizardStep::Background, &complete_record()).is_empty());
}

#[test]
fn concerns_step_requires_selection_and_severity() {
    let record = IntakeRecord::default();
    let errors = validate_step(WizardStep::Concerns, &record);
    assert!(errors.contains_key("concerns"));
    assert!(errors.contains_key("severity"));
}

#[test]
fn concerns_step_caps_detail_length() {
    let mut record = complete_record();
    record.issues.concern_details = Some("d".repeat(5001));
    assert!(validate_step(WizardStep::Concerns, &record).contains_key("concernDetails"));

    record.issues.concern_details = Some("d".repeat(5000));
    assert!(validate_step(WizardStep::Concerns, &record).is_empty());
}

#[test]
fn length_caps_count_escaped_entities_once() {
    // Escaped text re-validated on the server must not blow the caps.
    let mut record = complete_record();
    record.identity.last_name = "&amp;".repeat(100);
    assert!(validate_step(WizardStep::Identity, &record).is_empty());

    record.identity.last_name = "&amp;".repeat(101);
    assert!(validate_step(WizardStep::Identity, &record).contains_key("lastName"));

    let mut record = complete_record();
    record.issues.concern_details = Some("&lt;".repeat(5000));
    assert!(validate_step(WizardStep::Concerns, &record).is_empty());

    record.issues.concern_details = Some("&lt;".repeat(5001));
    assert!(validate_step(WizardStep::Concerns, &record).contains_key("concernDetails"));
}

#[test]
fn consent_step_requires_privacy_acceptance() {
    let mut record = complete_record();
    record.consent.privacy_policy_accepted = false;
    assert!(validate_step(WizardStep::Consent, &record).contains_key("privacy"));
}

#[test]
fn consent_step_requires_crisis_protocol_for_high_severity() {
    let mut record = complete_record();
    record.issues.severity = Some(Severity::High);
    record.consent.crisis_protocol_ok = false;

    let errors = validate_step(WizardStep::Consent, &record);
    assert!(errors.contains_key("crisis"));

    record.consent.crisis_protocol_ok = true;
    assert!(validate_step(WizardStep::Consent, &record).is_empty());
}

#[test]
fn consent_step_skips_crisis_check_for_low_severity() {
    let mut record = complete_record();
    record.issues.severity = Some(Severity::Low);
    record.consent.crisis_protocol_ok = false;
    assert!(validate_step(WizardStep::Consent, &record).is_empty());
}

#[test]
fn validation_is_idempotent() {
    let mut record = complete_record();
    record.identity.email = "broken".to_string();
    record.issues.concerns.clear();

    for step in WizardStep::ALL {
        let first = validate_step(step, &record);
        let second = validate_step(step, &record);
        assert_eq!(first, second);
    }
}

#[test]
fn earlier_steps_never_check_later_fields() {
    // Only consent is missing; steps 1-4 must stay silent about it.
    let mut record = crisis_record();
    record.consent.privacy_policy_accepted = false;
    record.consent.crisis_protocol_ok = false;

    for step in [
        WizardStep::Identity,
        WizardStep::Background,
        WizardStep::Concerns,
        WizardStep::Preferences,
    ] {
        assert!(validate_step(step, &record).is_empty(), "step {step:?}");
    }
}

#[test]
fn validate_record_folds_all_steps() {
    let record = IntakeRecord::default();
    let errors = validate_record(&record);
    for key in [
        "firstName",
        "lastName",
        "email",
        "employmentStatus",
        "relationshipStatus",
        "housing",
        "concerns",
        "severity",
        "preferredContact",
        "privacy",
    ] {
        assert!(errors.contains_key(key), "missing {key}");
    }

    assert!(validate_record(&complete_record()).is_empty());
    assert!(validate_record(&crisis_record()).is_empty());
}
