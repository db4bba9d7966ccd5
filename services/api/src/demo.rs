use crate::infra::{read_record, InMemorySubmissionRepository};
use clap::Args;
use outreach_intake::config::AppConfig;
use outreach_intake::error::AppError;
use outreach_intake::wizard::{
    classify, validate_record, validate_step, ConcernKey, EmploymentStatus, HousingSituation,
    HttpTransport, IdempotencyKey, IntakeRecord, IntakeService, PreferredContact,
    RelationshipStatus, Severity, SubmissionClient, SubmissionId, SubmissionPayload, WizardStep,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct TriageArgs {
    /// Path to an intake record saved as JSON
    #[arg(long)]
    pub(crate) record: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Path to an intake record saved as JSON
    #[arg(long)]
    pub(crate) record: PathBuf,
    /// Intake endpoint URL (defaults to APP_INTAKE_ENDPOINT)
    #[arg(long)]
    pub(crate) endpoint: Option<String>,
    /// CSRF token to forward, if the page issued one
    #[arg(long)]
    pub(crate) csrf_token: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the full outbound payload JSON as part of the walkthrough
    #[arg(long)]
    pub(crate) show_payload: bool,
}

pub(crate) fn run_triage(args: TriageArgs) -> Result<(), AppError> {
    let record = read_record(&args.record)?;

    let errors = validate_record(&record);
    if !errors.is_empty() {
        println!("Record is incomplete; triage preview only:");
        for (field, message) in &errors {
            println!("  - {field}: {message}");
        }
    }

    print_triage(&record);
    Ok(())
}

pub(crate) async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let record = read_record(&args.record)?;
    let endpoint = match args.endpoint {
        Some(endpoint) => endpoint,
        None => AppConfig::load()?.intake.endpoint,
    };

    let mut client = SubmissionClient::new(HttpTransport::new(endpoint.clone()));
    if let Some(token) = args.csrf_token {
        client = client.with_csrf_token(token);
    }

    println!("Submitting to {endpoint}");
    match client.submit(&record).await {
        Ok(receipt) => {
            println!("Accepted at {}", receipt.submitted_at);
            println!("Idempotency key: {}", receipt.key);
        }
        Err(err) => println!("Submission failed: {err}"),
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Assistance-request intake demo");

    let mut record = IntakeRecord::default();
    record.identity.first_name = "Jordan".to_string();
    record.identity.last_name = "Reid".to_string();
    record.identity.email = "jordan.reid@example.org".to_string();
    record.identity.phone = Some("07700 900456".to_string());
    record.background.employment = Some(EmploymentStatus::Unemployed);
    record.background.relationship = Some(RelationshipStatus::Separated);
    record.background.housing = Some(HousingSituation::SofaSurfing);
    record.issues.concerns.insert(ConcernKey::Housing);
    record.issues.concerns.insert(ConcernKey::Emotional);
    record.issues.severity = Some(Severity::Moderate);
    record.issues.concern_details = Some("Staying with friends since <March>".to_string());
    record.preferences.preferred_contact = Some(PreferredContact::Phone);
    record.consent.privacy_policy_accepted = true;

    for step in WizardStep::ALL {
        let errors = validate_step(step, &record);
        if errors.is_empty() {
            println!("- Step {} validates", step.number());
        } else {
            println!("- Step {} blocked:", step.number());
            for (field, message) in &errors {
                println!("    {field}: {message}");
            }
            return Ok(());
        }
    }

    print_triage(&record);

    let repository = Arc::new(InMemorySubmissionRepository::default());
    let service = IntakeService::new(repository);

    let key = match IdempotencyKey::generate() {
        Ok(key) => key,
        Err(err) => {
            println!("Cannot submit: {err}");
            return Ok(());
        }
    };
    let payload = SubmissionPayload::assemble(&record);
    if args.show_payload {
        match serde_json::to_string_pretty(&payload) {
            Ok(json) => println!("\nOutbound payload:\n{json}"),
            Err(err) => println!("Payload unavailable: {err}"),
        }
    }

    let id = SubmissionId(key.to_string());
    match service.receive(id.clone(), payload.clone()) {
        Ok(received) => {
            let view = received.submission().receipt_view();
            match serde_json::to_string_pretty(&view) {
                Ok(json) => println!("\nReceipt:\n{json}"),
                Err(err) => println!("Receipt unavailable: {err}"),
            }
        }
        Err(err) => {
            println!("Submission rejected: {err}");
            return Ok(());
        }
    }

    // Retrying with the same key replays the stored submission.
    match service.receive(id, payload) {
        Ok(received) => println!(
            "Retry with same key replayed stored submission {}",
            received.submission().id.0
        ),
        Err(err) => println!("Retry failed: {err}"),
    }

    Ok(())
}

fn print_triage(record: &IntakeRecord) {
    let triage = classify(record);
    println!("\nTriage");
    println!("- Risk score: {}", triage.risk_score);
    println!("- Priority: {}", triage.priority.label());
    if triage.buckets.is_empty() {
        println!("- Buckets: none");
    } else {
        println!("- Buckets:");
        for bucket in &triage.buckets {
            println!("    - {}", bucket.label());
        }
    }
}
