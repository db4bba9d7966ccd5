use super::common::complete_record;
use crate::wizard::sanitize::{sanitize_text, visible_len, MAX_TEXT_LEN};

#[test]
fn escapes_all_marked_characters() {
    assert_eq!(
        sanitize_text(r#"<b>"Tom" & 'Jerry' a/b</b>"#),
        "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27; a&#x2F;b&lt;&#x2F;b&gt;"
    );
}

#[test]
fn trims_surrounding_whitespace() {
    assert_eq!(sanitize_text("  hello  "), "hello");
    assert_eq!(sanitize_text("\n\t"), "");
}

#[test]
fn escaping_is_idempotent() {
    let once = sanitize_text("<script>alert('x & y')</script>");
    let twice = sanitize_text(&once);
    assert_eq!(once, twice);

    // Already-escaped input passes through unchanged.
    assert_eq!(sanitize_text("&lt;"), "&lt;");
    assert_eq!(sanitize_text("&amp;lt;"), "&amp;lt;");
}

#[test]
fn bare_ampersands_still_escape() {
    assert_eq!(sanitize_text("fish & chips"), "fish &amp; chips");
    // An ampersand that merely resembles an entity prefix is escaped.
    assert_eq!(sanitize_text("&ampx"), "&amp;ampx");
}

#[test]
fn caps_input_at_limit_before_escaping() {
    let long = "a".repeat(MAX_TEXT_LEN + 50);
    assert_eq!(sanitize_text(&long).chars().count(), MAX_TEXT_LEN);

    // Escaping may lengthen the output; the cap bounds the input.
    let angles = "<".repeat(MAX_TEXT_LEN + 10);
    let escaped = sanitize_text(&angles);
    assert_eq!(escaped.matches("&lt;").count(), MAX_TEXT_LEN);
}

#[test]
fn visible_len_counts_entities_as_single_characters() {
    assert_eq!(visible_len("fish &amp; chips"), 12);
    assert_eq!(visible_len(&"&lt;".repeat(10)), 10);
    // A bare ampersand or a non-emitted entity counts per character.
    assert_eq!(visible_len("&ampx"), 5);
    assert_eq!(visible_len("a&b"), 3);
}

#[test]
fn resanitizing_escaped_text_at_the_cap_never_truncates() {
    let escaped = "&lt;".repeat(MAX_TEXT_LEN);
    assert_eq!(sanitize_text(&escaped), escaped);
}

#[test]
fn cap_respects_multibyte_boundaries() {
    let emoji = "é".repeat(MAX_TEXT_LEN + 5);
    let capped = sanitize_text(&emoji);
    assert_eq!(capped.chars().count(), MAX_TEXT_LEN);
}

#[test]
fn sanitized_record_cleans_free_text_and_keeps_structure() {
    let mut record = complete_record();
    record.identity.first_name = " <Ada> ".to_string();
    record.identity.pronouns = Some("she/her".to_string());
    record.issues.concern_details = Some("worried about <rent>".to_string());
    record.preferences.availability = Some("  weekday evenings ".to_string());
    record.identity.email = " ada.okafor@example.org ".to_string();

    let clean = record.sanitized();
    assert_eq!(clean.identity.first_name, "&lt;Ada&gt;");
    assert_eq!(clean.identity.pronouns.as_deref(), Some("she&#x2F;her"));
    assert_eq!(
        clean.issues.concern_details.as_deref(),
        Some("worried about &lt;rent&gt;")
    );
    assert_eq!(
        clean.preferences.availability.as_deref(),
        Some("weekday evenings")
    );
    assert_eq!(clean.identity.email, "ada.okafor@example.org");
    // Structured fields are untouched.
    assert_eq!(clean.issues.concerns, record.issues.concerns);
    assert_eq!(clean.consent, record.consent);
}

#[test]
fn sanitizing_a_sanitized_record_is_a_no_op() {
    let mut record = complete_record();
    record.issues.concern_details = Some("a < b & c".to_string());

    let once = record.sanitized();
    let twice = once.sanitized();
    assert_eq!(once, twice);
}
