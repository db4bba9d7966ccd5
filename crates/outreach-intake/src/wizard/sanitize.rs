use super::domain::IntakeRecord;

/// Hard cap on user-entered free text, counted in visible characters.
pub const MAX_TEXT_LEN: usize = 5000;

/// Shorter cap for name fields.
pub const MAX_NAME_LEN: usize = 100;

const ENTITIES: [&str; 6] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#x27;", "&#x2F;"];

/// Length of `text` in visible characters: an escape entity this module
/// emits counts as the single character the visitor typed. Keeps the
/// length caps stable across repeated sanitisation.
pub fn visible_len(text: &str) -> usize {
    let mut count = 0;
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        if ch == '&' {
            if let Some(entity) = ENTITIES.iter().find(|entity| rest.starts_with(**entity)) {
                rest = &rest[entity.len()..];
                count += 1;
                continue;
            }
        }
        rest = &rest[ch.len_utf8()..];
        count += 1;
    }
    count
}

/// Trim, cap at [`MAX_TEXT_LEN`] visible characters, and HTML-entity-escape
/// `& < > " ' /` in a single pass.
///
/// An ampersand that already begins one of the entities this function emits
/// is copied through untouched and counted as one character, so sanitizing
/// twice is a no-op and never truncates already-escaped text. The live form
/// escaped sequentially and double-escaped on retry; that defect is
/// deliberately not reproduced here.
pub fn sanitize_text(raw: &str) -> String {
    let trimmed = raw.trim();

    let mut out = String::with_capacity(trimmed.len());
    let mut emitted = 0usize;
    let mut rest = trimmed;
    while let Some(ch) = rest.chars().next() {
        if emitted == MAX_TEXT_LEN {
            break;
        }
        match ch {
            '&' => {
                if let Some(entity) = ENTITIES.iter().find(|entity| rest.starts_with(**entity)) {
                    out.push_str(entity);
                    rest = &rest[entity.len()..];
                    emitted += 1;
                    continue;
                }
                out.push_str("&amp;");
            }
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
        rest = &rest[ch.len_utf8()..];
        emitted += 1;
    }

    out
}

fn sanitize_optional(field: &mut Option<String>) {
    if let Some(value) = field.take() {
        let clean = sanitize_text(&value);
        if !clean.is_empty() {
            *field = Some(clean);
        }
    }
}

impl IntakeRecord {
    /// Copy of the record with every outbound free-text field sanitized.
    ///
    /// Format-checked fields (email, phone, postcode) are trimmed only; the
    /// validator has already constrained their shape.
    pub fn sanitized(&self) -> IntakeRecord {
        let mut record = self.clone();

        record.identity.first_name = sanitize_text(&record.identity.first_name);
        record.identity.last_name = sanitize_text(&record.identity.last_name);
        sanitize_optional(&mut record.identity.pronouns);
        record.identity.email = record.identity.email.trim().to_string();
        if let Some(phone) = record.identity.phone.take() {
            record.identity.phone = Some(phone.trim().to_string()).filter(|p| !p.is_empty());
        }
        if let Some(postcode) = record.identity.postcode.take() {
            record.identity.postcode =
                Some(postcode.trim().to_string()).filter(|p| !p.is_empty());
        }

        sanitize_optional(&mut record.issues.concern_details);
        sanitize_optional(&mut record.preferences.availability);

        record
    }
}
