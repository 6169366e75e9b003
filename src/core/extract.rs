use crate::domain::model::{ParsedEmail, ParsedReview, RawRecord};

/// Value after the first colon of `line`, trimmed.
fn field_value(line: &str) -> String {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

/// Pulls `Product:` and `Review:` lines out of a review record. A repeated
/// prefix overwrites the earlier value; other lines are ignored.
pub fn extract_review(record: &RawRecord) -> ParsedReview {
    let mut parsed = ParsedReview::default();

    for line in record.as_str().split('\n') {
        if line.starts_with("Product:") {
            parsed.original_product = field_value(line);
        } else if line.starts_with("Review:") {
            parsed.review_text = field_value(line);
        }
    }

    parsed
}

/// Pulls `From:` and `To:` headers out of an email record. Every line that is
/// not a `Subject:`, `From:` or `To:` header becomes part of the body.
pub fn extract_email(record: &RawRecord) -> ParsedEmail {
    let mut parsed = ParsedEmail::default();
    let mut body = String::new();

    for line in record.as_str().split('\n') {
        if line.starts_with("From:") {
            parsed.sender = field_value(line);
        } else if line.starts_with("To:") {
            parsed.receiver = field_value(line);
        } else if !line.starts_with("Subject:") {
            body.push_str(line.trim());
            body.push(' ');
        }
    }

    parsed.body = body.trim().to_string();
    parsed
}
