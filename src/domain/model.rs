use serde::{Deserialize, Serialize};
use std::fmt;

/// One delimiter-separated block of input text, already trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord(String);

impl RawRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReview {
    pub original_product: String,
    pub review_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEmail {
    pub sender: String,
    pub receiver: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    /// Maps raw model text onto the label set. Only an exact, case-sensitive
    /// label is accepted; anything else falls back to `Neutral`.
    pub fn normalize(raw: &str) -> Self {
        match raw {
            "Positive" => Sentiment::Positive,
            "Negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    pub reply: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSummaryResult {
    pub summary_original_language: String,
    pub summary_translated: String,
}

/// A flat output row with a fixed column header.
pub trait TabularRow: Serialize {
    const HEADERS: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRow {
    pub original_product: String,
    pub guessed_product: String,
    pub review: String,
    pub sentiment: Sentiment,
    pub reply: String,
}

impl TabularRow for ReviewRow {
    const HEADERS: &'static [&'static str] = &[
        "Original Product",
        "Guessed Product",
        "Review",
        "Sentiment",
        "Reply",
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRow {
    pub sender: String,
    pub receiver: String,
    pub summary_en: String,
    pub summary_translated: String,
}

impl TabularRow for EmailRow {
    const HEADERS: &'static [&'static str] =
        &["Sender", "Receiver", "Summary (EN)", "Summary (DE)"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_accepts_exact_labels() {
        assert_eq!(Sentiment::normalize("Positive"), Sentiment::Positive);
        assert_eq!(Sentiment::normalize("Negative"), Sentiment::Negative);
        assert_eq!(Sentiment::normalize("Neutral"), Sentiment::Neutral);
    }

    #[test]
    fn test_normalize_falls_back_to_neutral() {
        for raw in ["Pretty good!", "positive", "NEGATIVE", "Positive.", " Negative", ""] {
            assert_eq!(Sentiment::normalize(raw), Sentiment::Neutral, "input {:?}", raw);
        }
    }

    #[test]
    fn test_normalize_is_identity_only_on_labels() {
        for raw in ["Positive", "Negative", "Neutral", "Mixed", "Sentiment: Positive"] {
            let normalized = Sentiment::normalize(raw);
            assert_eq!(normalized.as_str() == raw, ["Positive", "Negative", "Neutral"].contains(&raw));
        }
    }

    #[test]
    fn test_sentiment_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Sentiment::Negative).unwrap(), "\"Negative\"");
        assert_eq!(Sentiment::Positive.to_string(), "Positive");
    }
}
