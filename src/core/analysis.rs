//! Prompt templates and the model operations built on them.
//!
//! Every operation borrows the session mutably: all turns land in one shared
//! conversation, so the order in which these are called is part of the result.

use crate::domain::model::{EmailSummaryResult, Sentiment, SentimentResult};
use crate::domain::ports::ChatSession;
use crate::utils::error::Result;

// 舊版腳本實際送出的是 Telugu，但欄位標題寫 "Summary (DE)"；這裡以標題為準
pub const TARGET_LANGUAGE: &str = "German";

pub fn classify_prompt(text: &str) -> String {
    format!(
        "Classify the sentiment of this review as Positive, Negative, or Neutral: {}",
        text
    )
}

pub fn reply_prompt(sentiment: Sentiment, text: &str) -> String {
    format!(
        "Write a reply to this review based on the sentiment: {}. Review: {}",
        sentiment, text
    )
}

pub fn guess_product_prompt(text: &str) -> String {
    format!(
        "Guess the product name based on this review in one word: {}",
        text
    )
}

pub fn summarize_prompt(text: &str) -> String {
    format!("Summarize the following email: {}", text)
}

pub fn translate_prompt(target_language: &str, text: &str) -> String {
    format!("Translate the following text to {}: {}", target_language, text)
}

pub async fn guess_product<S: ChatSession>(session: &mut S, review_text: &str) -> Result<String> {
    session.send_message(&guess_product_prompt(review_text)).await
}

/// Classifies the review, normalizes the label and asks for a reply written
/// for that label.
pub async fn analyze_sentiment<S: ChatSession>(
    session: &mut S,
    review_text: &str,
) -> Result<SentimentResult> {
    let raw = session.send_message(&classify_prompt(review_text)).await?;
    let sentiment = Sentiment::normalize(&raw);
    if sentiment.as_str() != raw {
        tracing::debug!("Unrecognized sentiment {:?}, using {}", raw, sentiment);
    }

    let reply = session
        .send_message(&reply_prompt(sentiment, review_text))
        .await?;

    Ok(SentimentResult { sentiment, reply })
}

pub async fn summarize_email<S: ChatSession>(session: &mut S, body: &str) -> Result<String> {
    session.send_message(&summarize_prompt(body)).await
}

pub async fn translate_text<S: ChatSession>(
    session: &mut S,
    text: &str,
    target_language: &str,
) -> Result<String> {
    session
        .send_message(&translate_prompt(target_language, text))
        .await
}

/// Summarizes an email body, then translates that summary.
pub async fn summarize_and_translate<S: ChatSession>(
    session: &mut S,
    body: &str,
    target_language: &str,
) -> Result<EmailSummaryResult> {
    let summary_original_language = summarize_email(session, body).await?;
    let summary_translated =
        translate_text(session, &summary_original_language, target_language).await?;

    Ok(EmailSummaryResult {
        summary_original_language,
        summary_translated,
    })
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedSession;
    use super::*;

    #[test]
    fn test_prompt_templates() {
        assert_eq!(
            classify_prompt("Great fit"),
            "Classify the sentiment of this review as Positive, Negative, or Neutral: Great fit"
        );
        assert_eq!(
            reply_prompt(Sentiment::Negative, "Broke"),
            "Write a reply to this review based on the sentiment: Negative. Review: Broke"
        );
        assert_eq!(
            guess_product_prompt("Comfy"),
            "Guess the product name based on this review in one word: Comfy"
        );
        assert_eq!(
            summarize_prompt("Hi"),
            "Summarize the following email: Hi"
        );
        assert_eq!(
            translate_prompt("German", "Hello"),
            "Translate the following text to German: Hello"
        );
    }

    #[tokio::test]
    async fn test_analyze_sentiment_normalizes_before_reply() {
        let mut session = ScriptedSession::new(&["Pretty good!", "Thanks!"]);

        let result = analyze_sentiment(&mut session, "Nice shoes").await.unwrap();

        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.reply, "Thanks!");
        assert_eq!(
            session.prompts[1],
            "Write a reply to this review based on the sentiment: Neutral. Review: Nice shoes"
        );
    }

    #[tokio::test]
    async fn test_analyze_sentiment_keeps_known_label() {
        let mut session = ScriptedSession::new(&["Negative", "Sorry to hear that."]);

        let result = analyze_sentiment(&mut session, "Fell apart").await.unwrap();

        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(session.prompts.len(), 2);
    }

    #[tokio::test]
    async fn test_analyze_sentiment_stops_on_classify_error() {
        let mut session = ScriptedSession::new(&[]).failing_on(1);

        assert!(analyze_sentiment(&mut session, "x").await.is_err());
        assert_eq!(session.prompts.len(), 1);
    }

    #[tokio::test]
    async fn test_summarize_then_translate_summary() {
        let mut session = ScriptedSession::new(&["Order arrived.", "Bestellung angekommen."]);

        let result = summarize_and_translate(&mut session, "The order arrived today", TARGET_LANGUAGE)
            .await
            .unwrap();

        assert_eq!(result.summary_original_language, "Order arrived.");
        assert_eq!(result.summary_translated, "Bestellung angekommen.");
        assert_eq!(
            session.prompts,
            vec![
                "Summarize the following email: The order arrived today".to_string(),
                "Translate the following text to German: Order arrived.".to_string(),
            ]
        );
    }
}
