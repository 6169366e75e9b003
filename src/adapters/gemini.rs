//! Gemini `generateContent` client.
//!
//! The REST endpoint is stateless, so the chat session keeps the turn
//! history itself and resends it with every message.

use crate::core::ChatSession;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 8192,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    fn text(role: &str, text: &str) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: &'a [Content],
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Connection settings shared by every session it starts.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    generation_config: GenerationConfig,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            generation_config: GenerationConfig::default(),
        }
    }

    /// Reads the key from `GEMINI_API_KEY`; a missing or blank key is fatal.
    pub fn from_env() -> Result<Self> {
        let api_key = crate::utils::validation::validate_required_secret(
            API_KEY_ENV,
            std::env::var(API_KEY_ENV).ok(),
        )?;
        Ok(Self::new(api_key))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn generation_config(&self) -> GenerationConfig {
        self.generation_config
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    pub fn start_chat(&self) -> GeminiChatSession {
        GeminiChatSession {
            client: self.clone(),
            history: Vec::new(),
        }
    }
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("generation_config", &self.generation_config)
            .finish()
    }
}

/// One conversation. History only grows on successful turns.
#[derive(Debug)]
pub struct GeminiChatSession {
    client: GeminiClient,
    history: Vec<Content>,
}

impl GeminiChatSession {
    pub fn history(&self) -> &[Content] {
        &self.history
    }
}

#[async_trait]
impl ChatSession for GeminiChatSession {
    async fn send_message(&mut self, message: &str) -> Result<String> {
        let mut contents = self.history.clone();
        contents.push(Content::text("user", message));

        let request = GenerateContentRequest {
            contents: &contents,
            generation_config: self.client.generation_config,
        };

        tracing::debug!(
            "Sending turn {} to model {}",
            self.history.len() / 2 + 1,
            self.client.model
        );
        let response = self
            .client
            .client
            .post(self.client.endpoint())
            // 金鑰放在標頭，避免出現在錯誤訊息的 URL 裡
            .header(API_KEY_HEADER, self.client.api_key.as_str())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(EtlError::AuthError { message: body });
            }
            return Err(EtlError::ModelError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        let text = parsed.text().ok_or_else(|| EtlError::ModelError {
            status: status.as_u16(),
            message: "response contained no candidate text".to_string(),
        })?;

        self.history.push(Content::text("user", message));
        self.history.push(Content::text("model", &text));

        Ok(text.trim().to_string())
    }
}
