use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;
use serde::Deserialize;
use reqwest::Client;
use tracing::{info, error};

use crate::config::Config;
use crate::models::{MarketingContent, ProductDetails};
use crate::prompt::{InstructionMode, PromptParts};
use crate::schema::RESPONSE_SCHEMA;

pub const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")] Http(String),
    #[error("status={status} body={body}")] Status { status: u16, body: String },
    #[error("unexpected response envelope: {0}")] Envelope(String),
    #[error("no text content found in response")] EmptyResponse,
    #[error("response is not JSON: {0}")] NotJson(String),
    #[error("response does not match schema: {0}")] Schema(String),
}

/// The only error callers ever see. The cause has already been logged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Failed to generate marketing content.")]
pub struct GenerationFailed;

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, details: &ProductDetails) -> Result<MarketingContent, GenerationFailed>;
}

// Keeps long model replies readable in the log.
fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...[{} chars]", &text[..idx], text.chars().count()),
        None => text.to_string(),
    }
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    instruction_mode: InstructionMode,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeminiError::Http(e.to_string()))?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_base.clone(),
            model: config.model.clone(),
            instruction_mode: config.instruction_mode,
        })
    }

    pub fn request_body(parts: &PromptParts) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": parts.contents}]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": RESPONSE_SCHEMA.to_json(),
                "temperature": TEMPERATURE
            }
        });
        if let Some(instruction) = parts.system_instruction {
            body["systemInstruction"] = json!({ "parts": [{"text": instruction}] });
        }
        body
    }

    async fn perform_api_call(&self, parts: &PromptParts) -> Result<String, GeminiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        info!("🔗 Making request to: {}", url.replace(&self.api_key, "***"));

        let request_body = Self::request_body(parts);

        let response = self.client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GeminiError::Http(e.to_string()))?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        let response_text = response.text().await
            .map_err(|e| GeminiError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(GeminiError::Status { status: status.as_u16(), body: preview(&response_text, 500) });
        }

        info!("📥 Raw Gemini API response: {}", preview(&response_text, 1000));

        let parsed: GeminiResponse = serde_json::from_str(&response_text)
            .map_err(|e| GeminiError::Envelope(e.to_string()))?;

        extract_text(&parsed).ok_or(GeminiError::EmptyResponse)
    }

    pub async fn generate_marketing_content(&self, details: &ProductDetails) -> Result<MarketingContent, GeminiError> {
        let parts = PromptParts::for_product(details, self.instruction_mode);
        info!("🎯 Generating marketing content for '{}' ({})", details.product_name, details.category);
        let text = self.perform_api_call(&parts).await?;
        parse_content(&text)
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate(&self, details: &ProductDetails) -> Result<MarketingContent, GenerationFailed> {
        match self.generate_marketing_content(details).await {
            Ok(content) => {
                info!("✅ Marketing content generated: {} USPs, {} hashtags", content.unique_selling_points.len(), content.hashtags.len());
                Ok(content)
            }
            Err(e) => {
                error!("❌ Error generating content with Gemini API: {}", e);
                Err(GenerationFailed)
            }
        }
    }
}

/// Decodes the model's text payload. Anything that does not open with `{` or `[`
/// is rejected before parsing; a missing field counts as a schema failure.
pub fn parse_content(text: &str) -> Result<MarketingContent, GeminiError> {
    let trimmed = text.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return Err(GeminiError::NotJson(preview(trimmed, 120)));
    }
    serde_json::from_str(trimmed).map_err(|e| {
        if e.is_syntax() || e.is_eof() {
            GeminiError::NotJson(e.to_string())
        } else {
            GeminiError::Schema(e.to_string())
        }
    })
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate { #[serde(default)] content: Content }

#[derive(Debug, Deserialize, Default)]
struct Content { #[serde(default)] parts: Vec<Part> }

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    #[allow(dead_code)]
    Other(Value),
}

/// Text parts of the first candidate, concatenated.
fn extract_text(resp: &GeminiResponse) -> Option<String> {
    let candidate = resp.candidates.first()?;
    let text: String = candidate.content.parts.iter()
        .filter_map(|p| match p {
            Part::Text { text } => Some(text.as_str()),
            Part::Other(_) => None,
        })
        .collect();
    if text.trim().is_empty() { None } else { Some(text) }
}
