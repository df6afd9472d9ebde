use crate::config::GeminiSettings;
use crate::domain::ports::LessonGenerator;
use crate::utils::error::{LessonError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

/// Returned when the API answers with the expected shape but no usable text.
pub const NO_CONTENT: &str = "(no content)";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
    pub total_token_count: Option<u32>,
}

impl GenerateResponse {
    /// Text of `candidates[0].content.parts[0]`. A missing path is an API error;
    /// a present but empty text falls back to [`NO_CONTENT`].
    pub fn first_text(&self) -> Result<String> {
        let part = self
            .candidates
            .first()
            .ok_or_else(|| api_error("response has no candidates"))?
            .content
            .as_ref()
            .ok_or_else(|| api_error("first candidate has no content"))?
            .parts
            .first()
            .ok_or_else(|| api_error("first candidate has no parts"))?;

        Ok(match part.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => NO_CONTENT.to_string(),
        })
    }
}

fn api_error(message: &str) -> LessonError {
    LessonError::ApiError {
        message: message.to_string(),
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings) -> Self {
        Self {
            client: Client::new(),
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
        }
    }
}

#[async_trait]
impl LessonGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!("Making generation request to: {}", self.endpoint);
        let response = self
            .client
            .post(self.endpoint.clone())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Generation API response status: {}", status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LessonError::HttpStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        let decoded: GenerateResponse = serde_json::from_str(&raw).map_err(|e| {
            LessonError::ApiError {
                message: format!("response is not valid generateContent JSON: {}", e),
            }
        })?;

        if let Some(usage) = &decoded.usage_metadata {
            tracing::debug!(
                "Token usage: prompt={:?}, candidates={:?}, total={:?}",
                usage.prompt_token_count,
                usage.candidates_token_count,
                usage.total_token_count
            );
        }

        decoded.first_text()
    }
}
