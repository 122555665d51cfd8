//! Remote text-generation client

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::EstimatorError;
use crate::config::EstimatorSettings;

/// A remote service that turns a prompt into text
#[async_trait]
pub trait RemoteEstimator: Send + Sync {
    /// Send one prompt and return the raw text answer
    async fn complete(&self, prompt: &str) -> Result<String, EstimatorError>;
}

// ============================================================================
// Request/response bodies for the generateContent endpoint
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
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
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client for a Gemini-compatible `generateContent` endpoint
pub struct GenAiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GenAiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Build from settings, reading the API key from the environment
    pub fn from_settings(settings: &EstimatorSettings) -> Result<Self, EstimatorError> {
        let api_key = settings
            .api_key()
            .ok_or_else(|| EstimatorError::MissingApiKey(settings.api_key_env.clone()))?;
        Ok(Self::new(api_key, settings.model.clone(), settings.endpoint.clone()))
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint.trim_end_matches('/'), self.model)
    }
}

#[async_trait]
impl RemoteEstimator for GenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, EstimatorError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!("Requesting estimate from model {}", self.model);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EstimatorError::Status(status.as_u16()));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed.into_text().ok_or(EstimatorError::EmptyResponse)
    }
}
