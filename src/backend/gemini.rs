use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::backend::media::{GeminiPart, build_gemini_parts};
use crate::backend::{ContentRequest, GenerativeClient, check_response_status, handle_http_error};
use crate::error::{FloraError, Result};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables consulted by [`GeminiClient::from_env`], in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Gemini models Flora knows by name.
///
/// Any other identifier can be used through `Custom` or `FromStr`:
///
/// ```rust
/// use flora::GeminiModel;
/// use std::str::FromStr;
///
/// let model = GeminiModel::from_str("gemini-exp-1206").unwrap();
/// assert_eq!(model, GeminiModel::Custom("gemini-exp-1206".to_string()));
/// assert_eq!(GeminiModel::from_string("gemini-3-pro-preview"), GeminiModel::Gemini3ProPreview);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Model {
    /// Gemini 3 Pro Preview, used for image analysis
    Gemini3ProPreview,
    /// Gemini 3 Flash Preview, used for advice
    Gemini3FlashPreview,
    Gemini25Pro,
    Gemini25Flash,
    Gemini25FlashLite,
    /// Custom model name (for new models or Gemini-compatible endpoints)
    Custom(String),
}

impl Model {
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini3ProPreview => "gemini-3-pro-preview",
            Model::Gemini3FlashPreview => "gemini-3-flash-preview",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25FlashLite => "gemini-2.5-flash-lite",
            Model::Custom(name) => name,
        }
    }

    /// Create a model from a string. Unknown names become `Custom`.
    pub fn from_string(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.as_str() {
            "gemini-3-pro-preview" => Model::Gemini3ProPreview,
            "gemini-3-flash-preview" => Model::Gemini3FlashPreview,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            _ => Model::Custom(name),
        }
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from_string(s))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::from_string(s)
    }
}

impl From<Model> for String {
    fn from(model: Model) -> Self {
        model.as_str().to_string()
    }
}

/// Reasoning depth for Gemini 3 models. Ignored by older models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThinkingLevel {
    Low,
    High,
}

impl ThinkingLevel {
    fn as_str(self) -> &'static str {
        match self {
            ThinkingLevel::Low => "low",
            ThinkingLevel::High => "high",
        }
    }
}

/// Configuration for the Gemini client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Default model when a request does not name one
    pub model: Model,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout: Option<Duration>,
    /// Defaults to "https://generativelanguage.googleapis.com/v1beta" if not set
    pub base_url: Option<String>,
    pub thinking_level: Option<ThinkingLevel>,
}

impl GeminiConfig {
    fn with_key(api_key: String) -> Self {
        Self {
            api_key,
            model: Model::Gemini3FlashPreview,
            temperature: None,
            max_tokens: None,
            timeout: None,
            base_url: None,
            thinking_level: None,
        }
    }
}

/// Gemini REST client implementing [`GenerativeClient`].
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_level: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

impl GeminiClient {
    /// Create a new Gemini client with the provided API key.
    ///
    /// ```no_run
    /// # use flora::GeminiClient;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiClient::new("your-gemini-api-key")?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_new", skip(api_key))]
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FloraError::ConfigError(
                "API key cannot be empty. Use GeminiClient::from_env() to read it from GEMINI_API_KEY.".to_string(),
            ));
        }

        let config = GeminiConfig::with_key(api_key);
        info!(model = %config.model.as_str(), "Created Gemini client");

        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    /// Create a client from `GEMINI_API_KEY`, falling back to `API_KEY`.
    #[instrument(name = "gemini_client_from_env")]
    pub fn from_env() -> Result<Self> {
        let api_key = API_KEY_ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
            .ok_or_else(|| {
                FloraError::ConfigError(format!(
                    "none of {} is set",
                    API_KEY_ENV_VARS.join(", ")
                ))
            })?;

        Self::new(api_key)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn model_for<'a>(&'a self, request: &'a ContentRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or_else(|| self.config.model.as_str())
    }

    fn endpoint(&self, model: &str) -> String {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        format!("{}/models/{}:generateContent", base_url, model)
    }

    fn build_request(&self, request: &ContentRequest, model: &str) -> Result<GenerateContentRequest> {
        let thinking_config = if model.starts_with("gemini-3") {
            self.config
                .thinking_level
                .map(|level| ThinkingConfig {
                    thinking_level: level.as_str(),
                })
        } else {
            None
        };

        let generation_config = GenerationConfig {
            temperature: self.config.temperature,
            max_output_tokens: self.config.max_tokens,
            response_mime_type: request.expects_json().then_some("application/json"),
            response_schema: request.response_schema.as_ref().map(|s| s.to_json().clone()),
            thinking_config,
        };

        let system_instruction = request.system_instruction.as_ref().map(|text| Content {
            role: None,
            parts: vec![GeminiPart::Text { text: text.clone() }],
        });

        Ok(GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: build_gemini_parts(request)?,
            }],
            system_instruction,
            generation_config,
        })
    }
}

/// Concatenate the non-thought text parts of the first candidate.
fn extract_text(completion: GenerateContentResponse) -> Result<String> {
    let Some(candidate) = completion.candidates.into_iter().next() else {
        error!("Gemini API returned empty candidates array");
        return Err(FloraError::EmptyResponse(
            "No completion candidates returned".to_string(),
        ));
    };
    trace!(finish_reason = ?candidate.finish_reason, "Completion finish reason");

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|part| !part.thought)
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        warn!(finish_reason = ?candidate.finish_reason, "No text content in Gemini response");
        return Err(FloraError::EmptyResponse(
            "No text content in response".to_string(),
        ));
    }
    Ok(text)
}

crate::impl_client_builder_methods! {
    client_type: GeminiClient,
    config_type: GeminiConfig,
    model_type: Model,
    provider_name: "Gemini"
}

impl GeminiClient {
    /// Set a custom base URL for Gemini-compatible APIs (no trailing slash needed).
    #[tracing::instrument(skip(self, base_url))]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url_str = base_url.into();
        tracing::debug!(
            previous_base_url = ?self.config.base_url,
            new_base_url = %base_url_str,
            "Setting custom base URL"
        );
        self.config.base_url = Some(base_url_str);
        self
    }

    /// Set the thinking level sent to Gemini 3 models.
    #[tracing::instrument(skip(self))]
    pub fn thinking_level(mut self, level: ThinkingLevel) -> Self {
        tracing::debug!(
            previous_level = ?self.config.thinking_level,
            new_level = ?level,
            "Setting thinking level"
        );
        self.config.thinking_level = Some(level);
        self
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    #[instrument(
        name = "gemini_generate",
        skip(self, request),
        fields(
            model = %self.model_for(request),
            parts = request.parts.len(),
            structured = request.expects_json()
        )
    )]
    async fn generate(&self, request: &ContentRequest) -> Result<String> {
        let model = self.model_for(request);
        let body = self.build_request(request, model)?;
        let url = self.endpoint(model);

        debug!(url = %url, "Sending request to Gemini API");
        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.config.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| handle_http_error(e, "Gemini"))?;

        let response = check_response_status(response, "Gemini").await?;

        debug!("Successfully received response from Gemini API");
        let completion: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse JSON response from Gemini API");
            handle_http_error(e, "Gemini")
        })?;

        let text = extract_text(completion)?;
        debug!(content_len = text.len(), "Extracted text content from response");
        Ok(text)
    }
}
