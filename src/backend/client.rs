use async_trait::async_trait;
use std::sync::Arc;

use crate::backend::MediaFile;
use crate::error::Result;
use crate::schema::Schema;

/// GenerativeClient is the seam between Flora and a generative-AI provider.
///
/// A provider receives a [`ContentRequest`] and answers with the text of its
/// reply. Implementations report a reply without text as
/// [`FloraError::EmptyResponse`](crate::FloraError::EmptyResponse) and any
/// network or provider failure as a transport error; they never interpret the
/// text themselves.
///
/// The crate ships [`GeminiClient`](crate::GeminiClient). Tests substitute a
/// scripted implementation:
///
/// ```
/// use async_trait::async_trait;
/// use flora::{ContentRequest, GenerativeClient, Result};
///
/// struct Echo;
///
/// #[async_trait]
/// impl GenerativeClient for Echo {
///     async fn generate(&self, request: &ContentRequest) -> Result<String> {
///         Ok(request.text_parts().collect::<Vec<_>>().join(" "))
///     }
/// }
/// ```
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Send one request and return the reply text verbatim.
    async fn generate(&self, request: &ContentRequest) -> Result<String>;
}

#[async_trait]
impl<C: GenerativeClient + ?Sized> GenerativeClient for Arc<C> {
    async fn generate(&self, request: &ContentRequest) -> Result<String> {
        (**self).generate(request).await
    }
}

/// One piece of request content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    InlineData(MediaFile),
}

/// A provider-neutral generation request.
///
/// `model` overrides the client's configured default when set. A request with
/// a `response_schema` asks for JSON output constrained to that schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRequest {
    pub model: Option<String>,
    pub parts: Vec<ContentPart>,
    pub system_instruction: Option<String>,
    pub response_schema: Option<Schema>,
}

impl ContentRequest {
    /// Inline media followed by an instruction, answered as schema-constrained JSON.
    pub fn multimodal(media: MediaFile, instruction: impl Into<String>, schema: Schema) -> Self {
        Self {
            model: None,
            parts: vec![
                ContentPart::InlineData(media),
                ContentPart::Text(instruction.into()),
            ],
            system_instruction: None,
            response_schema: Some(schema),
        }
    }

    /// Plain text prompt with an optional system instruction, answered as free text.
    pub fn text(prompt: impl Into<String>, system_instruction: Option<String>) -> Self {
        Self {
            model: None,
            parts: vec![ContentPart::Text(prompt.into())],
            system_instruction,
            response_schema: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn text_parts(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|part| match part {
            ContentPart::Text(text) => Some(text.as_str()),
            ContentPart::InlineData(_) => None,
        })
    }

    pub fn media(&self) -> impl Iterator<Item = &MediaFile> {
        self.parts.iter().filter_map(|part| match part {
            ContentPart::InlineData(media) => Some(media),
            ContentPart::Text(_) => None,
        })
    }

    pub fn expects_json(&self) -> bool {
        self.response_schema.is_some()
    }
}
