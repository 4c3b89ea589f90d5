use std::sync::Arc;

use tracing::{debug, error, instrument, warn};

use crate::backend::{ContentRequest, GenerativeClient};
use crate::error::{FailureKind, FloraError};
use crate::model::PlantInfo;

/// Reply used when the model answers without any text.
pub const UNPROCESSABLE_REPLY: &str = "I'm sorry, I couldn't process that question.";

/// Reply used when the call itself fails.
pub const ERROR_REPLY: &str = "I encountered an error while thinking. Please try again.";

/// Model used for advice unless overridden.
pub const DEFAULT_ADVICE_MODEL: &str = "gemini-3-flash-preview";

/// Outcome of one advice call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advice {
    /// The model's reply, verbatim
    Answer(String),
    /// The model replied without text
    Unprocessable,
    /// The call failed before a reply was available
    Failed(FailureKind),
}

impl Advice {
    /// Text to show the user.
    pub fn text(&self) -> &str {
        match self {
            Advice::Answer(text) => text,
            Advice::Unprocessable => UNPROCESSABLE_REPLY,
            Advice::Failed(_) => ERROR_REPLY,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Advice::Answer(text) => text,
            other => other.text().to_string(),
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, Advice::Answer(_))
    }
}

/// System instruction for the advice call, naming the plant when known.
pub fn system_instruction(plant: Option<&PlantInfo>) -> String {
    match plant {
        Some(plant) => format!(
            "You are Flora, an expert botanist. The user is asking about their {} ({}). Provide concise, helpful gardening advice.",
            plant.name, plant.scientific_name
        ),
        None => {
            "You are Flora, an expert botanist. Provide concise, helpful gardening advice.".to_string()
        }
    }
}

/// Answers free-text gardening questions, grounded in the current plant when
/// there is one.
///
/// Questions are forwarded verbatim; rejecting blank input is the caller's job.
pub struct PlantAdvisor<C: ?Sized> {
    client: Arc<C>,
    model: String,
}

impl<C: GenerativeClient + ?Sized> PlantAdvisor<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            model: DEFAULT_ADVICE_MODEL.to_string(),
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    pub fn request_for(&self, question: &str, plant: Option<&PlantInfo>) -> ContentRequest {
        ContentRequest::text(question, Some(system_instruction(plant)))
            .with_model(self.model.as_str())
    }

    #[instrument(
        name = "plant_advice",
        skip(self, question, plant),
        fields(model = %self.model, question_len = question.len(), plant = ?plant.map(|p| p.name.as_str()))
    )]
    pub async fn consult(&self, question: &str, plant: Option<&PlantInfo>) -> Advice {
        let request = self.request_for(question, plant);
        match self.client.generate(&request).await {
            Ok(text) if text.is_empty() => {
                warn!("Advice reply contained no text");
                Advice::Unprocessable
            }
            Ok(text) => {
                debug!(reply_len = text.len(), "Received advice");
                Advice::Answer(text)
            }
            Err(FloraError::EmptyResponse(reason)) => {
                warn!(reason = %reason, "Advice reply contained no text");
                Advice::Unprocessable
            }
            Err(e) => {
                error!(kind = ?e.kind(), error = %e, "Error getting plant advice");
                Advice::Failed(e.kind())
            }
        }
    }

    /// Reply text for `question`: the model's answer or one of the fallbacks.
    pub async fn get_advice(&self, question: &str, plant: Option<&PlantInfo>) -> String {
        self.consult(question, plant).await.into_text()
    }
}
