//! Session state: the current plant and its conversation.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::backend::{GenerativeClient, MediaFile};
use crate::error::{FloraError, Result};
use crate::model::{ConversationLog, Message, PlantInfo};
use crate::service::{PlantAdvisor, PlantAnalyzer, ProgressReporter};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No plant identified yet
    Empty,
    /// A plant is identified and only the welcome message has been shown
    Identified,
    /// Questions have been asked about the current plant
    Conversing,
}

/// Owns the current [`PlantInfo`] and its [`ConversationLog`].
///
/// All methods take `&self`, so a session can be shared between tasks. Each
/// message is appended under one write lock, and the user's message is in the
/// log before the advice call it triggers is sent.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use flora::{GeminiClient, MediaFile, PlantSession};
/// # async fn example() -> flora::Result<()> {
/// let session = PlantSession::new(Arc::new(GeminiClient::from_env()?));
/// let photo = MediaFile::from_bytes(&std::fs::read("monstera.jpg").unwrap(), "image/jpeg");
///
/// let plant = session.identify(&photo).await?;
/// println!("{} ({})", plant.name, plant.scientific_name);
///
/// let reply = session.ask("How often should I water?").await?;
/// println!("{}", reply.text);
/// # Ok(())
/// # }
/// ```
pub struct PlantSession<C: ?Sized> {
    analyzer: PlantAnalyzer<C>,
    advisor: PlantAdvisor<C>,
    // Lock order: `plant` before `log`.
    plant: RwLock<Option<Arc<PlantInfo>>>,
    log: RwLock<ConversationLog>,
}

impl<C: GenerativeClient + ?Sized> PlantSession<C> {
    /// Session whose analyzer and advisor share `client`, with default models.
    pub fn new(client: Arc<C>) -> Self {
        Self::with_components(PlantAnalyzer::new(client.clone()), PlantAdvisor::new(client))
    }

    pub fn with_components(analyzer: PlantAnalyzer<C>, advisor: PlantAdvisor<C>) -> Self {
        Self {
            analyzer,
            advisor,
            plant: RwLock::new(None),
            log: RwLock::new(ConversationLog::new()),
        }
    }

    pub fn analyzer(&self) -> &PlantAnalyzer<C> {
        &self.analyzer
    }

    pub fn advisor(&self) -> &PlantAdvisor<C> {
        &self.advisor
    }

    /// Identify the plant in `image` and start a fresh conversation about it.
    ///
    /// On failure the previous plant and conversation are left untouched.
    pub async fn identify(&self, image: &MediaFile) -> Result<Arc<PlantInfo>> {
        let plant = self.analyzer.analyze_image(image).await?;
        Ok(self.install(plant).await)
    }

    /// [`identify`](Self::identify) with rotating status lines sent to `reporter`.
    pub async fn identify_with_progress(
        &self,
        image: &MediaFile,
        reporter: &dyn ProgressReporter,
    ) -> Result<Arc<PlantInfo>> {
        let plant = self
            .analyzer
            .analyze_image_with_progress(image, reporter)
            .await?;
        Ok(self.install(plant).await)
    }

    async fn install(&self, plant: PlantInfo) -> Arc<PlantInfo> {
        let plant = Arc::new(plant);
        let mut current = self.plant.write().await;
        let mut log = self.log.write().await;
        *current = Some(plant.clone());
        log.reset(&plant);
        info!(plant = %plant.name, epoch = log.epoch(), "Started new conversation");
        plant
    }

    /// Ask a question about the current plant and return the assistant's reply.
    ///
    /// Blank questions are rejected with [`FloraError::ValidationError`] and
    /// leave the log untouched. Otherwise the question is logged as a user
    /// message, the advisor is consulted, and the reply is logged after it.
    /// A reply that arrives after a new plant was identified is returned but
    /// not added to the new conversation.
    #[instrument(name = "session_ask", skip(self, question), fields(question_len = question.len()))]
    pub async fn ask(&self, question: &str) -> Result<Message> {
        if question.trim().is_empty() {
            return Err(FloraError::ValidationError(
                "question cannot be empty".to_string(),
            ));
        }

        // The question must land in the conversation of the plant it is asked about.
        let (plant, epoch) = {
            let current = self.plant.read().await;
            let mut log = self.log.write().await;
            log.append(Message::user(question));
            (current.clone(), log.epoch())
        };

        let advice = self.advisor.consult(question, plant.as_deref()).await;
        let reply = Message::assistant(advice.into_text());

        let mut log = self.log.write().await;
        if log.epoch() == epoch {
            log.append(reply.clone());
            debug!(messages = log.len(), "Appended assistant reply");
        } else {
            warn!(
                asked_in = epoch,
                current = log.epoch(),
                "Conversation was reset while waiting for advice; reply not logged"
            );
        }
        Ok(reply)
    }

    pub async fn plant(&self) -> Option<Arc<PlantInfo>> {
        self.plant.read().await.clone()
    }

    /// Snapshot of the conversation, oldest first.
    pub async fn messages(&self) -> Vec<Message> {
        self.log.read().await.messages().to_vec()
    }

    pub async fn state(&self) -> SessionState {
        let plant = self.plant.read().await;
        let log = self.log.read().await;
        match (plant.as_ref(), log.len()) {
            (None, _) => SessionState::Empty,
            (Some(_), 0 | 1) => SessionState::Identified,
            (Some(_), _) => SessionState::Conversing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ContentRequest;
    use crate::model::PlantCareGuide;
    use async_trait::async_trait;

    struct FixedReply(&'static str);

    #[async_trait]
    impl GenerativeClient for FixedReply {
        async fn generate(&self, _request: &ContentRequest) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn fern() -> PlantInfo {
        PlantInfo {
            name: "Boston Fern".to_string(),
            scientific_name: "Nephrolepis exaltata".to_string(),
            description: "A lush, arching fern.".to_string(),
            care_guide: PlantCareGuide {
                watering: "Keep soil evenly moist".to_string(),
                sunlight: "Bright, indirect light".to_string(),
                temperature: "16-24°C".to_string(),
                humidity: "High".to_string(),
                soil: "Peat-based mix".to_string(),
                fertilizer: "Monthly in spring and summer".to_string(),
            },
            toxicity: "Non-toxic to pets".to_string(),
            common_issues: vec!["Browning fronds".to_string()],
        }
    }

    #[tokio::test]
    async fn test_plant_cannot_change_before_question_is_logged() {
        let session = Arc::new(PlantSession::new(Arc::new(FixedReply("Near a shower."))));
        session.install(fern()).await;

        let log_guard = session.log.write().await;
        let asking = tokio::spawn({
            let session = session.clone();
            async move { session.ask("Where should it go?").await }
        });
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        // `ask` is parked on the log lock and still pins the current plant
        assert!(session.plant.try_write().is_err());

        drop(log_guard);
        let reply = asking.await.unwrap().unwrap();
        assert_eq!(reply.text, "Near a shower.");

        let messages = session.messages().await;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].text, "Where should it go?");
    }
}
