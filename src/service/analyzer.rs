use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, instrument};

use crate::backend::{ContentRequest, GenerativeClient, MediaFile};
use crate::error::Result;
use crate::model::{Instructor, PlantInfo};
use crate::schema::SchemaType;
use crate::service::progress::{DEFAULT_STATUS_INTERVAL, ProgressReporter, with_rotating_status};

/// Instruction sent alongside the photo.
pub const ANALYSIS_INSTRUCTION: &str = "Analyze this plant image. Identify the plant and provide comprehensive care instructions in the specified JSON format.";

/// Model used for image analysis unless overridden.
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-3-pro-preview";

/// Turns a plant photo into a [`PlantInfo`] with a single schema-constrained call.
///
/// Every failure comes back as an `Err`; use
/// [`FloraError::kind`](crate::FloraError::kind) to tell a transport failure
/// from an empty reply or a reply that does not fit the schema. There are no
/// retries and no partial results.
pub struct PlantAnalyzer<C: ?Sized> {
    client: Arc<C>,
    model: String,
    status_interval: Duration,
}

impl<C: GenerativeClient + ?Sized> PlantAnalyzer<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            model: DEFAULT_ANALYSIS_MODEL.to_string(),
            status_interval: DEFAULT_STATUS_INTERVAL,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// How often [`analyze_image_with_progress`](Self::analyze_image_with_progress)
    /// moves to the next status line.
    pub fn status_interval(mut self, every: Duration) -> Self {
        self.status_interval = every;
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// The request sent for `image`: inline data, the fixed instruction and
    /// the [`PlantInfo`] response schema.
    pub fn request_for(&self, image: &MediaFile) -> ContentRequest {
        ContentRequest::multimodal(image.clone(), ANALYSIS_INSTRUCTION, PlantInfo::schema())
            .with_model(self.model.as_str())
    }

    #[instrument(
        name = "analyze_image",
        skip(self, image),
        fields(model = %self.model, mime_type = %image.mime_type, bytes = image.decoded_len())
    )]
    pub async fn analyze_image(&self, image: &MediaFile) -> Result<PlantInfo> {
        image.validate()?;

        let request = self.request_for(image);
        let result = match self.client.generate(&request).await {
            Ok(text) => PlantInfo::from_response(&text),
            Err(e) => Err(e),
        };

        match &result {
            Ok(plant) => info!(plant = %plant.name, "Identified plant"),
            Err(e) => error!(kind = ?e.kind(), error = %e, "Plant analysis failed"),
        }
        result
    }

    /// Like [`analyze_image`](Self::analyze_image), reporting a rotating status
    /// line to `reporter` until the call resolves.
    pub async fn analyze_image_with_progress(
        &self,
        image: &MediaFile,
        reporter: &dyn ProgressReporter,
    ) -> Result<PlantInfo> {
        with_rotating_status(self.analyze_image(image), reporter, self.status_interval).await
    }
}
