//! Flora: identify plants from photos and chat about their care
//!
//! # Overview
//!
//! Flora sends a plant photo to a generative model constrained to a JSON
//! schema, parses the reply into a typed [`PlantInfo`], and keeps a
//! conversation about that plant in a [`PlantSession`].
//!
//! - [`PlantAnalyzer`] makes the image analysis call
//! - [`PlantAdvisor`] answers free-text questions, grounded in the current plant
//! - [`PlantSession`] owns the current plant and its conversation log
//! - [`GenerativeClient`] is the provider seam; [`GeminiClient`] implements it
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use flora::{GeminiClient, MediaFile, PlantSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(GeminiClient::from_env()?);
//!     let session = PlantSession::new(client);
//!
//!     let photo = MediaFile::from_bytes(&std::fs::read("fern.jpg")?, "image/jpeg");
//!     let plant = session.identify(&photo).await?;
//!     println!("Watering: {}", plant.care_guide.watering);
//!
//!     let reply = session.ask("Can it live in a bathroom?").await?;
//!     println!("{}", reply.text);
//!     Ok(())
//! }
//! ```

mod backend;
mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod model;
pub mod schema;
pub mod service;
mod session;

pub use backend::{ContentPart, ContentRequest, GenerativeClient, MediaFile, extract_json_from_markdown};
#[cfg(feature = "gemini")]
pub use backend::{GeminiClient, GeminiConfig, GeminiModel, ThinkingLevel};
pub use error::{FailureKind, FloraError, Result};
pub use model::{ConversationLog, Instructor, Message, PlantCareGuide, PlantInfo, Role};
pub use schema::{Schema, SchemaBuilder, SchemaType};
pub use service::{
    ANALYSIS_INSTRUCTION, Advice, ERROR_REPLY, PlantAdvisor, PlantAnalyzer, ProgressReporter,
    UNPROCESSABLE_REPLY,
};
pub use session::{PlantSession, SessionState};
