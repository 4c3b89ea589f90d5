pub mod client;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod media;
pub mod utils;

pub use client::{ContentPart, ContentRequest, GenerativeClient};
#[cfg(feature = "gemini")]
pub use gemini::{GeminiClient, GeminiConfig, Model as GeminiModel, ThinkingLevel};
pub use media::MediaFile;
pub use utils::extract_json_from_markdown;
#[cfg(feature = "gemini")]
pub use utils::{check_response_status, handle_http_error};
