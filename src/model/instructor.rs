use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, trace};

use crate::backend::extract_json_from_markdown;
use crate::error::{FloraError, Result};
use crate::schema::SchemaType;

/// The `Instructor` trait combines JSON schema generation, deserialization,
/// and validation for a type the model is asked to produce.
///
/// The schema tells the provider what shape to emit. The provider is trusted to
/// honour it only as far as [`Instructor::from_response`] can check: the text
/// must parse, must deserialize into `Self`, and must pass [`Instructor::validate`].
///
/// ```
/// use flora::{FloraError, Instructor, Schema, SchemaBuilder, SchemaType};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Debug)]
/// struct Leaf {
///     shape: String,
/// }
///
/// impl SchemaType for Leaf {
///     fn schema() -> Schema {
///         SchemaBuilder::object().string_property("shape", "Leaf shape").build()
///     }
/// }
///
/// impl Instructor for Leaf {
///     fn validate(&self) -> flora::Result<()> {
///         if self.shape.trim().is_empty() {
///             return Err(FloraError::SchemaViolation("shape is blank".into()));
///         }
///         Ok(())
///     }
/// }
///
/// let leaf = Leaf::from_response("```json\n{\"shape\": \"cordate\"}\n```").unwrap();
/// assert_eq!(leaf.shape, "cordate");
/// assert!(Leaf::from_response("{\"shape\": \" \"}").is_err());
/// ```
pub trait Instructor: SchemaType + DeserializeOwned + Serialize {
    /// Checks beyond what deserialization enforces. Defaults to accepting.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Parse raw model output into `Self`.
    ///
    /// Blank text is an [`FloraError::EmptyResponse`]; anything that fails to
    /// parse, deserialize or validate is a [`FloraError::SchemaViolation`].
    fn from_response(text: &str) -> Result<Self> {
        let json_content = extract_json_from_markdown(text);
        if json_content.is_empty() {
            return Err(FloraError::EmptyResponse(
                "No text content in response".to_string(),
            ));
        }

        trace!(json = %json_content, "Attempting to parse response as JSON");
        let parsed: Self = serde_json::from_str(&json_content).map_err(|e| {
            error!(error = %e, partial_json = %json_content, "JSON parsing error");
            FloraError::SchemaViolation(format!("Failed to parse response: {}", e))
        })?;

        parsed.validate().map_err(|e| {
            error!(error = %e, "Structured output failed validation");
            match e {
                FloraError::SchemaViolation(_) => e,
                other => FloraError::SchemaViolation(other.to_string()),
            }
        })?;

        Ok(parsed)
    }
}
