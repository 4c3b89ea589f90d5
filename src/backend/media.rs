use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
#[cfg(feature = "gemini")]
use serde::Serialize;

#[cfg(feature = "gemini")]
use crate::backend::{ContentPart, ContentRequest};
use crate::error::{FloraError, Result};

/// Image data sent inline with a request, base64-encoded.
///
/// The MIME type is trusted from the caller and must match the encoding of the
/// bytes; it is forwarded to the provider unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub data: String,
    pub mime_type: String,
}

impl MediaFile {
    /// Wrap data that is already base64-encoded.
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Encode raw image bytes.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self::new(STANDARD.encode(bytes), mime_type)
    }

    /// Split a `data:<mime>;base64,<payload>` URL, as produced by browser file readers.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url.strip_prefix("data:").ok_or_else(|| {
            FloraError::ValidationError("data URL must start with `data:`".to_string())
        })?;
        let (header, payload) = rest.split_once(',').ok_or_else(|| {
            FloraError::ValidationError("data URL has no `,` separator".to_string())
        })?;
        let mime_type = header.strip_suffix(";base64").ok_or_else(|| {
            FloraError::ValidationError("only base64 data URLs are supported".to_string())
        })?;

        let media = Self::new(payload, mime_type);
        media.validate()?;
        Ok(media)
    }

    /// Reject media the provider could never accept.
    pub fn validate(&self) -> Result<()> {
        if self.data.is_empty() {
            return Err(FloraError::ValidationError(
                "MediaFile inline data cannot be empty".to_string(),
            ));
        }
        if self.mime_type.is_empty() {
            return Err(FloraError::ValidationError(
                "MediaFile mime_type cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Approximate decoded size in bytes.
    pub fn decoded_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        (self.data.len() / 4 * 3).saturating_sub(padding)
    }
}

#[cfg(feature = "gemini")]
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum GeminiPart {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
    Text {
        text: String,
    },
}

#[cfg(feature = "gemini")]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiInlineData {
    pub(crate) mime_type: String,
    pub(crate) data: String,
}

#[cfg(feature = "gemini")]
pub(crate) fn build_gemini_parts(request: &ContentRequest) -> Result<Vec<GeminiPart>> {
    let mut parts = Vec::with_capacity(request.parts.len());
    for part in &request.parts {
        match part {
            ContentPart::Text(text) => parts.push(GeminiPart::Text { text: text.clone() }),
            ContentPart::InlineData(media) => {
                media.validate()?;
                parts.push(GeminiPart::InlineData {
                    inline_data: GeminiInlineData {
                        mime_type: media.mime_type.clone(),
                        data: media.data.clone(),
                    },
                });
            }
        }
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "gemini")]
    use crate::schema::Schema;
    #[cfg(feature = "gemini")]
    use serde_json::json;

    #[test]
    fn test_from_bytes_encodes_base64() {
        let media = MediaFile::from_bytes(b"abc", "image/png");
        assert_eq!(media.data, "YWJj");
        assert_eq!(media.mime_type, "image/png");
        assert_eq!(media.decoded_len(), 3);
    }

    #[test]
    fn test_from_data_url() {
        let media = MediaFile::from_data_url("data:image/jpeg;base64,YWJj").unwrap();
        assert_eq!(media.mime_type, "image/jpeg");
        assert_eq!(media.data, "YWJj");
    }

    #[test]
    fn test_from_data_url_rejects_malformed_input() {
        for url in [
            "image/jpeg;base64,YWJj",
            "data:image/jpeg;base64",
            "data:image/svg+xml,<svg/>",
            "data:image/png;base64,",
        ] {
            let err = MediaFile::from_data_url(url).unwrap_err();
            assert!(
                matches!(err, FloraError::ValidationError(_)),
                "{url} should be rejected, got {err:?}"
            );
        }
    }

    #[cfg(feature = "gemini")]
    #[test]
    fn test_gemini_parts_serialize_inline_data() {
        let request = ContentRequest::multimodal(
            MediaFile::from_bytes(b"abc", "image/png"),
            "describe image",
            Schema::new(json!({ "type": "object" })),
        );
        let parts = build_gemini_parts(&request).unwrap();
        let json = serde_json::to_value(&parts).unwrap();
        assert_eq!(json[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(json[0]["inlineData"]["data"], "YWJj");
        assert_eq!(json[1]["text"], "describe image");
    }

    #[cfg(feature = "gemini")]
    #[test]
    fn test_gemini_parts_reject_empty_media() {
        let request = ContentRequest::multimodal(
            MediaFile::new("", "image/png"),
            "describe image",
            Schema::new(json!({ "type": "object" })),
        );
        assert!(build_gemini_parts(&request).is_err());
    }
}
