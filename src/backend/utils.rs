#[cfg(feature = "gemini")]
use crate::error::{FloraError, Result};
#[cfg(feature = "gemini")]
use reqwest::Response;
#[cfg(feature = "gemini")]
use tracing::error;

/// Extract JSON from markdown code blocks if present, otherwise return the content as-is.
///
/// Providers occasionally wrap structured output in ```json ... ``` fences
/// even when a JSON response MIME type was requested.
pub fn extract_json_from_markdown(content: &str) -> String {
    let trimmed = content.trim();

    if trimmed.starts_with("```")
        && let Some(start_idx) = trimmed.find('\n')
    {
        let after_start = &trimmed[start_idx + 1..];
        if let Some(end_idx) = after_start.rfind("```") {
            return after_start[..end_idx].trim().to_string();
        }
    }

    trimmed.to_string()
}

/// Convert a reqwest error to a FloraError, handling timeout errors specially.
#[cfg(feature = "gemini")]
pub fn handle_http_error(e: reqwest::Error, provider_name: &str) -> FloraError {
    error!(error = %e, "HTTP request to {} failed", provider_name);
    if e.is_timeout() {
        FloraError::Timeout
    } else {
        FloraError::HttpError(e)
    }
}

/// Check HTTP response status and extract error message if unsuccessful.
#[cfg(feature = "gemini")]
pub async fn check_response_status(response: Response, provider_name: &str) -> Result<Response> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await?;
        error!(
            status = %status,
            error = %error_text,
            "{} API returned error response", provider_name
        );
        return Err(FloraError::ApiError(format!(
            "{} API error ({}): {}",
            provider_name, status, error_text
        )));
    }
    Ok(response)
}

/// Macro to generate standard builder methods for provider clients.
///
/// Generates `model()`, `temperature()`, `max_tokens()` and `timeout()` over a
/// client holding `config: $config` and `client: reqwest::Client`.
#[macro_export]
macro_rules! impl_client_builder_methods {
    (
        client_type: $client:ty,
        config_type: $config:ty,
        model_type: $model:ty,
        provider_name: $provider:expr
    ) => {
        impl $client {
            /// Set the default model, used when a request names none
            #[tracing::instrument(skip(self))]
            pub fn model(mut self, model: $model) -> Self {
                tracing::debug!(
                    previous_model = ?self.config.model,
                    new_model = ?model,
                    "Setting {} model", $provider
                );
                self.config.model = model;
                self
            }

            /// Set the temperature (0.0 to 2.0, lower = more deterministic)
            #[tracing::instrument(skip(self))]
            pub fn temperature(mut self, temp: f32) -> Self {
                tracing::debug!(
                    previous_temp = ?self.config.temperature,
                    new_temp = temp,
                    "Setting temperature"
                );
                self.config.temperature = Some(temp);
                self
            }

            /// Set the maximum tokens to generate
            #[tracing::instrument(skip(self))]
            pub fn max_tokens(mut self, max: u32) -> Self {
                tracing::debug!(
                    previous_max = ?self.config.max_tokens,
                    new_max = max,
                    "Setting max_tokens"
                );
                self.config.max_tokens = Some(max.max(1));
                self
            }

            /// Set the timeout for HTTP requests.
            ///
            /// Applies to each request made by the client. Without it the
            /// transport's own defaults apply.
            #[tracing::instrument(skip(self))]
            pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
                tracing::debug!(
                    previous_timeout = ?self.config.timeout,
                    new_timeout = ?timeout,
                    "Setting timeout"
                );
                self.config.timeout = Some(timeout);

                self.client = reqwest::Client::builder()
                    .timeout(timeout)
                    .build()
                    .unwrap_or_else(|e| {
                        tracing::warn!(
                            error = %e,
                            "Failed to build reqwest client with timeout, using default"
                        );
                        reqwest::Client::new()
                    });

                self
            }
        }
    };
}
