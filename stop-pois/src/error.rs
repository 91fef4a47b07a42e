//! Pipeline error types.
//!
//! Every failure aborts the run; nothing is retried and no partial
//! result is reported.

/// Errors that can occur while discovering POIs along a route.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Missing or rejected configuration (address, credential, ...)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport failure talking to a provider
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider answered with an unexpected status or response shape
    #[error("{provider} provider error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    /// No candidate route name starts with the configured prefix
    #[error("no route name starts with {prefix:?}")]
    NoMatchingRoute { prefix: String },

    /// Address could not be resolved to coordinates
    #[error("could not geocode {address:?}: {reason}")]
    Geocode { address: String, reason: String },

    /// Reading or writing a cached stage failed
    #[error("cache error: {message}")]
    Cache { message: String },

    /// Writing the report failed
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl PipelineError {
    /// Shorthand for a [`PipelineError::Provider`].
    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        PipelineError::Provider {
            provider,
            message: message.into(),
        }
    }
}

/// Map a non-success HTTP status to the matching pipeline error.
///
/// Rejected credentials are a configuration problem; anything else is the
/// provider misbehaving. Bodies are truncated to keep diagnostics readable.
pub(crate) fn status_error(
    provider: &'static str,
    status: reqwest::StatusCode,
    body: &str,
) -> PipelineError {
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return PipelineError::Configuration(format!(
            "{provider} rejected the credential (HTTP {})",
            status.as_u16()
        ));
    }

    PipelineError::provider(
        provider,
        format!(
            "HTTP {}: {}",
            status.as_u16(),
            body.chars().take(500).collect::<String>()
        ),
    )
}
