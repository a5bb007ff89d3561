use thiserror::Error;

/// Failures surfaced by the lookup pipeline.
///
/// Reverse geocoding never produces one of these: it degrades to a generic
/// location instead.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request could not be sent, or the server answered with a non-success status.
    #[error("{endpoint} request failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },

    /// A place search produced no candidate.
    #[error("City not found: '{query}'")]
    NotFound { query: String },

    /// A 200 response whose body lacks data the pipeline needs.
    #[error("Malformed {endpoint} response: {message}")]
    MalformedPayload {
        endpoint: &'static str,
        message: String,
    },
}

impl WeatherError {
    pub(crate) fn transport(endpoint: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            endpoint,
            message: message.into(),
        }
    }

    pub(crate) fn malformed(endpoint: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            endpoint,
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
