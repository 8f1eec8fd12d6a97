use crate::transport::TransportError;

/// Error type returned by this crate.
///
/// Every variant is terminal. Only [`NetworkError::RequestFailed`] is produced
/// after the retry budget has been spent; all other variants surface on the
/// first attempt that hits them.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The endpoint could not be turned into an absolute HTTP(S) URL.
    #[error("invalid url '{endpoint}': {reason}")]
    InvalidUrl { endpoint: String, reason: String },
    /// Transport error or non-success status after all retries.
    #[error("request failed after {attempts} attempt(s): {failure}")]
    RequestFailed {
        /// Total number of transport invocations, including the first.
        attempts: usize,
        /// Cause observed on the final attempt.
        #[source]
        failure: RequestFailure,
    },
    /// The transport answered without a usable HTTP status code.
    #[error("invalid response: status code {status} is not a valid HTTP status")]
    InvalidResponse { status: u16 },
    /// Success status with an empty body.
    #[error("invalid data: response with status {status} has an empty body")]
    InvalidData { status: u16 },
    /// Request parameters could not be serialized to JSON.
    #[error("encoding failed: {0}")]
    EncodingFailed(#[source] serde_json::Error),
    /// Response body did not match the expected shape.
    #[error("decoding failed: {0}")]
    DecodingFailed(#[source] serde_json::Error),
}

impl NetworkError {
    /// Returns the HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { failure, .. } => failure.status(),
            Self::InvalidResponse { status } | Self::InvalidData { status } => Some(*status),
            _ => None,
        }
    }
}

/// Cause carried by [`NetworkError::RequestFailed`].
#[derive(Debug, thiserror::Error)]
pub enum RequestFailure {
    /// No response was obtained from the transport.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    /// The server answered with a status outside `200..=299`.
    #[error("http status {status}: {body}")]
    Status { status: u16, body: String },
}

impl RequestFailure {
    /// Returns the HTTP status for [`RequestFailure::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}
