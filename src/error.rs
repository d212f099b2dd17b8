use thiserror::Error;

/// Failure of a single feature-layer fetch. Always logged and degraded to an empty layer.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("could not read response body: {0}")]
    Body(String),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("timed out after {0} ms")]
    Timeout(u32),
}

impl From<gloo_net::Error> for FetchError {
    fn from(e: gloo_net::Error) -> Self {
        FetchError::Request(e.to_string())
    }
}
