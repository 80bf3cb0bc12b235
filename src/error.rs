use thiserror::Error;

/// Errors surfaced by the client orchestration layer.
///
/// Every variant is fatal only to the action that raised it; callers convert
/// them into status + message state rather than propagating further.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Required input for the selected scan mode is missing.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Transport failure or non-success response from the scan service.
    #[error("scan service request failed: {0}")]
    Network(String),

    /// Profile document lacks a usable config object.
    #[error("invalid profile format: {0}")]
    InvalidProfile(String),

    /// A scan is already in flight; at most one runs at a time.
    #[error("a scan is already in progress")]
    ScanInFlight,
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
