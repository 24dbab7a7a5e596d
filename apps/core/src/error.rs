use thiserror::Error;

/// Ways a request issued by a MapView can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request failed with status {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("could not decode response: {0}")]
    Decode(String),

    /// The request was cancelled because its owner went away.
    #[error("request aborted")]
    Aborted,
}

impl FetchError {
    pub const fn is_abort(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}
