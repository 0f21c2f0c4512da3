use thiserror::Error;

/// Failure reported by a backend collaborator.
///
/// Cloneable so that it can travel inside failure actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("network unavailable: {0}")]
    Network(String),

    #[error("session expired")]
    Unauthorized,

    #[error("resource not found")]
    NotFound,

    #[error("cancelled by user")]
    Cancelled,

    #[error("{capability} is not available in this environment")]
    Unimplemented { capability: &'static str },
}
