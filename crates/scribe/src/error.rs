//! Error types for the gateway.
//!
//! This is the closed taxonomy every public operation maps into; callers
//! match it exhaustively. Every ambiguity fails closed: a missing
//! principal, a failed fetch, or malformed input ends in denial, never in
//! an implicit allow.

use scribe_store::StoreError;
use thiserror::Error;

/// Errors that can occur during gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No valid principal. 401-equivalent; never retried.
    #[error("unauthenticated")]
    Unauthenticated,

    /// The principal lacks ownership or organization scope.
    /// 403-equivalent. Deliberately carries no detail about the document.
    #[error("forbidden")]
    Forbidden,

    /// Referenced document absent. 404-equivalent.
    #[error("document not found")]
    NotFound,

    /// Malformed input. 400-equivalent.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Transport or backend failure. 500-equivalent; the caller may retry
    /// with backoff, this layer never retries internally.
    #[error("upstream failure: {0}")]
    Upstream(#[from] StoreError),
}

impl GatewayError {
    /// The HTTP-equivalent status for this error.
    pub fn status(&self) -> u16 {
        match self {
            GatewayError::BadRequest(_) => 400,
            GatewayError::Unauthenticated => 401,
            GatewayError::Forbidden => 403,
            GatewayError::NotFound => 404,
            GatewayError::Upstream(_) => 500,
        }
    }
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
