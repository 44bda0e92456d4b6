//! Collaborator contracts the bearer gate depends on.
//!
//! Implementations must accept arbitrary attacker-controlled strings: malformed input is an
//! invalid token (`Ok(false)`), never a panic or an `Err`. `Err` is reserved for faults of the
//! collaborator itself (e.g. key material that cannot be used).

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenServiceError {
    #[error("verification key unavailable: {0}")]
    KeyUnavailable(String),

    #[error("token rejected while reading claims: {0}")]
    Rejected(#[source] jsonwebtoken::errors::Error),

    #[error("empty '{0}' claim")]
    MissingClaim(&'static str),
}

#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// `true` when the token is authentic and currently usable.
    async fn validate(&self, token: &str) -> Result<bool, TokenServiceError>;
}

#[async_trait]
pub trait ClaimsExtractor: Send + Sync {
    /// Username carried by a token that already passed `validate`.
    async fn get_username(&self, token: &str) -> Result<String, TokenServiceError>;
}
