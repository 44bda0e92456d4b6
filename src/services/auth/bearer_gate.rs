//! Bearer-token gate: decides, once per request, whether the request carries a usable identity.
//!
//! The gate never rejects. Missing headers, malformed bearer values and invalid tokens all end
//! in `GateDecision::Unauthenticated`; rejecting is left to downstream stages. Only faults of
//! the token collaborators are returned as `Err`.

use std::fmt;
use std::sync::Arc;

use axum::http::{HeaderMap, header};

use crate::api::v1::extractors::{AuthenticatedIdentity, RequestDetails, SecurityContext};
use crate::services::auth::token::{ClaimsExtractor, TokenServiceError, TokenValidator};

pub const BEARER_PREFIX: &str = "Bearer";

/// What the `Authorization` header holds, after the presence check and token extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearerValue<'a> {
    /// Absent, empty, not UTF-8, or not starting with `Bearer`.
    Absent,
    /// Starts with `Bearer` but has no token segment after the first space.
    Malformed,
    Token(&'a str),
}

/// Presence check + token extraction for a raw `Authorization` value.
///
/// The token is the second space-separated segment, trimmed. A value such as `"Bearer"` has no
/// second segment and is `Malformed`.
pub fn parse_authorization(value: Option<&str>) -> BearerValue<'_> {
    let Some(value) = value.filter(|v| !v.is_empty() && v.starts_with(BEARER_PREFIX)) else {
        return BearerValue::Absent;
    };

    match value.split(' ').nth(1).map(str::trim) {
        Some(token) if !token.is_empty() => BearerValue::Token(token),
        _ => BearerValue::Malformed,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthenticatedReason {
    HeaderAbsentOrMalformed,
    MalformedBearerValue,
    TokenInvalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Unauthenticated(UnauthenticatedReason),
    Authenticated(AuthenticatedIdentity),
}

impl GateDecision {
    pub fn into_security_context(self) -> SecurityContext {
        let mut ctx = SecurityContext::unauthenticated();
        if let Self::Authenticated(identity) = self {
            ctx.set_authentication(identity);
        }
        ctx
    }
}

/// Collaborators are injected at construction; the gate holds no mutable state.
#[derive(Clone)]
pub struct BearerGate {
    validator: Arc<dyn TokenValidator>,
    claims: Arc<dyn ClaimsExtractor>,
}

impl fmt::Debug for BearerGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerGate").finish_non_exhaustive()
    }
}

impl BearerGate {
    pub fn new(validator: Arc<dyn TokenValidator>, claims: Arc<dyn ClaimsExtractor>) -> Self {
        Self { validator, claims }
    }

    /// Inspect the request headers and decide the request's identity.
    pub async fn inspect(
        &self,
        headers: &HeaderMap,
        details: RequestDetails,
    ) -> Result<GateDecision, TokenServiceError> {
        let value = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = match parse_authorization(value) {
            BearerValue::Token(token) => token,
            BearerValue::Absent => {
                return Ok(unauthenticated(UnauthenticatedReason::HeaderAbsentOrMalformed));
            }
            BearerValue::Malformed => {
                return Ok(unauthenticated(UnauthenticatedReason::MalformedBearerValue));
            }
        };

        if !self.validator.validate(token).await? {
            return Ok(unauthenticated(UnauthenticatedReason::TokenInvalid));
        }

        let username = self.claims.get_username(token).await?;
        tracing::debug!(principal = %username, "bearer token accepted");

        Ok(GateDecision::Authenticated(AuthenticatedIdentity::new(
            username, details,
        )))
    }
}

fn unauthenticated(reason: UnauthenticatedReason) -> GateDecision {
    tracing::debug!(?reason, "request proceeds unauthenticated");
    GateDecision::Unauthenticated(reason)
}
