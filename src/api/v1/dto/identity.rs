/*
 * Responsibility
 * - SecurityContext を外に見せるための response DTO
 */
use serde::Serialize;

use crate::api::v1::extractors::{AuthenticatedIdentity, SecurityContext};

#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub principal: String,
    pub authorities: Vec<String>,
}

impl From<AuthenticatedIdentity> for IdentityResponse {
    fn from(identity: AuthenticatedIdentity) -> Self {
        Self {
            principal: identity.principal,
            authorities: identity.authorities.into_iter().collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub authenticated: bool,
    pub principal: Option<String>,
    pub request_id: Option<String>,
}

impl From<&SecurityContext> for ContextResponse {
    fn from(ctx: &SecurityContext) -> Self {
        let identity = ctx.authentication();
        Self {
            authenticated: ctx.is_authenticated(),
            principal: identity.map(|i| i.principal.clone()),
            request_id: identity.and_then(|i| i.details.request_id.clone()),
        }
    }
}
