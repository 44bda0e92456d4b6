use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::{AuthenticatedIdentity, SecurityContext};

fn security_context(parts: &Parts) -> Result<&SecurityContext, AppError> {
    parts.extensions.get::<SecurityContext>().ok_or_else(|| {
        // bearer gate が Router に掛かっていない（配線ミス）
        tracing::error!("security context missing from request extensions");
        AppError::Internal
    })
}

/// Handler で、認証済み identity を受け取るための extractor
/// bearer gate が SecurityContext を request.extensions() に insert 済みである前提
/// 未認証の場合は 401 を返す
pub struct Authenticated(pub AuthenticatedIdentity);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        security_context(parts)?
            .authentication()
            .cloned()
            .map(Authenticated)
            .ok_or(AppError::Unauthorized)
    }
}

/// 認証済みかどうかに関わらず、SecurityContext をそのまま受け取る extractor
pub struct CurrentContext(pub SecurityContext);

impl<S> FromRequestParts<S> for CurrentContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        security_context(parts).cloned().map(CurrentContext)
    }
}
