/*
 * Responsibility
 * - GET /api/v1/me      認証済み principal を返す（未認証なら 401）
 * - GET /api/v1/context SecurityContext の中身を返す（未認証でも 200）
 */
use axum::Json;

use crate::api::v1::dto::identity::{ContextResponse, IdentityResponse};
use crate::api::v1::extractors::{Authenticated, CurrentContext};

pub async fn me(Authenticated(identity): Authenticated) -> Json<IdentityResponse> {
    Json(identity.into())
}

pub async fn context(CurrentContext(ctx): CurrentContext) -> Json<ContextResponse> {
    Json((&ctx).into())
}
