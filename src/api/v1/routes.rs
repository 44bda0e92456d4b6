/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - bearer gate は app 側で Router 全体に掛ける（ここでは掛けない）
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::me::{context, me};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/context", get(context))
}
