//! Bearer gate middleware: `Authorization: Bearer <token>` → SecurityContext を extensions に入れる
//!
//! - どの分岐でも SecurityContext（未認証なら空）を insert し、next を 1 回だけ呼ぶ
//! - 401/403 の判断はしない（下流の extractor / handler の責務）
//! - token service 自体の障害だけはエラーとして返す

use std::net::SocketAddr;

use axum::{
    Router,
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::RequestDetails;
use crate::error::AppError;
use crate::middleware::http::REQUEST_ID_HEADER;
use crate::state::AppState;

/// Router 全体に bearer gate を掛ける。
///
/// 例：
/// ```ignore
/// let router = Router::new().nest("/api/v1", api::v1::routes());
/// let router = middleware::auth::bearer::apply(router, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, bearer_gate))
}

async fn bearer_gate(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let details = request_details(&req);

    let decision = match state.gate.inspect(req.headers(), details).await {
        Ok(decision) => decision,
        Err(err) => {
            tracing::warn!(error = %err, "token service failure");
            return Err(err.into());
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut()
        .insert(decision.into_security_context());

    Ok(next.run(req).await)
}

fn request_details(req: &Request<Body>) -> RequestDetails {
    // ConnectInfo は into_make_service_with_connect_info で起動した時だけ存在する
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    RequestDetails {
        remote_addr,
        request_id,
    }
}
