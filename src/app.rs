/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (BearerGate) → Router 組み立て
 * - Middleware の適用 (bearer gate / HTTP 共通)
 * - axum::serve() で起動
 */
use std::net::SocketAddr;
use std::{panic, process};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::{Config, HttpLimits};
use crate::middleware;
use crate::services::auth::build_bearer_gate;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,bearer_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched.
        tracing::error!(?info, "panic");

        // Development: crash the whole process so we notice immediately.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        key = ?config.verification_key,
        issuer = ?config.auth_issuer,
        audience = ?config.auth_audience,
        "starting bearer gate in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let gate = build_bearer_gate(&config).context("failed to build bearer gate")?;
    let app = build_router(AppState::new(gate), config.http);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    // ConnectInfo を有効にして、identity の details に remote address を載せる
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

pub fn build_router(state: AppState, limits: HttpLimits) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes());

    let router = middleware::auth::bearer::apply(router, state.clone()).with_state(state);

    middleware::http::apply(router, limits)
}
