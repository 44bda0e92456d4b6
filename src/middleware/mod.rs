/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - auth::bearer::apply(...), http::apply(...)
 */
pub mod auth;
pub mod http;
