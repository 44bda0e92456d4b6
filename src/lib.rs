/*
 * Responsibility
 * - モジュールツリーの公開 (bin と test から参照する)
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
