/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - ex: gate: BearerGate (token validator / claims extractor を内包)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::BearerGate;

#[derive(Clone, Debug)]
pub struct AppState {
    pub gate: Arc<BearerGate>,
}

impl AppState {
    pub fn new(gate: Arc<BearerGate>) -> Self {
        Self { gate }
    }
}
