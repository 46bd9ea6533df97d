/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - gate: TokenGate (immutable after construction)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::TokenGate;

#[derive(Clone, Debug)]
pub struct AppState {
    pub gate: Arc<TokenGate>,
}

impl AppState {
    pub fn new(gate: Arc<TokenGate>) -> Self {
        Self { gate }
    }
}
