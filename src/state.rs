/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - dispatcher: route table + auth gate + domain handlers, built once at startup
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use crate::dispatcher::Dispatcher;

#[derive(Clone, Debug)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}
