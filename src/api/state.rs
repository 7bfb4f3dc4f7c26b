//! Application state for the payslip engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::service::PayrollEngine;

/// Shared application state.
///
/// Wraps the engine so every handler works against the same store.
#[derive(Debug, Clone)]
pub struct AppState {
    engine: Arc<PayrollEngine>,
}

impl AppState {
    /// Creates a new application state around `engine`.
    pub fn new(engine: PayrollEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &PayrollEngine {
        &self.engine
    }

    /// Returns a shared handle to the engine for work moved off the request
    /// task.
    pub fn engine_handle(&self) -> Arc<PayrollEngine> {
        Arc::clone(&self.engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_engine_handle_shares_engine() {
        fn assert_send<T: Send + Sync + 'static>() {}
        assert_send::<Arc<PayrollEngine>>();

        let state = AppState::new(PayrollEngine::new(
            Arc::new(crate::store::MemoryStore::new()),
            Arc::new(crate::clock::SystemClock),
            crate::config::PayrollPolicy::default(),
        ));
        let handle = state.engine_handle();
        assert!(std::ptr::eq(handle.as_ref(), state.engine()));
    }
}
