//! Common test utilities and fixtures for integration tests.
//!
//! Everything runs against the in-memory store, so no external services
//! are needed.

pub mod fixtures;

use axum::Router;

use quotedrill_backend::AppState;

/// Test context owning the application state behind a test server.
pub struct TestContext {
    pub state: AppState,
}

impl TestContext {
    pub fn new() -> Self {
        Self { state: AppState::new() }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        quotedrill_backend::router(self.state.clone())
    }
}
