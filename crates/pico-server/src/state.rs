//! Shared application state for the axum server.

use std::sync::Arc;

use pico_core::{LocationTool, PicoConfig, WorkflowPipe};

/// Shared state accessible by all API handlers.
///
/// Both adapters are immutable after construction; per-call state (the
/// status throttle) lives inside each invocation.
pub struct AppStateInner {
    pub pipe: WorkflowPipe,
    pub tool: LocationTool,
}

pub type AppState = Arc<AppStateInner>;

impl AppStateInner {
    pub fn new(config: PicoConfig) -> Self {
        let PicoConfig { pipe, tool, maps } = config;
        Self {
            pipe: WorkflowPipe::new(pipe, maps.clone()),
            tool: LocationTool::new(tool, maps),
        }
    }
}
