//! Status events — host-facing progress notifications.
//!
//! The pipe reports coarse progress ("calling the workflow", "complete",
//! errors) to an async [`StatusSink`] supplied by the host. Emission goes
//! through a [`StatusEmitter`], which throttles non-terminal events:
//!
//!   - at most one event per `emit_interval` window
//!   - `done = true` events are always delivered
//!   - nothing is delivered when the status indicator is disabled

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::config::PipeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Info,
    Error,
}

/// A single progress notification.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusEvent {
    pub level: StatusLevel,
    pub message: String,
    pub done: bool,
}

impl StatusEvent {
    pub fn new(level: StatusLevel, message: impl Into<String>, done: bool) -> Self {
        Self {
            level,
            message: message.into(),
            done,
        }
    }

    /// The event in the host's wire shape.
    pub fn to_host(&self) -> HostEvent {
        HostEvent::Status(StatusPayload {
            status: if self.done {
                StatusPhase::Complete
            } else {
                StatusPhase::InProgress
            },
            level: self.level,
            description: self.message.clone(),
            done: self.done,
        })
    }
}

/// Host wire format:
/// `{"type": "status", "data": {"status", "level", "description", "done"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum HostEvent {
    Status(StatusPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub status: StatusPhase,
    pub level: StatusLevel,
    pub description: String,
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPhase {
    InProgress,
    Complete,
}

/// Receiver of status events (the host UI).
#[async_trait]
pub trait StatusSink: Send + Sync {
    async fn emit(&self, event: StatusEvent);
}

/// Sink that keeps every delivered event in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    events: Arc<Mutex<Vec<StatusEvent>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events delivered so far.
    pub async fn events(&self) -> Vec<StatusEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl StatusSink for CollectingSink {
    async fn emit(&self, event: StatusEvent) {
        self.events.lock().await.push(event);
    }
}

/// Sink that forwards events over a tokio channel.
#[async_trait]
impl StatusSink for tokio::sync::mpsc::UnboundedSender<StatusEvent> {
    async fn emit(&self, event: StatusEvent) {
        if self.send(event).is_err() {
            tracing::debug!("[StatusSink] receiver dropped, status event discarded");
        }
    }
}

/// Throttled front of a [`StatusSink`].
///
/// Holds the "time of last emission" for one invocation. Taking `&mut self`
/// keeps the throttle state exclusively owned by the call that uses it.
pub struct StatusEmitter<'a> {
    sink: Option<&'a dyn StatusSink>,
    enabled: bool,
    interval: Duration,
    last_emit: Option<Instant>,
}

impl<'a> StatusEmitter<'a> {
    pub fn new(sink: Option<&'a dyn StatusSink>, enabled: bool, interval: Duration) -> Self {
        Self {
            sink,
            enabled,
            interval,
            last_emit: None,
        }
    }

    /// Emitter configured from the pipe settings. Negative or non-finite
    /// intervals collapse to zero (no throttling).
    pub fn from_config(sink: Option<&'a dyn StatusSink>, config: &PipeConfig) -> Self {
        let interval = Duration::try_from_secs_f64(config.emit_interval).unwrap_or(Duration::ZERO);
        Self::new(sink, config.enable_status_indicator, interval)
    }

    /// Deliver an event if the throttle allows it. Returns whether it was
    /// delivered.
    pub async fn emit(&mut self, level: StatusLevel, message: &str, done: bool) -> bool {
        let Some(sink) = self.sink else {
            return false;
        };
        if !self.enabled {
            return false;
        }

        let now = Instant::now();
        let window_open = self
            .last_emit
            .map_or(true, |last| now.duration_since(last) >= self.interval);
        if !(window_open || done) {
            tracing::trace!("[StatusEmitter] throttled: {}", message);
            return false;
        }

        sink.emit(StatusEvent::new(level, message, done)).await;
        self.last_emit = Some(now);
        true
    }
}
