//! pico-maps core — transport-agnostic adapters for a chat-agent host.
//!
//! Two independent components:
//!
//! - [`pipe::WorkflowPipe`] forwards the latest chat message to an n8n
//!   webhook and renders the place it answers with as Markdown.
//! - [`tools::LocationTool`] searches the Places API directly and renders
//!   the first hit as an HTML fragment.
//!
//! Neither has an HTTP server dependency, making the crate usable from:
//!
//! - the HTTP adapter (`pico-server`)
//! - the CLI (`pico-cli`)
//! - any host embedding the adapters in-process
//!
//! # Feature Flags
//!
//! - `axum` — Adds `AdapterError::status_code` for use in axum handlers.

pub mod config;
pub mod error;
pub mod events;
pub mod maps;
pub mod models;
pub mod pipe;
pub mod render;
pub mod tools;

// Convenience re-exports
pub use config::{MapsConfig, PicoConfig, PipeConfig, ToolConfig};
pub use error::AdapterError;
pub use events::{CollectingSink, StatusEmitter, StatusEvent, StatusLevel, StatusSink};
pub use models::{ConversationBody, Message, MessageRole, PlaceResult};
pub use pipe::{RequestContext, WorkflowPipe};
pub use tools::{LocationTool, ToolOutput};
