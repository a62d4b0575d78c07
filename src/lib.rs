//! typewriter - incremental markup renderer.
//!
//! Rebuilds an HTML fragment inside a mount target while revealing its text
//! one character at a time, with randomized pacing and cooperative
//! cancellation. Also carries the assistant demo data and route table that
//! the renderer's host UI consumes.

pub mod assistants;
pub mod config;
pub mod error;
pub mod markup;
pub mod render;
pub mod routes;

pub use error::{ConfigError, RenderError, RenderResult};
pub use render::{render, CancelToken, MountTarget, RenderOptions, RenderSummary, Update};
