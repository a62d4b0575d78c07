//! Incremental markup rendering.
//!
//! [`render`] reproduces a markup fragment inside any [`MountTarget`] while
//! revealing its text with typewriter pacing. Two targets ship with the crate:
//! - [`OutputDocument`]: in-memory element tree with `innerHTML` serialization
//! - [`TerminalTarget`]: streams the reveal to a terminal

mod cancel;
mod delay;
mod document;
mod engine;
mod target;
mod terminal;

pub use cancel::CancelToken;
pub use delay::{DelayPolicy, FixedDelay, NoDelay, RandomDelay, WHITESPACE_PAUSE_MAX};
pub use document::{NodeId, OutputDocument};
pub use engine::{
    render, Pacing, RenderOptions, RenderSummary, Update, DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY,
    DEFAULT_START_DELAY,
};
pub use target::{is_input_like_tag, MountTarget};
pub use terminal::{TermNode, TerminalTarget};
