//! Command-line interface for typewriter.

mod commands;
mod helpers;
mod icons;

pub use commands::{is_verbose, run};
