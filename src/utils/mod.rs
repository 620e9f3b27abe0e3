//! Small helpers shared by the agent's tools.
//!
//! - [`text`] - Character-safe truncation for prompts and previews

pub mod text;

pub use text::safe_truncate;
