//! Infrastructure layer for file-backed state.
//!
//! # Modules
//!
//! - [`env_file`] - Locked read/update of `KEY=value` flags in a `.env` file

pub mod env_file;

pub use env_file::{EnvFile, set_env_flag};
