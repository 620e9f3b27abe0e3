//! Domain layer: pure classification of addresses, domains and memory lines.
//!
//! Nothing here performs I/O. Invalid input is reported through return values
//! (`false`, `None`, or a [`classifier::ResearchTarget`] variant) rather than
//! errors, so calling code can branch without error handling.
//!
//! # Architecture
//!
//! - [`email`] - Email syntax validation and domain extraction
//! - [`classifier`] - Personal-domain detection and the SSRF guard
//! - [`reference_data`] - Built-in personal-domain and blocked-pattern tables
//! - [`memory`] - Parsing of `contact:` lines from the agent's memory file

pub mod classifier;
pub mod email;
pub mod memory;
pub mod reference_data;

pub use classifier::{DomainClassifier, ResearchTarget, is_personal_email, is_safe_domain};
pub use email::{extract_domain, validate_email_syntax};
pub use memory::{MemoryEntry, parse_memory_line};
