//! # Email Agent Guard
//!
//! Input classification and retry primitives shared by the tools of an
//! email-productivity assistant.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Email syntax checks, personal-domain
//!   detection, the SSRF guard and memory-line parsing. Pure, never fails.
//! - **Application Layer** ([`application`]) - Retry with exponential backoff
//!   around calls to external services
//! - **Infrastructure Layer** ([`infrastructure`]) - Locked `.env` flag storage
//! - **Utilities** ([`utils`]) - Text truncation for prompts and previews
//!
//! ## Typical Flow
//!
//! ```
//! use email_agent_guard::domain::{ResearchTarget, classifier::research_target};
//!
//! match research_target("jane@acme.com") {
//!     ResearchTarget::Fetch { url, .. } => assert_eq!(url.as_str(), "https://acme.com/"),
//!     other => panic!("unexpected decision: {other:?}"),
//! }
//!
//! assert!(matches!(
//!     research_target("admin@build.corp"),
//!     ResearchTarget::Blocked { .. }
//! ));
//! ```
//!
//! A [`ResearchTarget::Fetch`](domain::ResearchTarget::Fetch) result is then
//! fetched through [`application::retry::retry_with_backoff`].
//!
//! ## Configuration
//!
//! Thresholds are loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use error::EnvFileError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::retry::{
        RetryPolicy, Sleeper, retry_with_backoff, retry_with_backoff_async,
        retry_with_backoff_using,
    };
    pub use crate::config::Config;
    pub use crate::domain::{
        DomainClassifier, MemoryEntry, ResearchTarget, extract_domain, is_personal_email,
        is_safe_domain, parse_memory_line, validate_email_syntax,
    };
    pub use crate::error::EnvFileError;
    pub use crate::infrastructure::{EnvFile, set_env_flag};
    pub use crate::utils::safe_truncate;
}
