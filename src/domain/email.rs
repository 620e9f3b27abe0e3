//! Email address syntax checks and domain extraction.

use regex::Regex;
use std::sync::LazyLock;

/// Simplified RFC 5322 shape: `local@domain.tld` with an alphabetic TLD of at
/// least two characters.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Returns `true` if `email` looks like a deliverable address.
///
/// Syntax only: no DNS lookups and no mailbox verification.
///
/// # Examples
///
/// ```
/// use email_agent_guard::domain::email::validate_email_syntax;
///
/// assert!(validate_email_syntax("user+tag@sub-domain.co.uk"));
/// assert!(validate_email_syntax("USER@EXAMPLE.COM"));
/// assert!(!validate_email_syntax("user@com"));
/// assert!(!validate_email_syntax("user name@example.com"));
/// ```
pub fn validate_email_syntax(email: &str) -> bool {
    !email.is_empty() && email.contains('@') && EMAIL_REGEX.is_match(email)
}

/// Like [`validate_email_syntax`], for values that may be absent.
pub fn validate_optional_email(email: Option<&str>) -> bool {
    email.is_some_and(validate_email_syntax)
}

/// Extracts the lowercased domain part of an address.
///
/// Everything after the first `@` is returned. `None` means the input has no
/// `@` at all; an address ending in `@` yields `Some("")`.
///
/// # Examples
///
/// ```
/// use email_agent_guard::domain::email::extract_domain;
///
/// assert_eq!(extract_domain("USER@DOMAIN.COM").as_deref(), Some("domain.com"));
/// assert_eq!(extract_domain("user@").as_deref(), Some(""));
/// assert_eq!(extract_domain("notanemail"), None);
/// ```
pub fn extract_domain(email: &str) -> Option<String> {
    email
        .split_once('@')
        .map(|(_, domain)| domain.to_lowercase())
}
