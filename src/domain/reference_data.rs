//! Static reference data used by the domain classifier.
//!
//! Both tables are fixed at build time and compiled once per process. The
//! wrapper types let callers (mostly tests) inject alternate tables through
//! [`DomainClassifier::new`](crate::domain::classifier::DomainClassifier::new).

use regex::Regex;
use std::collections::HashSet;

/// Consumer webmail providers. Contacts on these domains have no company
/// website worth researching.
pub const PERSONAL_EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "icloud.com",
    "aol.com",
    "protonmail.com",
    "proton.me",
    "mail.com",
    "zoho.com",
    "yandex.com",
    "gmx.com",
    "fastmail.com",
    "tutanota.com",
    "hey.com",
];

/// Targets that must never be fetched on behalf of user input.
///
/// Patterns are matched with a regex *search* against the trimmed, lowercased
/// domain, so unanchored entries (e.g. `localhost`) block any domain that
/// merely contains the token.
pub const BLOCKED_DOMAIN_PATTERNS: &[&str] = &[
    r"^127\.",
    r"^10\.",
    r"^172\.(1[6-9]|2[0-9]|3[01])\.",
    r"^192\.168\.",
    r"^169\.254\.",
    r"^0\.",
    r"^::1$",
    r"^fd[0-9a-f]{2}:",
    r"^fe80:",
    r"localhost",
    r"\.internal$",
    r"\.local$",
    r"\.localdomain$",
    r"\.corp$",
    r"\.lan$",
];

/// Ordered, immutable list of compiled SSRF block patterns.
#[derive(Debug, Clone)]
pub struct BlockedPatterns {
    patterns: Vec<Regex>,
}

impl BlockedPatterns {
    /// Compiles the given patterns, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if any pattern fails to compile.
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns the first pattern that matches anywhere in `domain`.
    pub fn first_match(&self, domain: &str) -> Option<&Regex> {
        self.patterns.iter().find(|re| re.is_match(domain))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for BlockedPatterns {
    fn default() -> Self {
        Self::new(BLOCKED_DOMAIN_PATTERNS).expect("built-in blocked patterns are valid")
    }
}

/// Set of lowercase consumer webmail domains.
#[derive(Debug, Clone)]
pub struct PersonalDomains {
    domains: HashSet<String>,
}

impl PersonalDomains {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// `domain` is expected to be lowercased already.
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }
}

impl Default for PersonalDomains {
    fn default() -> Self {
        Self::new(PERSONAL_EMAIL_DOMAINS)
    }
}
