//! Personal-vs-corporate classification and the SSRF guard.
//!
//! Classification never fails: bad input is reported as `false` (or as a
//! [`ResearchTarget`] variant), so callers branch on values instead of
//! handling errors. The only side effect is a single `WARN` event when a
//! domain is blocked.

use crate::domain::email::{extract_domain, validate_email_syntax};
use crate::domain::reference_data::{BlockedPatterns, PersonalDomains};
use serde::Serialize;
use std::sync::LazyLock;
use url::Url;

static DEFAULT_CLASSIFIER: LazyLock<DomainClassifier> = LazyLock::new(DomainClassifier::default);

/// Decides whether addresses are personal and whether domains may be fetched.
///
/// Holds its reference tables by value; use [`DomainClassifier::new`] to run
/// against alternate tables and [`DomainClassifier::global`] for the built-in
/// ones.
#[derive(Debug, Clone, Default)]
pub struct DomainClassifier {
    blocked: BlockedPatterns,
    personal: PersonalDomains,
}

/// Outcome of deciding whether a contact's company website may be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ResearchTarget {
    /// The address failed syntax validation.
    InvalidEmail,
    /// Consumer webmail; there is no company site to look at.
    PersonalDomain { domain: String },
    /// The domain matched an SSRF block pattern.
    Blocked { domain: String },
    /// Safe to fetch.
    Fetch { domain: String, url: Url },
}

impl ResearchTarget {
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}

impl DomainClassifier {
    pub fn new(blocked: BlockedPatterns, personal: PersonalDomains) -> Self {
        Self { blocked, personal }
    }

    /// Process-wide classifier built from the built-in tables on first use.
    pub fn global() -> &'static Self {
        &DEFAULT_CLASSIFIER
    }

    /// Returns `true` if the address belongs to a consumer webmail provider.
    ///
    /// Addresses without `@` are never personal.
    pub fn is_personal_email(&self, email: &str) -> bool {
        extract_domain(email).is_some_and(|domain| self.personal.contains(&domain))
    }

    /// Returns `true` if `domain` may be used as an outbound fetch target.
    ///
    /// The input is trimmed and lowercased, then searched against each block
    /// pattern in order. The first hit logs one warning and returns `false`.
    pub fn is_safe_domain(&self, domain: &str) -> bool {
        let normalized = domain.trim().to_lowercase();

        match self.blocked.first_match(&normalized) {
            Some(pattern) => {
                tracing::warn!(
                    domain = %domain,
                    pattern = %pattern.as_str(),
                    "Blocked unsafe domain: {}",
                    domain
                );
                false
            }
            None => true,
        }
    }

    /// Runs the full pre-fetch decision sequence for a contact address.
    ///
    /// Order: syntax, personal provider, SSRF guard. Only a
    /// [`ResearchTarget::Fetch`] result should lead to a network request.
    pub fn research_target(&self, email: &str) -> ResearchTarget {
        if !validate_email_syntax(email) {
            return ResearchTarget::InvalidEmail;
        }

        let Some(domain) = extract_domain(email) else {
            return ResearchTarget::InvalidEmail;
        };

        if self.personal.contains(&domain) {
            return ResearchTarget::PersonalDomain { domain };
        }

        if !self.is_safe_domain(&domain) {
            return ResearchTarget::Blocked { domain };
        }

        match Url::parse(&format!("https://{domain}")) {
            Ok(url) => ResearchTarget::Fetch { domain, url },
            Err(e) => {
                tracing::debug!(domain = %domain, error = %e, "Domain is not a valid URL host");
                ResearchTarget::InvalidEmail
            }
        }
    }
}

/// [`DomainClassifier::is_personal_email`] against the built-in tables.
pub fn is_personal_email(email: &str) -> bool {
    DomainClassifier::global().is_personal_email(email)
}

/// [`DomainClassifier::is_safe_domain`] against the built-in tables.
pub fn is_safe_domain(domain: &str) -> bool {
    DomainClassifier::global().is_safe_domain(domain)
}

/// [`DomainClassifier::research_target`] against the built-in tables.
pub fn research_target(email: &str) -> ResearchTarget {
    DomainClassifier::global().research_target(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reference_data::PERSONAL_EMAIL_DOMAINS;

    #[test]
    fn test_every_personal_domain_is_personal() {
        for domain in PERSONAL_EMAIL_DOMAINS {
            assert!(
                is_personal_email(&format!("user@{domain}")),
                "{domain} should be personal"
            );
        }
    }

    #[test]
    fn test_corporate_domains_are_not_personal() {
        assert!(!is_personal_email("user@acme.com"));
        assert!(!is_personal_email("user@company.org"));
    }

    #[test]
    fn test_personal_case_insensitive() {
        assert!(is_personal_email("user@GMAIL.COM"));
        assert!(is_personal_email("user@Gmail.Com"));
    }

    #[test]
    fn test_personal_without_at() {
        assert!(!is_personal_email("notanemail"));
        assert!(!is_personal_email(""));
    }

    #[test]
    fn test_safe_public_domains() {
        assert!(is_safe_domain("google.com"));
        assert!(is_safe_domain("acme.com"));
        assert!(is_safe_domain("example.org"));
    }

    #[test]
    fn test_blocked_ipv4_ranges() {
        for domain in [
            "127.0.0.1",
            "10.0.0.1",
            "10.255.255.255",
            "192.168.1.1",
            "192.168.255.255",
            "172.16.0.1",
            "172.31.255.255",
            "169.254.1.1",
            "0.0.0.1",
        ] {
            assert!(!is_safe_domain(domain), "{domain} should be blocked");
        }
    }

    #[test]
    fn test_172_outside_private_range_allowed() {
        assert!(is_safe_domain("172.15.0.1"));
        assert!(is_safe_domain("172.32.0.1"));
    }

    #[test]
    fn test_blocked_ipv6() {
        assert!(!is_safe_domain("::1"));
        assert!(!is_safe_domain("fd00::1"));
        assert!(!is_safe_domain("fe80::1"));
    }

    #[test]
    fn test_blocked_internal_suffixes() {
        for domain in [
            "localhost",
            "server.internal",
            "api.internal",
            "server.local",
            "server.localdomain",
            "server.corp",
            "server.lan",
        ] {
            assert!(!is_safe_domain(domain), "{domain} should be blocked");
        }
    }

    #[test]
    fn test_blocked_token_anywhere() {
        assert!(!is_safe_domain("my-localhost-proxy.com"));
        assert!(!is_safe_domain("deep.sub.domain.corp"));
    }

    #[test]
    fn test_safe_domain_case_and_whitespace() {
        assert!(is_safe_domain("GOOGLE.COM"));
        assert!(is_safe_domain("  google.com  "));
        assert!(!is_safe_domain("Server.LOCAL"));
        assert!(!is_safe_domain("  LOCALHOST  "));
    }

    #[test]
    fn test_injected_tables() {
        let classifier = DomainClassifier::new(
            BlockedPatterns::new([r"\.test$"]).unwrap(),
            PersonalDomains::new(["example.net"]),
        );

        assert!(!classifier.is_safe_domain("api.test"));
        assert!(classifier.is_safe_domain("localhost"));
        assert!(classifier.is_personal_email("me@example.net"));
        assert!(!classifier.is_personal_email("me@gmail.com"));
    }

    #[test]
    fn test_research_target_invalid() {
        assert_eq!(research_target("notanemail"), ResearchTarget::InvalidEmail);
        assert_eq!(research_target(""), ResearchTarget::InvalidEmail);
    }

    #[test]
    fn test_research_target_personal() {
        assert_eq!(
            research_target("someone@Gmail.com"),
            ResearchTarget::PersonalDomain {
                domain: "gmail.com".to_string()
            }
        );
    }

    #[test]
    fn test_research_target_blocked() {
        assert_eq!(
            research_target("ops@build.corp"),
            ResearchTarget::Blocked {
                domain: "build.corp".to_string()
            }
        );
    }

    #[test]
    fn test_research_target_fetch() {
        let target = research_target("Jane.Doe@Acme.com");
        assert!(target.is_fetch());

        let ResearchTarget::Fetch { domain, url } = target else {
            panic!("expected fetch target");
        };
        assert_eq!(domain, "acme.com");
        assert_eq!(url.as_str(), "https://acme.com/");
    }

    #[test]
    fn test_research_target_serializes_with_tag() {
        let json = serde_json::to_value(research_target("user@yahoo.com")).unwrap();
        assert_eq!(json["decision"], "personal_domain");
        assert_eq!(json["domain"], "yahoo.com");
    }
}
