//! Text helpers for building prompts and previews.

/// Default marker appended by [`safe_truncate`].
pub const ELLIPSIS: &str = "...";

/// Truncates `text` to at most `max_chars` characters, ending with `suffix`
/// when anything was cut.
///
/// Lengths are counted in `char`s, so multi-byte text is never split inside a
/// code point. If `suffix` alone is longer than `max_chars`, the suffix itself
/// is cut to fit.
///
/// # Examples
///
/// ```
/// use email_agent_guard::utils::text::safe_truncate;
///
/// assert_eq!(safe_truncate("hello world", 8, "..."), "hello...");
/// assert_eq!(safe_truncate("short", 100, "..."), "short");
/// ```
pub fn safe_truncate(text: &str, max_chars: usize, suffix: &str) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let suffix_len = suffix.chars().count();
    if suffix_len >= max_chars {
        return suffix.chars().take(max_chars).collect();
    }

    let mut out: String = text.chars().take(max_chars - suffix_len).collect();
    out.push_str(suffix);
    out
}
