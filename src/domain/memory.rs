//! Parsing of contact lines stored in the agent's flat-file memory.
//!
//! Lines look like `contact:jane@acme.com | 2026-01-01 | notes`. Notes are
//! free text and may themselves contain `|`.

/// One parsed `contact:` memory line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryEntry {
    pub key: String,
    /// Kept verbatim; the date format is not validated.
    pub date: String,
    pub notes: Option<String>,
}

/// Parses a memory line, returning `None` for anything that is not a
/// `contact:` record with at least a key and a date.
///
/// The `contact:` marker is matched case-insensitively anywhere in the line.
pub fn parse_memory_line(line: &str) -> Option<MemoryEntry> {
    if line.is_empty() || !line.to_lowercase().contains("contact:") {
        return None;
    }

    let mut parts = line.splitn(3, '|');
    let key = parts.next()?.trim().to_string();
    let date = parts.next()?.trim().to_string();
    let notes = parts.next().map(|n| n.trim().to_string());

    Some(MemoryEntry { key, date, notes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_line() {
        let entry = parse_memory_line("contact:test@email.com | 2026-01-01 | notes here").unwrap();
        assert_eq!(entry.key, "contact:test@email.com");
        assert_eq!(entry.date, "2026-01-01");
        assert_eq!(entry.notes.as_deref(), Some("notes here"));
    }

    #[test]
    fn test_pipes_in_notes_preserved() {
        let entry = parse_memory_line(
            "contact:user@example.com | 2026-06-15 | notes | with | multiple | pipes",
        )
        .unwrap();
        assert_eq!(entry.date, "2026-06-15");
        assert_eq!(entry.notes.as_deref(), Some("notes | with | multiple | pipes"));
    }

    #[test]
    fn test_marker_case_insensitive() {
        assert!(parse_memory_line("CONTACT:test@email.com | 2026-01-01 | notes").is_some());
        assert!(parse_memory_line("Contact:test@email.com | 2026-01-01 | notes").is_some());
    }

    #[test]
    fn test_whitespace_trimmed() {
        let entry =
            parse_memory_line("  contact:test@email.com  |  2026-01-01  |  notes with spaces  ")
                .unwrap();
        assert_eq!(entry.key, "contact:test@email.com");
        assert_eq!(entry.date, "2026-01-01");
        assert_eq!(entry.notes.as_deref(), Some("notes with spaces"));
    }

    #[test]
    fn test_key_and_date_only() {
        let entry = parse_memory_line("contact:test@email.com | 2026-01-01").unwrap();
        assert_eq!(entry.notes, None);
    }

    #[test]
    fn test_empty_notes_distinct_from_missing() {
        let entry = parse_memory_line("contact:test@email.com | 2026-01-01 | ").unwrap();
        assert_eq!(entry.notes.as_deref(), Some(""));
    }

    #[test]
    fn test_rejects_non_contact_lines() {
        assert_eq!(parse_memory_line("invalid line without contact"), None);
        assert_eq!(parse_memory_line(""), None);
    }

    #[test]
    fn test_rejects_missing_date() {
        assert_eq!(parse_memory_line("contact:test@email.com"), None);
    }

    #[test]
    fn test_date_not_validated() {
        let entry = parse_memory_line("contact:test@email.com | Jan 1, 2026 | notes").unwrap();
        assert_eq!(entry.date, "Jan 1, 2026");
    }

    #[test]
    fn test_special_characters_in_notes() {
        let notes = "notes: [important] (urgent) {action} <priority>";
        let entry = parse_memory_line(&format!("contact:test@email.com | 2026-01-01 | {notes}"))
            .unwrap();
        assert_eq!(entry.notes.as_deref(), Some(notes));
    }
}
