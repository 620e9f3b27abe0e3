use email_agent_guard::prelude::*;

#[test]
fn test_truncate_fits_prompt_budget() {
    let page = "Acme builds rockets. ".repeat(500);
    let truncated = safe_truncate(&page, 4000, "...");

    assert_eq!(truncated.chars().count(), 4000);
    assert!(truncated.ends_with("..."));
    assert!(page.starts_with(&truncated[..3997]));
}

#[test]
fn test_truncate_leaves_short_text_alone() {
    assert_eq!(safe_truncate("Hi Jane,", 200, "..."), "Hi Jane,");
}

#[test]
fn test_parse_memory_file_lines() {
    let memory = "\
# Contacts
contact:jane@acme.com | 2026-01-01 | met at conference | follow up in Q2
contact:bob@example.org | 2026-02-10
random note
";

    let entries: Vec<MemoryEntry> = memory.lines().filter_map(parse_memory_line).collect();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].key, "contact:jane@acme.com");
    assert_eq!(
        entries[0].notes.as_deref(),
        Some("met at conference | follow up in Q2")
    );
    assert_eq!(entries[1].date, "2026-02-10");
    assert_eq!(entries[1].notes, None);
}

#[test]
fn test_memory_key_feeds_classifier() {
    let entry = parse_memory_line("contact:ceo@Acme.com | 2026-03-01 | intro").unwrap();
    let email = entry.key.trim_start_matches("contact:");

    assert!(validate_email_syntax(email));
    assert_eq!(extract_domain(email).as_deref(), Some("acme.com"));
    assert!(!is_personal_email(email));
}
