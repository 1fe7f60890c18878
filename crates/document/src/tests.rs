use super::*;

// -------------------- Helpers --------------------

/// `[A] x=1 | [B] y=2 | [a] z=3 | [C]`
fn sample() -> Document {
    let mut b = DocumentBuilder::new();
    b.section("A".to_string());
    b.pair("x".to_string(), "1".to_string());
    b.section("B".to_string());
    b.pair("y".to_string(), "2".to_string());
    b.section("a".to_string());
    b.pair("z".to_string(), "3".to_string());
    b.section("C".to_string());
    b.finish()
}

// -------------------- Text helpers --------------------

#[test]
fn trim_strips_spaces_and_terminators_only() {
    assert_eq!(trim("  key \r\n"), "key");
    assert_eq!(trim("\tkey\t"), "\tkey\t");
    assert_eq!(trim("   "), "");
}

#[test]
fn header_has_empty_key_and_value() {
    let h = Entry::header("Net", 4);
    assert!(h.is_header());
    assert_eq!(h.value, "");
    assert!(!Entry::pair("Net", "k", "", 5).is_header());
}

#[test]
fn matching_ignores_ascii_case() {
    let e = Entry::pair("Net", "Port", "80", 2);
    assert!(e.in_section("NET"));
    assert!(e.matches("net", "PORT"));
    assert!(!e.matches("net", "host"));
    assert!(!Entry::header("Net", 1).matches("Net", "Port"));
}

// -------------------- Builder --------------------

#[test]
fn builder_numbers_kept_lines() {
    let doc = sample();
    let ids: Vec<u32> = doc.entries().iter().map(|e| e.comment_no).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(doc.max_comment_no(), 7);
}

#[test]
fn builder_copies_section_onto_pairs() {
    let doc = sample();
    assert_eq!(doc.entry(1).unwrap().section, "A");
    assert_eq!(doc.entry(5).unwrap().section, "a");
}

#[test]
fn pair_before_any_section_is_dropped_but_counted() {
    let mut b = DocumentBuilder::new();
    b.comment("# orphan");
    assert!(!b.pair("x".to_string(), "1".to_string()));
    assert_eq!(b.comment_no(), 2);
    b.section("A".to_string());
    let doc = b.finish();

    assert_eq!(doc.len(), 1);
    assert_eq!(doc.entry(0).unwrap().comment_no, 2);
    assert_eq!(doc.comments_for(1), ["# orphan".to_string()]);
    assert!(doc.comments_for(2).is_empty());
}

#[test]
fn comments_attach_to_the_next_line() {
    let mut b = DocumentBuilder::new();
    b.comment("# one");
    b.comment("# two");
    b.section("A".to_string());
    b.comment("# three");
    b.pair("k".to_string(), "v".to_string());
    b.comment("# tail");
    let doc = b.finish();

    assert_eq!(doc.comments_for(1), ["# one".to_string(), "# two".to_string()]);
    assert_eq!(doc.comments_for(2), ["# three".to_string()]);
    let tail: Vec<&str> = doc.comments_after(doc.max_comment_no()).collect();
    assert_eq!(tail, vec!["# tail"]);
    assert_eq!(doc.comment_count(), 4);
}

// -------------------- Locator --------------------

#[test]
fn next_section_skips_pairs() {
    let doc = sample();
    assert_eq!(doc.next_section(0), Some(2));
    assert_eq!(doc.next_section(2), Some(4));
    assert_eq!(doc.next_section(6), None);
}

#[test]
fn find_section_counts_duplicates_case_insensitively() {
    let doc = sample();
    assert_eq!(doc.find_section("A", 0), Some(0));
    assert_eq!(doc.find_section("A", 1), Some(4));
    assert_eq!(doc.find_section("A", 2), None);
    assert_eq!(doc.count_sections("a"), 2);
    assert_eq!(doc.count_sections("missing"), 0);
}

#[test]
fn section_bounds() {
    let doc = sample();
    assert_eq!(doc.section_end(0), 2);
    assert_eq!(doc.members(4), 5..6);
    // trailing empty section
    assert_eq!(doc.members(6), 7..7);
}

#[test]
fn find_pair_scans_whole_document_or_one_section() {
    let doc = sample();
    assert_eq!(doc.find_pair("a", "Z"), Some(5));
    assert_eq!(doc.find_pair_in(0, "A", "z"), None);
    assert_eq!(doc.find_pair_in(4, "A", "z"), Some(5));
}

#[test]
fn section_names_in_order() {
    let doc = sample();
    let names: Vec<&str> = doc.section_names().collect();
    assert_eq!(names, vec!["A", "B", "a", "C"]);
}

#[test]
fn empty_document_has_no_sections() {
    let doc = Document::new();
    assert_eq!(doc.first_section(), None);
    assert_eq!(doc.count_sections("A"), 0);
    assert_eq!(doc.max_comment_no(), 0);
}

// -------------------- Removal --------------------

#[test]
fn remove_section_entries_drops_all_occurrences_and_comments() {
    let mut doc = sample();
    doc.push_comment(1, "# about A");
    doc.push_comment(3, "# about B");

    assert_eq!(doc.remove_section_entries("A"), 4);
    let names: Vec<&str> = doc.section_names().collect();
    assert_eq!(names, vec!["B", "C"]);
    assert!(doc.comments_for(1).is_empty());
    assert_eq!(doc.comments_for(3), ["# about B".to_string()]);
    assert_eq!(doc.remove_section_entries("nope"), 0);
}

#[test]
fn remove_span_drops_entries_and_their_comments() {
    let mut doc = sample();
    doc.push_comment(5, "# about a");
    let span = 4..doc.section_end(4);
    assert_eq!(doc.remove_span(span), 2);
    assert_eq!(doc.len(), 5);
    assert_eq!(doc.comment_count(), 0);
    assert_eq!(doc.count_sections("a"), 1);
}

#[test]
fn insert_and_reserve() {
    let mut doc = sample();
    doc.try_reserve(1).unwrap();
    doc.insert(2, Entry::pair("A", "w", "9", 0));
    assert_eq!(doc.members(0), 1..3);
    assert_eq!(doc.entry(2).unwrap().key, "w");
}
