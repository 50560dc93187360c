//! Sanitizer unit and property tests.

use proptest::prelude::*;
use refx_output::{is_legal_xml_char, sanitize};

#[test]
fn strips_control_characters() {
    assert_eq!(sanitize("a\u{0}b\u{8}c"), "abc");
    assert_eq!(sanitize("line\u{b}feed"), "linefeed");
}

#[test]
fn keeps_legal_whitespace_and_text() {
    let input = "tab\there\nnewline\rcr déjà vu \u{1F600}";
    assert_eq!(sanitize(input), input);
}

#[test]
fn surrogate_range_is_illegal() {
    assert!(!is_legal_xml_char('\u{FFFE}'));
    assert!(!is_legal_xml_char('\u{FFFF}'));
    assert!(is_legal_xml_char('\u{FFFD}'));
    assert!(is_legal_xml_char('\u{10000}'));
}

proptest! {
    #[test]
    fn sanitize_is_idempotent(input in ".*") {
        let once = sanitize(&input).into_owned();
        let twice = sanitize(&once).into_owned();
        prop_assert_eq!(&once, &twice);
    }

    #[test]
    fn sanitize_output_is_always_legal(input in prop::collection::vec(any::<char>(), 0..64)) {
        let input: String = input.into_iter().collect();
        let cleaned = sanitize(&input).into_owned();
        prop_assert!(cleaned.chars().all(is_legal_xml_char));
    }
}
