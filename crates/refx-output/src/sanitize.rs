//! Removal of codepoints that are illegal in XML 1.0 content.

use std::borrow::Cow;

/// XML 1.0 `Char` production: tab, LF, CR, and the three legal planes.
pub fn is_legal_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\u{9}' | '\u{A}' | '\u{D}'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Strip illegal codepoints from text or attribute content.
///
/// Total and idempotent; legal input is returned borrowed.
pub fn sanitize(input: &str) -> Cow<'_, str> {
    if input.chars().all(is_legal_xml_char) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.chars().filter(|ch| is_legal_xml_char(*ch)).collect())
    }
}
