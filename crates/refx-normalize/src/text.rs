//! Text normalization helpers shared by the field rules.

/// Collapse CRLF and LF line breaks to the single-CR convention the target
/// schema uses for multi-line text blocks.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\r").replace('\n', "\r")
}

/// Split a keyword field on newlines or semicolons. A string without either
/// delimiter stays one keyword; splitting on commas would shred keywords
/// like "sorting, topological".
pub fn split_keywords(text: &str) -> Vec<String> {
    if text.contains('\n') || text.contains(';') {
        text.split(['\n', ';'])
            .map(|keyword| keyword.trim_matches(['\r', ' ', '\t']))
            .filter(|keyword| !keyword.is_empty())
            .map(String::from)
            .collect()
    } else {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        }
    }
}

/// Split a one-name-per-line block into trimmed, non-empty names.
pub fn split_name_lines(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
