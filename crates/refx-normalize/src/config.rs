use std::collections::BTreeMap;

/// Immutable policy data for the normalizer.
///
/// Everything here was tuned against real library exports; it is injected
/// rather than hard-coded so tests and callers can substitute alternates.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Source type code → target schema type code.
    pub type_map: BTreeMap<i64, i64>,
    /// Target schema type code → display name.
    pub type_names: BTreeMap<i64, String>,
    /// Target code identifying journal articles.
    pub journal_article_code: i64,
    /// Substrings of alternate titles that mark a conference series.
    pub conference_markers: Vec<String>,
    /// Known periodical full title → standard abbreviation.
    pub known_abbreviations: BTreeMap<String, String>,
    /// Longest string still accepted as a periodical abbreviation.
    pub abbreviation_max_len: usize,
    /// Largest tolerated share of non-ASCII characters in an abbreviation.
    pub abbreviation_max_non_ascii: f64,
}

impl NormalizerConfig {
    /// Target code for a raw source code. Unmapped codes pass through.
    pub fn mapped_type(&self, raw_code: i64) -> i64 {
        self.type_map.get(&raw_code).copied().unwrap_or(raw_code)
    }

    /// Display name for a target code; unknown codes have no name.
    pub fn type_name(&self, mapped_code: i64) -> &str {
        self.type_names
            .get(&mapped_code)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_conference_series(&self, alt_title: &str) -> bool {
        self.conference_markers
            .iter()
            .any(|marker| alt_title.contains(marker.as_str()))
    }

    pub fn known_abbreviation(&self, full_title: &str) -> Option<&str> {
        self.known_abbreviations
            .get(full_title.trim())
            .map(String::as_str)
    }

    /// Whether a short-title value is plausible as a periodical abbreviation:
    /// non-empty, bounded length, at least one ASCII alphanumeric, and a
    /// bounded share of non-ASCII characters.
    pub fn is_reasonable_abbreviation(&self, value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return false;
        }
        let total = trimmed.chars().count();
        if total > self.abbreviation_max_len {
            return false;
        }
        if !trimmed.chars().any(|ch| ch.is_ascii_alphanumeric()) {
            return false;
        }
        let non_ascii = trimmed.chars().filter(|ch| !ch.is_ascii()).count();
        (non_ascii as f64) <= self.abbreviation_max_non_ascii * (total as f64)
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        let type_map = [
            (0, 17),
            (1, 6),
            (2, 5),
            (3, 7),
            (4, 10),
            (5, 47),
            (7, 32),
            (9, 27),
            (10, 12),
            (13, 23),
            (16, 13),
            (19, 34),
        ]
        .into_iter()
        .collect();
        let type_names = [
            (17, "Journal Article"),
            (6, "Book"),
            (5, "Book Section"),
            (7, "Edited Book"),
            (10, "Conference Proceedings"),
            (47, "Conference Paper"),
            (32, "Thesis"),
            (27, "Report"),
            (12, "Web Page"),
            (23, "Newspaper Article"),
            (13, "Generic"),
            (34, "Unpublished Work"),
        ]
        .into_iter()
        .map(|(code, name)| (code, name.to_string()))
        .collect();
        let conference_markers = [
            "Lecture Notes in",
            "Proceedings of",
            "Conference on",
            "Symposium on",
            "Workshop on",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        let known_abbreviations = [
            (
                "Journal of the American Chemical Society",
                "J. Am. Chem. Soc.",
            ),
            ("Physical Review Letters", "Phys. Rev. Lett."),
            ("Journal of Biological Chemistry", "J. Biol. Chem."),
            ("Nucleic Acids Research", "Nucleic Acids Res."),
            (
                "Proceedings of the National Academy of Sciences",
                "Proc. Natl. Acad. Sci. U.S.A.",
            ),
            (
                "Angewandte Chemie International Edition",
                "Angew. Chem. Int. Ed.",
            ),
        ]
        .into_iter()
        .map(|(full, abbr)| (full.to_string(), abbr.to_string()))
        .collect();
        Self {
            type_map,
            type_names,
            journal_article_code: 17,
            conference_markers,
            known_abbreviations,
            abbreviation_max_len: 40,
            abbreviation_max_non_ascii: 0.3,
        }
    }
}
