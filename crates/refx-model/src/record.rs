use serde::Serialize;

/// Reference type after remapping.
///
/// `code` is always resolvable: unmapped source codes pass through unchanged.
/// `name` is the target schema's display name and may be empty when the code
/// has no known name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefType {
    pub code: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dates {
    pub year: Option<String>,
    pub pub_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Titles {
    pub title: String,
    pub secondary_title: String,
    pub short_title: Option<String>,
    pub tertiary_title: Option<String>,
    pub alt_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contributors {
    pub authors: Vec<String>,
    pub secondary_authors: Option<Vec<String>>,
}

/// Journal or series title block, with an optional abbreviation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Periodical {
    pub full_title: String,
    pub abbr: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Urls {
    pub web_urls: Vec<String>,
    pub pdf_urls: Vec<String>,
}

impl Urls {
    pub fn is_empty(&self) -> bool {
        self.web_urls.is_empty() && self.pdf_urls.is_empty()
    }
}

/// Normalized representation of one bibliographic entry, independent of the
/// source schema. Built once per source row, consumed once by the serializer,
/// and never mutated afterwards.
///
/// Optional groups are absent (None) whenever they would carry no data, so
/// the serializer never has to emit empty wrapper elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub id: i64,
    pub ref_type: RefType,
    pub dates: Dates,
    pub titles: Titles,
    pub contributors: Option<Contributors>,
    pub periodical: Option<Periodical>,
    pub alt_periodical: Option<Periodical>,
    pub pages: Option<String>,
    pub volume: Option<String>,
    pub number: Option<String>,
    pub abstract_text: Option<String>,
    pub isbn: Option<String>,
    pub work_type: Option<String>,
    pub custom1: Option<String>,
    pub custom2: Option<String>,
    pub custom3: Option<String>,
    pub custom7: Option<String>,
    pub section: Option<String>,
    pub label: Option<String>,
    pub pub_location: Option<String>,
    pub publisher: Option<String>,
    pub accession_num: Option<String>,
    pub auth_address: Option<String>,
    pub edition: Option<String>,
    pub electronic_resource_num: Option<String>,
    pub language: Option<String>,
    pub access_date: Option<String>,
    pub urls: Option<Urls>,
    pub keywords: Option<Vec<String>>,
    /// Synthesized notes text. Always present, possibly empty.
    pub notes: String,
}

impl CanonicalRecord {
    /// A record with only the required skeleton filled in.
    pub fn new(id: i64, ref_type: RefType) -> Self {
        Self {
            id,
            ref_type,
            dates: Dates::default(),
            titles: Titles::default(),
            contributors: None,
            periodical: None,
            alt_periodical: None,
            pages: None,
            volume: None,
            number: None,
            abstract_text: None,
            isbn: None,
            work_type: None,
            custom1: None,
            custom2: None,
            custom3: None,
            custom7: None,
            section: None,
            label: None,
            pub_location: None,
            publisher: None,
            accession_num: None,
            auth_address: None,
            edition: None,
            electronic_resource_num: None,
            language: None,
            access_date: None,
            urls: None,
            keywords: None,
            notes: String::new(),
        }
    }
}
