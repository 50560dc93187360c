use std::collections::BTreeMap;

use refx_model::{CanonicalRecord, Periodical};

use crate::tree::XmlElement;

/// Options for record serialization.
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Lowercased journal title → canonical casing, applied to periodical
    /// full titles on the way out.
    pub journal_casing: BTreeMap<String, String>,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        let journal_casing = [
            ("science", "Science"),
            ("nature", "Nature"),
            ("cell", "Cell"),
            ("plos one", "PLoS ONE"),
            ("the lancet", "The Lancet"),
            ("bmj", "BMJ"),
        ]
        .into_iter()
        .map(|(lower, canonical)| (lower.to_string(), canonical.to_string()))
        .collect();
        Self { journal_casing }
    }
}

impl SerializeOptions {
    fn cased_title<'a>(&'a self, title: &'a str) -> &'a str {
        self.journal_casing
            .get(&title.to_lowercase())
            .map(String::as_str)
            .unwrap_or(title)
    }
}

/// Render one canonical record as a `<record>` element.
///
/// Element order is fixed by the import schema. Required elements are
/// emitted even when empty; optional groups are only emitted when they
/// carry data.
pub fn record_element(record: &CanonicalRecord, options: &SerializeOptions) -> XmlElement {
    let mut rec = XmlElement::new("record");
    rec.push(XmlElement::with_text("rec-number", &record.id.to_string()));

    let mut ref_type = XmlElement::with_text("ref-type", &record.ref_type.code.to_string());
    ref_type.set_attribute("name", &record.ref_type.name);
    rec.push(ref_type);

    let mut dates = XmlElement::new("dates");
    if let Some(year) = &record.dates.year {
        dates.push(XmlElement::with_text("year", year));
    }
    if let Some(pub_date) = &record.dates.pub_date {
        let mut pub_dates = XmlElement::new("pub-dates");
        pub_dates.push(XmlElement::with_text("date", pub_date));
        dates.push(pub_dates);
    }
    rec.push(dates);

    let mut titles = XmlElement::new("titles");
    titles.push(XmlElement::with_text("title", &record.titles.title));
    titles.push(XmlElement::with_text(
        "secondary-title",
        &record.titles.secondary_title,
    ));
    if let Some(short_title) = &record.titles.short_title {
        titles.push(XmlElement::with_text("short-title", short_title));
    }
    if let Some(tertiary_title) = &record.titles.tertiary_title {
        titles.push(XmlElement::with_text("tertiary-title", tertiary_title));
    }
    if let Some(alt_title) = &record.titles.alt_title {
        titles.push(XmlElement::with_text("alt-title", alt_title));
    }
    rec.push(titles);

    if let Some(contributors) = &record.contributors {
        let mut node = XmlElement::new("contributors");
        let mut authors = XmlElement::new("authors");
        for author in &contributors.authors {
            authors.push(XmlElement::with_text("author", author));
        }
        node.push(authors);
        if let Some(secondary) = &contributors.secondary_authors {
            let mut secondary_node = XmlElement::new("secondary-authors");
            for author in secondary {
                secondary_node.push(XmlElement::with_text("author", author));
            }
            node.push(secondary_node);
        }
        rec.push(node);
    }

    if let Some(periodical) = &record.periodical {
        rec.push(periodical_element("periodical", periodical, options));
    }
    if let Some(alt_periodical) = &record.alt_periodical {
        rec.push(periodical_element("alt-periodical", alt_periodical, options));
    }

    rec.push(optional_text("pages", record.pages.as_deref()));
    rec.push(optional_text("volume", record.volume.as_deref()));
    rec.push(optional_text("number", record.number.as_deref()));
    rec.push(optional_text("abstract", record.abstract_text.as_deref()));
    rec.push(optional_text("isbn", record.isbn.as_deref()));

    let extensions = [
        ("work-type", &record.work_type),
        ("custom1", &record.custom1),
        ("custom2", &record.custom2),
        ("custom3", &record.custom3),
        ("custom7", &record.custom7),
        ("section", &record.section),
        ("label", &record.label),
        ("pub-location", &record.pub_location),
        ("publisher", &record.publisher),
        ("accession-num", &record.accession_num),
        ("auth-address", &record.auth_address),
        ("edition", &record.edition),
        ("electronic-resource-num", &record.electronic_resource_num),
        ("language", &record.language),
        ("access-date", &record.access_date),
    ];
    for (tag, value) in extensions {
        if let Some(value) = value {
            rec.push(XmlElement::with_text(tag, value));
        }
    }

    if let Some(urls) = &record.urls {
        let mut urls_node = XmlElement::new("urls");
        if !urls.web_urls.is_empty() {
            let mut web = XmlElement::new("web-urls");
            for url in &urls.web_urls {
                web.push(XmlElement::with_text("url", url));
            }
            urls_node.push(web);
        }
        if !urls.pdf_urls.is_empty() {
            let mut pdf = XmlElement::new("pdf-urls");
            for url in &urls.pdf_urls {
                pdf.push(XmlElement::with_text("url", url));
            }
            urls_node.push(pdf);
        }
        rec.push(urls_node);
    }

    if let Some(keywords) = &record.keywords {
        let mut keywords_node = XmlElement::new("keywords");
        for keyword in keywords {
            keywords_node.push(XmlElement::with_text("keyword", keyword));
        }
        rec.push(keywords_node);
    }

    rec.push(XmlElement::with_text("notes", &record.notes));
    rec
}

fn periodical_element(
    tag: &str,
    periodical: &Periodical,
    options: &SerializeOptions,
) -> XmlElement {
    let mut node = XmlElement::new(tag);
    node.push(XmlElement::with_text(
        "full-title",
        options.cased_title(&periodical.full_title),
    ));
    if let Some(abbr) = &periodical.abbr {
        node.push(XmlElement::with_text("abbr-1", abbr));
    }
    node
}

fn optional_text(tag: &str, value: Option<&str>) -> XmlElement {
    match value {
        Some(value) => XmlElement::with_text(tag, value),
        None => XmlElement::new(tag),
    }
}
