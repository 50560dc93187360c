use std::path::PathBuf;

use anyhow::Result;
use tracing::warn;

use refx_model::{
    AttachmentMap, CanonicalRecord, Contributors, Dates, Periodical, RawRecord, RefType, Titles,
    Urls,
};

use crate::config::NormalizerConfig;
use crate::text::{normalize_line_endings, split_keywords, split_name_lines};
use crate::timestamp::{epoch_iso, format_access_date};

/// Maps raw reference rows onto [`CanonicalRecord`]s.
///
/// Never fails past its own boundary: each field group is computed in
/// isolation, and a failing group is logged and omitted while the rest of
/// the record proceeds.
pub struct Normalizer<'a> {
    config: &'a NormalizerConfig,
    attachments: &'a AttachmentMap,
    pdf_root: PathBuf,
}

impl<'a> Normalizer<'a> {
    pub fn new(
        config: &'a NormalizerConfig,
        attachments: &'a AttachmentMap,
        pdf_root: PathBuf,
    ) -> Self {
        Self {
            config,
            attachments,
            pdf_root,
        }
    }

    pub fn normalize(&self, raw: &RawRecord) -> CanonicalRecord {
        let id = raw.id().unwrap_or_default();
        let raw_code = raw.int("reference_type").unwrap_or(0);
        let code = self.config.mapped_type(raw_code);
        let name = self.config.type_name(code).to_string();
        let mut record = CanonicalRecord::new(id, RefType { code, name });

        record.dates = attempt(id, "dates", || {
            Ok(Dates {
                year: raw.non_blank_text("year"),
                pub_date: raw.non_blank_text("date"),
            })
        })
        .unwrap_or_default();

        record.titles = attempt(id, "titles", || {
            Ok(Titles {
                title: raw.text("title").unwrap_or_default(),
                secondary_title: raw.text("secondary_title").unwrap_or_default(),
                short_title: raw.non_blank_text("short_title"),
                tertiary_title: raw.non_blank_text("tertiary_title"),
                alt_title: raw.non_blank_text("alternate_title"),
            })
        })
        .unwrap_or_default();

        record.contributors = attempt(id, "contributors", || Ok(contributors(raw))).flatten();

        let (periodical, alt_periodical) = attempt(id, "periodical", || {
            Ok(self.periodicals(code, &record.titles))
        })
        .unwrap_or((None, None));
        record.periodical = periodical;
        record.alt_periodical = alt_periodical;

        attempt(id, "fields", || {
            record.pages = raw.non_blank_text("pages");
            record.volume = raw.non_blank_text("volume");
            record.number = raw.non_blank_text("number");
            record.abstract_text = raw.non_blank_text("abstract");
            record.isbn = raw
                .non_blank_text("isbn")
                .map(|text| normalize_line_endings(&text));
            record.work_type = raw.non_blank_text("work_type");
            record.custom1 = raw.non_blank_text("custom1");
            record.custom2 = raw.non_blank_text("custom2");
            record.custom3 = raw.non_blank_text("custom3");
            record.custom7 = raw.non_blank_text("custom7");
            record.section = raw.non_blank_text("section");
            record.label = raw.non_blank_text("label");
            record.pub_location = raw.non_blank_text("place_published");
            record.publisher = raw.non_blank_text("publisher");
            record.accession_num = raw.non_blank_text("accession_number");
            record.auth_address = raw
                .non_blank_text("author_address")
                .map(|text| normalize_line_endings(&text));
            record.edition = raw.non_blank_text("edition");
            record.electronic_resource_num = raw.non_blank_text("electronic_resource_number");
            record.language = raw.non_blank_text("language");
            record.access_date = format_access_date(raw.get("accessed_date"));
            Ok(())
        })
        .unwrap_or_default();

        record.urls = attempt(id, "urls", || Ok(self.urls(id, raw))).flatten();

        record.keywords = attempt(id, "keywords", || {
            Ok(raw
                .text("keywords")
                .map(|text| split_keywords(&text))
                .filter(|keywords| !keywords.is_empty()))
        })
        .flatten();

        let created = attempt(id, "created", || Ok(epoch_iso(raw.get("added_to_library")))).flatten();
        let modified = attempt(id, "modified", || {
            Ok(epoch_iso(raw.get("record_last_updated")))
        })
        .flatten();
        record.notes = attempt(id, "notes", || {
            Ok(synthesize_notes(
                raw.text("notes"),
                created.as_deref(),
                modified.as_deref(),
            ))
        })
        .unwrap_or_default();

        record
    }

    /// Periodical emission and alternate-title disambiguation.
    ///
    /// A periodical block is only meaningful for journal articles, or when
    /// the alternate title names a conference series; anything else would
    /// mislabel book or report containers as journals. An alternate title
    /// strictly shorter than the secondary title is an abbreviation of the
    /// known periodical; otherwise it is a periodical in its own right.
    fn periodicals(
        &self,
        mapped_code: i64,
        titles: &Titles,
    ) -> (Option<Periodical>, Option<Periodical>) {
        let is_journal = mapped_code == self.config.journal_article_code;
        let conference_alt = titles
            .alt_title
            .as_deref()
            .is_some_and(|alt| self.config.is_conference_series(alt));
        if !is_journal && !conference_alt {
            return (None, None);
        }

        let secondary = titles.secondary_title.trim();
        let mut periodical = if secondary.is_empty() {
            None
        } else {
            Some(Periodical {
                full_title: secondary.to_string(),
                abbr: None,
            })
        };
        let mut alt_periodical = None;

        if let Some(alt) = titles.alt_title.clone() {
            let strictly_shorter =
                alt.chars().count() < titles.secondary_title.chars().count();
            match periodical.as_mut() {
                Some(periodical) if strictly_shorter => periodical.abbr = Some(alt),
                _ if is_journal => {
                    let abbr = titles
                        .short_title
                        .clone()
                        .filter(|short| self.config.is_reasonable_abbreviation(short));
                    alt_periodical = Some(Periodical {
                        full_title: alt,
                        abbr,
                    });
                }
                _ => {}
            }
        }

        if let Some(periodical) = periodical.as_mut()
            && periodical.abbr.is_none()
            && let Some(known) = self.config.known_abbreviation(&periodical.full_title)
        {
            periodical.abbr = Some(known.to_string());
        }

        (periodical, alt_periodical)
    }

    fn urls(&self, id: i64, raw: &RawRecord) -> Option<Urls> {
        let mut urls = Urls::default();
        if let Some(text) = raw.non_blank_text("url") {
            urls.web_urls = text.split_whitespace().map(String::from).collect();
        }
        if let Some(paths) = self.attachments.get(&id) {
            for relative in paths {
                let full = self.pdf_root.join(relative);
                if full.is_file() {
                    let resolved = full.canonicalize().unwrap_or(full);
                    urls.pdf_urls.push(resolved.to_string_lossy().into_owned());
                }
            }
        }
        if urls.is_empty() { None } else { Some(urls) }
    }
}

/// Run one field-group computation, logging and omitting the group on
/// failure instead of failing the record.
fn attempt<T>(id: i64, field: &'static str, build: impl FnOnce() -> Result<T>) -> Option<T> {
    match build() {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(record_id = id, field, %error, "field group failed; omitting");
            None
        }
    }
}

fn contributors(raw: &RawRecord) -> Option<Contributors> {
    let authors = raw
        .text("author")
        .map(|block| split_name_lines(&block))
        .unwrap_or_default();
    if authors.is_empty() {
        return None;
    }
    let secondary_authors = raw
        .text("secondary_author")
        .map(|block| split_name_lines(&block))
        .filter(|names| !names.is_empty());
    Some(Contributors {
        authors,
        secondary_authors,
    })
}

/// Notes are synthesized from `Created:`/`Modified:` stamps, with non-blank
/// original notes prepended ahead of a blank separator line.
fn synthesize_notes(
    original: Option<String>,
    created_iso: Option<&str>,
    modified_iso: Option<&str>,
) -> String {
    let mut stamps = Vec::new();
    if let Some(created) = created_iso {
        stamps.push(format!("Created: {created}"));
    }
    if let Some(modified) = modified_iso {
        stamps.push(format!("Modified: {modified}"));
    }
    let stamp_block = stamps.join("\n");
    match original
        .map(|notes| notes.trim().to_string())
        .filter(|notes| !notes.is_empty())
    {
        Some(notes) if stamp_block.is_empty() => notes,
        Some(notes) => format!("{notes}\n\n{stamp_block}"),
        None => stamp_block,
    }
}
