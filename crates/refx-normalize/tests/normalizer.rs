//! Tests for the row normalizer and its field heuristics.

use refx_model::{AttachmentMap, RawRecord, RawValue};
use refx_normalize::{
    Normalizer, NormalizerConfig, epoch_iso, format_access_date, normalize_line_endings,
    parse_epoch, split_keywords,
};

fn row(fields: &[(&str, RawValue)]) -> RawRecord {
    let mut record = RawRecord::new();
    for (column, value) in fields {
        record.insert(*column, value.clone());
    }
    record
}

fn text(value: &str) -> RawValue {
    RawValue::Text(value.to_string())
}

fn normalize(raw: &RawRecord) -> refx_model::CanonicalRecord {
    let config = NormalizerConfig::default();
    let attachments = AttachmentMap::new();
    let normalizer = Normalizer::new(&config, &attachments, std::path::PathBuf::from("/nonexistent"));
    normalizer.normalize(raw)
}

#[test]
fn remaps_known_type_and_splits_authors() {
    let raw = row(&[
        ("id", RawValue::Int(5)),
        ("reference_type", RawValue::Int(1)),
        ("title", text("T")),
        ("author", text("Smith, J.\nDoe, A.")),
        ("year", RawValue::Int(2020)),
    ]);
    let record = normalize(&raw);
    assert_eq!(record.id, 5);
    assert_eq!(record.ref_type.code, 6);
    assert_eq!(record.ref_type.name, "Book");
    assert_eq!(record.titles.title, "T");
    assert_eq!(record.dates.year.as_deref(), Some("2020"));
    let contributors = record.contributors.expect("authors present");
    assert_eq!(contributors.authors, vec!["Smith, J.", "Doe, A."]);
    assert_eq!(contributors.secondary_authors, None);
}

#[test]
fn unmapped_type_passes_through_with_empty_name() {
    let raw = row(&[
        ("id", RawValue::Int(1)),
        ("reference_type", RawValue::Int(99)),
    ]);
    let record = normalize(&raw);
    assert_eq!(record.ref_type.code, 99);
    assert_eq!(record.ref_type.name, "");
}

#[test]
fn type_remap_is_pure() {
    let config = NormalizerConfig::default();
    for _ in 0..3 {
        assert_eq!(config.mapped_type(1), 6);
        assert_eq!(config.type_name(6), "Book");
        assert_eq!(config.mapped_type(99), 99);
        assert_eq!(config.type_name(99), "");
    }
}

#[test]
fn zero_and_null_timestamps_have_no_value() {
    assert_eq!(parse_epoch(Some(&RawValue::Int(0))), None);
    assert_eq!(parse_epoch(Some(&RawValue::Null)), None);
    assert_eq!(parse_epoch(None), None);
    assert_eq!(parse_epoch(Some(&text("not a number"))), None);
}

#[test]
fn epoch_renders_second_precision_iso() {
    let iso = epoch_iso(Some(&RawValue::Int(1_700_000_000))).expect("timestamp parses");
    // 2023-11-1xTHH:MM:SS in some local zone; check the shape, not the zone.
    assert_eq!(iso.len(), 19);
    assert_eq!(&iso[..4], "2023");
    assert_eq!(iso.as_bytes()[10], b'T');
    assert_eq!(iso.matches(':').count(), 2);
    // Numeric-string and float-like inputs parse the same way.
    assert_eq!(epoch_iso(Some(&text("1700000000"))).as_deref(), Some(iso.as_str()));
    assert_eq!(
        epoch_iso(Some(&text("1700000000.0"))).as_deref(),
        Some(iso.as_str())
    );
}

#[test]
fn notes_synthesis_prepends_original_text() {
    let raw = row(&[
        ("id", RawValue::Int(2)),
        ("notes", text("  keep me  ")),
        ("added_to_library", RawValue::Int(1_700_000_000)),
        ("record_last_updated", RawValue::Int(1_700_000_100)),
    ]);
    let record = normalize(&raw);
    let mut lines = record.notes.split('\n');
    assert_eq!(lines.next(), Some("keep me"));
    assert_eq!(lines.next(), Some(""));
    assert!(lines.next().expect("created line").starts_with("Created: "));
    assert!(lines.next().expect("modified line").starts_with("Modified: "));
    assert_eq!(lines.next(), None);
}

#[test]
fn notes_without_original_are_just_stamps() {
    let raw = row(&[
        ("id", RawValue::Int(3)),
        ("notes", text("   ")),
        ("record_last_updated", RawValue::Int(1_700_000_000)),
    ]);
    let record = normalize(&raw);
    assert!(record.notes.starts_with("Modified: "));
    assert_eq!(record.notes.lines().count(), 1);
}

#[test]
fn notes_are_empty_when_nothing_exists() {
    let record = normalize(&row(&[("id", RawValue::Int(4))]));
    assert_eq!(record.notes, "");
}

#[test]
fn shorter_alternate_title_becomes_periodical_abbreviation() {
    let raw = row(&[
        ("id", RawValue::Int(10)),
        ("reference_type", RawValue::Int(0)),
        ("secondary_title", text("Journal of Theoretical Examples")),
        ("alternate_title", text("J. Theor. Ex.")),
    ]);
    let record = normalize(&raw);
    let periodical = record.periodical.expect("journal article has periodical");
    assert_eq!(periodical.full_title, "Journal of Theoretical Examples");
    assert_eq!(periodical.abbr.as_deref(), Some("J. Theor. Ex."));
    assert_eq!(record.alt_periodical, None);
}

#[test]
fn longer_alternate_title_becomes_alt_periodical() {
    let raw = row(&[
        ("id", RawValue::Int(11)),
        ("reference_type", RawValue::Int(0)),
        ("secondary_title", text("Short Name")),
        (
            "alternate_title",
            text("A Much Longer Alternate Series Title"),
        ),
        ("short_title", text("AMLAST")),
    ]);
    let record = normalize(&raw);
    assert_eq!(
        record.periodical.expect("periodical").full_title,
        "Short Name"
    );
    let alt = record.alt_periodical.expect("alt periodical");
    assert_eq!(alt.full_title, "A Much Longer Alternate Series Title");
    assert_eq!(alt.abbr.as_deref(), Some("AMLAST"));
}

#[test]
fn unreasonable_short_title_is_not_an_abbreviation() {
    let raw = row(&[
        ("id", RawValue::Int(12)),
        ("reference_type", RawValue::Int(0)),
        ("secondary_title", text("Short Name")),
        ("alternate_title", text("A Longer Alternate Series Title")),
        ("short_title", text("!!! ???")),
    ]);
    let record = normalize(&raw);
    let alt = record.alt_periodical.expect("alt periodical");
    assert_eq!(alt.abbr, None);
}

#[test]
fn known_abbreviation_backfills_missing_abbr() {
    let raw = row(&[
        ("id", RawValue::Int(13)),
        ("reference_type", RawValue::Int(0)),
        ("secondary_title", text("Physical Review Letters")),
    ]);
    let record = normalize(&raw);
    let periodical = record.periodical.expect("periodical");
    assert_eq!(periodical.abbr.as_deref(), Some("Phys. Rev. Lett."));
}

#[test]
fn conference_alternate_title_forces_periodical_without_alt_block() {
    let raw = row(&[
        ("id", RawValue::Int(14)),
        ("reference_type", RawValue::Int(1)),
        ("secondary_title", text("Applied Widgets")),
        (
            "alternate_title",
            text("Proceedings of the 12th Widget Symposium"),
        ),
    ]);
    let record = normalize(&raw);
    assert_eq!(
        record.periodical.expect("periodical").full_title,
        "Applied Widgets"
    );
    // Non-journal records never get an alt-periodical block.
    assert_eq!(record.alt_periodical, None);
}

#[test]
fn plain_book_has_no_periodical() {
    let raw = row(&[
        ("id", RawValue::Int(15)),
        ("reference_type", RawValue::Int(1)),
        ("secondary_title", text("Some Series")),
        ("alternate_title", text("Another Title Entirely")),
    ]);
    let record = normalize(&raw);
    assert_eq!(record.periodical, None);
    assert_eq!(record.alt_periodical, None);
}

#[test]
fn keyword_splitting_prefers_fidelity() {
    assert_eq!(split_keywords("alpha;beta; gamma"), ["alpha", "beta", "gamma"]);
    assert_eq!(split_keywords("alpha\nbeta\r\ngamma"), ["alpha", "beta", "gamma"]);
    assert_eq!(split_keywords("sorting, topological"), ["sorting, topological"]);
    assert!(split_keywords("   ").is_empty());
}

#[test]
fn multiline_blocks_use_carriage_returns() {
    assert_eq!(normalize_line_endings("a\r\nb\nc"), "a\rb\rc");
    let raw = row(&[
        ("id", RawValue::Int(16)),
        ("isbn", text("0-123\n978-456")),
        ("author_address", text("Dept A\r\nDept B")),
    ]);
    let record = normalize(&raw);
    assert_eq!(record.isbn.as_deref(), Some("0-123\r978-456"));
    assert_eq!(record.auth_address.as_deref(), Some("Dept A\rDept B"));
}

#[test]
fn access_date_formats_epochs_and_keeps_text() {
    let formatted = format_access_date(Some(&RawValue::Int(1_700_000_000))).expect("formats");
    assert_eq!(formatted.len(), 19);
    assert_eq!(formatted.as_bytes()[10], b' ');
    assert_eq!(
        format_access_date(Some(&text("12 March 2020"))).as_deref(),
        Some("12 March 2020")
    );
    assert_eq!(format_access_date(Some(&RawValue::Int(0))), None);
    assert_eq!(format_access_date(None), None);
}

#[test]
fn attachments_become_pdf_urls_when_files_exist() {
    let dir = tempfile::tempdir().expect("temp dir");
    let pdf_root = dir.path().join("PDF");
    std::fs::create_dir_all(pdf_root.join("0001")).expect("pdf dir");
    std::fs::write(pdf_root.join("0001/paper.pdf"), b"%PDF").expect("write pdf");

    let mut attachments = AttachmentMap::new();
    attachments.insert(
        20,
        vec!["0001/paper.pdf".to_string(), "0002/missing.pdf".to_string()],
    );
    let config = NormalizerConfig::default();
    let normalizer = Normalizer::new(&config, &attachments, pdf_root);

    let raw = row(&[
        ("id", RawValue::Int(20)),
        ("url", text("https://a.example https://b.example")),
    ]);
    let record = normalizer.normalize(&raw);
    let urls = record.urls.expect("urls present");
    assert_eq!(urls.web_urls, ["https://a.example", "https://b.example"]);
    assert_eq!(urls.pdf_urls.len(), 1);
    assert!(urls.pdf_urls[0].ends_with("paper.pdf"));
}

#[test]
fn record_without_url_data_has_no_urls_group() {
    let record = normalize(&row(&[("id", RawValue::Int(21))]));
    assert_eq!(record.urls, None);
    assert_eq!(record.keywords, None);
    assert_eq!(record.contributors, None);
}
