//! End-to-end export pipeline tests over a temporary library.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use refx_export::{ExportError, ExportOptions, ExportOutcome, export_library};
use refx_normalize::NormalizerConfig;
use refx_store::StoreError;

const SCHEMA: &str = "CREATE TABLE refs (
     id INTEGER,
     trash_state INTEGER NOT NULL DEFAULT 0,
     reference_type INTEGER,
     title TEXT,
     secondary_title TEXT,
     author TEXT,
     year INTEGER,
     pages TEXT,
     volume TEXT,
     number TEXT,
     abstract TEXT,
     isbn TEXT,
     keywords TEXT,
     url TEXT,
     notes TEXT,
     added_to_library INTEGER,
     record_last_updated INTEGER
 );
 CREATE TABLE file_res (refs_id INTEGER, file_path TEXT);";

fn build_library(dir: &Path, seed: &str) -> PathBuf {
    let enl = dir.join("Papers.enl");
    std::fs::write(&enl, b"").expect("touch enl");
    let sdb_dir = dir.join("Papers.Data").join("sdb");
    std::fs::create_dir_all(&sdb_dir).expect("create sdb dir");
    let conn = Connection::open(sdb_dir.join("sdb.eni")).expect("create db");
    conn.execute_batch(SCHEMA).expect("create schema");
    if !seed.is_empty() {
        conn.execute_batch(seed).expect("seed rows");
    }
    enl
}

#[test]
fn exports_candidate_rows_and_writes_audit_lines() {
    let dir = tempfile::tempdir().expect("temp dir");
    let enl = build_library(
        dir.path(),
        "INSERT INTO refs (id, trash_state, reference_type, title, author, year, pages, notes, added_to_library)
         VALUES (1, 0, 0, 'First', 'Smith, J.', 2020, '1-5', 'a note', 1700000000);
         INSERT INTO refs (id, trash_state, reference_type, title, year)
         VALUES (2, 0, 1, 'Second', 2021);
         INSERT INTO refs (id, trash_state, reference_type, title, year)
         VALUES (3, 1, 0, 'Trashed', 2022);",
    );
    let outcome = export_library(&enl, &NormalizerConfig::default(), &ExportOptions::default())
        .expect("export succeeds");

    let ExportOutcome::Written {
        records,
        skipped,
        path,
    } = outcome
    else {
        panic!("expected a written outcome");
    };
    // Trashed rows are not candidates; all candidates were exported.
    assert_eq!(records, 2);
    assert_eq!(skipped, 0);

    let document = std::fs::read_to_string(&path).expect("read export");
    assert!(document.contains("<rec-number>1</rec-number>"));
    assert!(document.contains("<rec-number>2</rec-number>"));
    assert!(!document.contains("Trashed"));
    assert!(document.contains("<ref-type name=\"Journal Article\">17</ref-type>"));
    assert!(document.contains("<ref-type name=\"Book\">6</ref-type>"));

    let audit = std::fs::read_to_string(dir.path().join("Papers_export_audit.jsonl"))
        .expect("read audit sidecar");
    let lines: Vec<&str> = audit.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: serde_json::Value = serde_json::from_str(lines[0]).expect("valid json line");
    assert_eq!(first["id"]["input"], 1);
    assert_eq!(first["id"]["output"], 1);
    assert_eq!(first["reference_type"]["input"], 0);
    assert_eq!(first["reference_type"]["output"], 17);
    assert_eq!(first["author"]["output"][0], "Smith, J.");
}

#[test]
fn audit_sidecar_appends_across_runs() {
    let dir = tempfile::tempdir().expect("temp dir");
    let enl = build_library(
        dir.path(),
        "INSERT INTO refs (id, trash_state, reference_type, title) VALUES (1, 0, 0, 'Only');",
    );
    let options = ExportOptions::default();
    let config = NormalizerConfig::default();
    export_library(&enl, &config, &options).expect("first run");
    export_library(&enl, &config, &options).expect("second run");
    let audit = std::fs::read_to_string(dir.path().join("Papers_export_audit.jsonl"))
        .expect("read audit sidecar");
    assert_eq!(audit.lines().count(), 2);
}

#[test]
fn rows_without_identifiers_are_skipped_not_fatal() {
    let dir = tempfile::tempdir().expect("temp dir");
    let enl = build_library(
        dir.path(),
        "INSERT INTO refs (id, trash_state, reference_type, title) VALUES (1, 0, 0, 'Good');
         INSERT INTO refs (id, trash_state, reference_type, title) VALUES (NULL, 0, 0, 'No id');
         INSERT INTO refs (id, trash_state, reference_type, title) VALUES (1, 0, 0, 'Duplicate id');",
    );
    let outcome = export_library(&enl, &NormalizerConfig::default(), &ExportOptions::default())
        .expect("export succeeds");
    // Exported + skipped always accounts for every candidate row.
    assert_eq!(outcome.records(), 1);
    assert_eq!(outcome.skipped(), 2);
    assert_eq!(outcome.records() + outcome.skipped(), 3);
}

#[test]
fn empty_candidate_set_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let enl = build_library(dir.path(), "");
    let explicit_output = dir.path().join("out.xml");
    let options = ExportOptions {
        output_path: Some(explicit_output.clone()),
        audit_path: None,
    };
    let outcome = export_library(&enl, &NormalizerConfig::default(), &options)
        .expect("export succeeds");
    assert_eq!(outcome, ExportOutcome::Empty { skipped: 0 });
    assert_eq!(outcome.records(), 0);
    assert!(!explicit_output.exists());
}

#[test]
fn missing_store_is_fatal() {
    let dir = tempfile::tempdir().expect("temp dir");
    let enl = dir.path().join("Papers.enl");
    std::fs::write(&enl, b"").expect("touch enl");
    let result = export_library(&enl, &NormalizerConfig::default(), &ExportOptions::default());
    assert!(matches!(
        result,
        Err(ExportError::Store(StoreError::Missing(_)))
    ));
}
