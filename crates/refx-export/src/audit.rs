//! Audit sidecar: one NDJSON object per processed record, pairing raw input
//! values with their normalized outputs for offline validation. The file is
//! append-only across runs and flushed per line.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};

use refx_model::{CanonicalRecord, RawRecord};

#[derive(Debug, Clone, Serialize)]
pub struct AuditField {
    pub input: Value,
    pub output: Value,
}

/// The fixed field subset tracked per record.
#[derive(Debug, Serialize)]
pub struct AuditRecord {
    pub id: AuditField,
    pub reference_type: AuditField,
    pub year: AuditField,
    pub title: AuditField,
    pub secondary_title: AuditField,
    pub author: AuditField,
    pub pages: AuditField,
    pub volume: AuditField,
    pub number: AuditField,
    pub isbn: AuditField,
    pub keywords: AuditField,
    pub url: AuditField,
}

impl AuditRecord {
    pub fn build(raw: &RawRecord, record: &CanonicalRecord) -> Self {
        let field = |column: &str, output: Value| AuditField {
            input: raw
                .get(column)
                .map(|value| json!(value))
                .unwrap_or(Value::Null),
            output,
        };
        Self {
            id: field("id", json!(record.id)),
            reference_type: field("reference_type", json!(record.ref_type.code)),
            year: field("year", json!(record.dates.year)),
            title: field("title", json!(record.titles.title)),
            secondary_title: field("secondary_title", json!(record.titles.secondary_title)),
            author: field(
                "author",
                record
                    .contributors
                    .as_ref()
                    .map(|contributors| json!(contributors.authors))
                    .unwrap_or(Value::Null),
            ),
            pages: field("pages", json!(record.pages)),
            volume: field("volume", json!(record.volume)),
            number: field("number", json!(record.number)),
            isbn: field("isbn", json!(record.isbn)),
            keywords: field("keywords", json!(record.keywords)),
            url: field(
                "url",
                record
                    .urls
                    .as_ref()
                    .map(|urls| json!(urls.web_urls))
                    .unwrap_or(Value::Null),
            ),
        }
    }
}

/// Append-only writer for the sidecar file.
pub struct AuditWriter {
    file: File,
}

impl AuditWriter {
    pub fn open_append(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    pub fn append(&mut self, record: &AuditRecord) -> Result<()> {
        let line = serde_json::to_string(record).context("encode audit record")?;
        writeln!(self.file, "{line}").context("append audit record")?;
        self.file.flush().context("flush audit record")?;
        Ok(())
    }
}
