use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use thiserror::Error;
use tracing::{info, warn};

use refx_model::RawRecord;
use refx_normalize::{Normalizer, NormalizerConfig};
use refx_output::{SerializeOptions, XmlElement, record_element, wrap_document, write_document};
use refx_store::{Library, StoreError};

use crate::audit::{AuditRecord, AuditWriter};

/// Export run configuration. Paths default to sit next to the library file.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub output_path: Option<PathBuf>,
    pub audit_path: Option<PathBuf>,
}

/// Outcome of one export run.
///
/// An export that serialized nothing is a distinct non-error outcome: no
/// document is written, so downstream tools never see an empty export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written {
        records: usize,
        skipped: usize,
        path: PathBuf,
    },
    Empty {
        skipped: usize,
    },
}

impl ExportOutcome {
    pub fn records(&self) -> usize {
        match self {
            ExportOutcome::Written { records, .. } => *records,
            ExportOutcome::Empty { .. } => 0,
        }
    }

    pub fn skipped(&self) -> usize {
        match self {
            ExportOutcome::Written { skipped, .. } | ExportOutcome::Empty { skipped } => *skipped,
        }
    }
}

/// Fatal export failures. Per-record problems never surface here; they are
/// logged and the record is skipped.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to write audit sidecar '{path}': {source}")]
    Audit {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to write export document: {0}")]
    Write(#[source] anyhow::Error),
}

/// Export one library to the target XML schema.
///
/// The store connection lives for exactly this call and is closed on every
/// exit path when it drops.
pub fn export_library(
    enl_path: &Path,
    config: &NormalizerConfig,
    options: &ExportOptions,
) -> std::result::Result<ExportOutcome, ExportError> {
    let library = Library::locate(enl_path)?;
    let store = library.open()?;
    let rows = store.fetch_references()?;
    let attachments = store.fetch_attachments()?;
    info!(rows = rows.len(), "loaded candidate rows");

    let output_path = options
        .output_path
        .clone()
        .unwrap_or_else(|| library.default_export_path());
    let audit_path = options
        .audit_path
        .clone()
        .unwrap_or_else(|| library.default_audit_path());
    let mut audit = AuditWriter::open_append(&audit_path).map_err(|source| ExportError::Audit {
        path: audit_path.clone(),
        source: source.into(),
    })?;

    let normalizer = Normalizer::new(config, &attachments, library.pdf_dir());
    let serialize_options = SerializeOptions::default();
    let mut records = XmlElement::new("records");
    let mut seen_ids = BTreeSet::new();
    let mut exported = 0usize;
    let mut skipped = 0usize;

    for raw in &rows {
        match build_record(&normalizer, &serialize_options, raw, &mut seen_ids) {
            Ok((audit_record, element)) => {
                audit
                    .append(&audit_record)
                    .map_err(|source| ExportError::Audit {
                        path: audit_path.clone(),
                        source,
                    })?;
                records.push(element);
                exported += 1;
            }
            Err(error) => {
                warn!(
                    record_id = raw.id().unwrap_or_default(),
                    %error,
                    "record failed; skipping"
                );
                skipped += 1;
            }
        }
    }

    if exported == 0 {
        info!(skipped, "no records serialized; no document written");
        return Ok(ExportOutcome::Empty { skipped });
    }

    let root = wrap_document(records);
    write_document(&output_path, &root).map_err(ExportError::Write)?;
    info!(
        records = exported,
        skipped,
        path = %output_path.display(),
        "export complete"
    );
    Ok(ExportOutcome::Written {
        records: exported,
        skipped,
        path: output_path,
    })
}

/// Normalize and serialize one row. Failures here are per-record and leave
/// the rest of the export untouched.
fn build_record(
    normalizer: &Normalizer<'_>,
    serialize_options: &SerializeOptions,
    raw: &RawRecord,
    seen_ids: &mut BTreeSet<i64>,
) -> Result<(AuditRecord, XmlElement)> {
    let id = raw
        .id()
        .ok_or_else(|| anyhow!("row is missing a record identifier"))?;
    if !seen_ids.insert(id) {
        return Err(anyhow!("duplicate record identifier {id}"));
    }
    let record = normalizer.normalize(raw);
    let audit_record = AuditRecord::build(raw, &record);
    let element = record_element(&record, serialize_options);
    Ok((audit_record, element))
}
