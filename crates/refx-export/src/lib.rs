//! Export pipeline: source rows → canonical records → export document.
//!
//! Orchestrates the store, normalizer, and serializer with per-record
//! failure isolation, and emits the audit sidecar alongside the document.

mod audit;
mod pipeline;

pub use audit::{AuditField, AuditRecord, AuditWriter};
pub use pipeline::{ExportError, ExportOptions, ExportOutcome, export_library};
