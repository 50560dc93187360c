//! Structural comparison of two export documents.
//!
//! Exports are parsed into a generic tag tree, records are matched by key,
//! and matched records are compared field by field under per-field
//! policies. The result surfaces the highest-impact discrepancies first.

mod compare;
mod policy;
mod report;
mod tree;

pub use compare::{compare_documents, compare_exports};
pub use policy::{IGNORED_FIELDS, STRUCTURAL_FIELDS};
pub use report::{Comparison, Counts, DiffPair, FieldIssue, IssueKind, RecordDiff};
pub use tree::{CompareError, Entry, ExportDocument, XmlValue, parse_export, record_key};
