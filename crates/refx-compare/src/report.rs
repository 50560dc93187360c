use std::collections::BTreeMap;

use serde::Serialize;

/// Record counts on both sides of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub reference: usize,
    pub candidate: usize,
    pub matched: usize,
    pub only_reference: usize,
    pub only_candidate: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingInReference,
    MissingInCandidate,
    ContentDiff,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingInReference => "missing_in_reference",
            IssueKind::MissingInCandidate => "missing_in_candidate",
            IssueKind::ContentDiff => "content_diff",
        }
    }
}

/// Both sides of one differing field, in display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffPair {
    pub reference: String,
    pub candidate: String,
}

/// Field-level issues for one matched record key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordDiff {
    pub key: String,
    pub missing_in_reference: Vec<String>,
    pub missing_in_candidate: Vec<String>,
    pub diffs: BTreeMap<String, DiffPair>,
}

impl RecordDiff {
    pub fn is_clean(&self) -> bool {
        self.missing_in_reference.is_empty()
            && self.missing_in_candidate.is_empty()
            && self.diffs.is_empty()
    }
}

/// Aggregated issue count for one (field, kind) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub kind: IssueKind,
    pub count: usize,
}

/// Full comparison result.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub counts: Counts,
    /// Sorted descending by count, so the highest-impact fields lead.
    pub field_issues: Vec<FieldIssue>,
    /// Per matched record, only the records with issues.
    pub detailed: Vec<RecordDiff>,
    pub only_reference: Vec<String>,
    pub only_candidate: Vec<String>,
}

impl Comparison {
    pub fn has_issues(&self) -> bool {
        !self.field_issues.is_empty()
            || self.counts.only_reference > 0
            || self.counts.only_candidate > 0
    }
}
