use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::debug;

use crate::policy::{canonical_entry, entries_equal, is_ignored, is_structural};
use crate::report::{Comparison, Counts, DiffPair, FieldIssue, IssueKind, RecordDiff};
use crate::tree::{CompareError, ExportDocument, XmlValue, parse_export};

/// Compare two export documents on disk.
pub fn compare_exports(
    reference_path: &Path,
    candidate_path: &Path,
) -> Result<Comparison, CompareError> {
    let reference = parse_export(reference_path)?;
    let candidate = parse_export(candidate_path)?;
    Ok(compare_documents(&reference, &candidate))
}

/// Compare two parsed documents record by record, field by field.
pub fn compare_documents(reference: &ExportDocument, candidate: &ExportDocument) -> Comparison {
    let reference_keys: BTreeSet<&String> = reference.records.keys().collect();
    let candidate_keys: BTreeSet<&String> = candidate.records.keys().collect();

    let only_reference: Vec<String> = reference_keys
        .difference(&candidate_keys)
        .map(|key| (*key).clone())
        .collect();
    let only_candidate: Vec<String> = candidate_keys
        .difference(&reference_keys)
        .map(|key| (*key).clone())
        .collect();

    let mut issue_counts: BTreeMap<(String, IssueKind), usize> = BTreeMap::new();
    let mut detailed = Vec::new();
    let mut matched = 0usize;

    for key in reference_keys.intersection(&candidate_keys) {
        matched += 1;
        let (Some(a), Some(b)) = (reference.records.get(*key), candidate.records.get(*key)) else {
            continue;
        };
        let diff = compare_record(key, a, b, &mut issue_counts);
        if !diff.is_clean() {
            detailed.push(diff);
        }
    }
    debug!(
        matched,
        only_reference = only_reference.len(),
        only_candidate = only_candidate.len(),
        "record matching complete"
    );

    let mut field_issues: Vec<FieldIssue> = issue_counts
        .into_iter()
        .map(|((field, kind), count)| FieldIssue { field, kind, count })
        .collect();
    field_issues.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.field.cmp(&b.field))
            .then_with(|| a.kind.cmp(&b.kind))
    });

    Comparison {
        counts: Counts {
            reference: reference.record_count(),
            candidate: candidate.record_count(),
            matched,
            only_reference: only_reference.len(),
            only_candidate: only_candidate.len(),
        },
        field_issues,
        detailed,
        only_reference,
        only_candidate,
    }
}

fn compare_record(
    key: &str,
    reference: &XmlValue,
    candidate: &XmlValue,
    issue_counts: &mut BTreeMap<(String, IssueKind), usize>,
) -> RecordDiff {
    let mut diff = RecordDiff {
        key: key.to_string(),
        ..RecordDiff::default()
    };
    let empty = BTreeMap::new();
    let reference_map = match reference {
        XmlValue::Node(map) => map,
        XmlValue::Leaf(_) => &empty,
    };
    let candidate_map = match candidate {
        XmlValue::Node(map) => map,
        XmlValue::Leaf(_) => &empty,
    };

    let fields: BTreeSet<&String> = reference_map.keys().chain(candidate_map.keys()).collect();
    for field in fields {
        if is_ignored(field) {
            continue;
        }
        match (reference_map.get(field), candidate_map.get(field)) {
            (Some(a), Some(b)) => {
                if !entries_equal(field, a, b) {
                    record_issue(issue_counts, field, IssueKind::ContentDiff);
                    diff.diffs.insert(
                        field.clone(),
                        DiffPair {
                            reference: canonical_entry(a),
                            candidate: canonical_entry(b),
                        },
                    );
                }
            }
            (Some(a), None) => {
                if is_structural(field) {
                    record_issue(issue_counts, field, IssueKind::ContentDiff);
                    diff.diffs.insert(
                        field.clone(),
                        DiffPair {
                            reference: canonical_entry(a),
                            candidate: String::new(),
                        },
                    );
                } else {
                    record_issue(issue_counts, field, IssueKind::MissingInCandidate);
                    diff.missing_in_candidate.push(field.clone());
                }
            }
            (None, Some(b)) => {
                if is_structural(field) {
                    record_issue(issue_counts, field, IssueKind::ContentDiff);
                    diff.diffs.insert(
                        field.clone(),
                        DiffPair {
                            reference: String::new(),
                            candidate: canonical_entry(b),
                        },
                    );
                } else {
                    record_issue(issue_counts, field, IssueKind::MissingInReference);
                    diff.missing_in_reference.push(field.clone());
                }
            }
            (None, None) => {}
        }
    }
    diff
}

fn record_issue(
    issue_counts: &mut BTreeMap<(String, IssueKind), usize>,
    field: &str,
    kind: IssueKind,
) {
    *issue_counts.entry((field.to_string(), kind)).or_insert(0) += 1;
}
