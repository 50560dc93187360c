//! Per-field comparison policies.
//!
//! The default is trimmed-string equality; list values compare as
//! order-insensitive multisets and nested nodes by key union. A few fields
//! carry named overrides tuned against real exports.

use std::collections::{BTreeMap, BTreeSet};

use crate::tree::{Entry, XmlValue};

/// Fields excluded from comparison: free-form notes plus provenance-only
/// fields that legitimately differ between exporters.
pub const IGNORED_FIELDS: &[&str] = &["notes", "database", "source-app", "foreign-keys"];

/// Multi-line blocks compared as sets of normalized lines.
const LINE_SET_FIELDS: &[&str] = &["isbn", "auth-address"];

/// Short code fields compared after whitespace collapse.
const COLLAPSED_FIELDS: &[&str] = &["accession-num"];

/// Structural fields that are never reported as missing; presence
/// differences fold into the content-diff count instead.
pub const STRUCTURAL_FIELDS: &[&str] = &["contributors", "urls"];

pub fn is_ignored(field: &str) -> bool {
    IGNORED_FIELDS.contains(&field)
}

pub fn is_structural(field: &str) -> bool {
    STRUCTURAL_FIELDS.contains(&field)
}

/// Compare one field's entries under the field's policy.
pub fn entries_equal(field: &str, a: &Entry, b: &Entry) -> bool {
    if LINE_SET_FIELDS.contains(&field) {
        return line_set(a) == line_set(b);
    }
    if COLLAPSED_FIELDS.contains(&field) {
        return collapsed(a) == collapsed(b);
    }
    entries_equal_by_shape(a, b)
}

fn entries_equal_by_shape(a: &Entry, b: &Entry) -> bool {
    match (a, b) {
        (Entry::One(a), Entry::One(b)) => values_equal(a, b),
        // At least one side is a list: order-insensitive multiset equality.
        _ => {
            let mut left: Vec<String> = a.values().iter().map(|v| canonical(v)).collect();
            let mut right: Vec<String> = b.values().iter().map(|v| canonical(v)).collect();
            left.sort();
            right.sort();
            left == right
        }
    }
}

fn values_equal(a: &XmlValue, b: &XmlValue) -> bool {
    match (a, b) {
        (XmlValue::Leaf(a), XmlValue::Leaf(b)) => a.trim() == b.trim(),
        (XmlValue::Node(a), XmlValue::Node(b)) => nodes_equal(a, b),
        _ => false,
    }
}

/// Recursive key-union comparison of two nodes.
fn nodes_equal(a: &BTreeMap<String, Entry>, b: &BTreeMap<String, Entry>) -> bool {
    let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
    keys.into_iter().all(|key| match (a.get(key), b.get(key)) {
        (Some(a), Some(b)) => entries_equal_by_shape(a, b),
        _ => false,
    })
}

/// Deterministic rendering used for multiset sorting and diff display.
pub fn canonical(value: &XmlValue) -> String {
    match value {
        XmlValue::Leaf(text) => text.trim().to_string(),
        XmlValue::Node(map) => {
            let mut out = String::from("{");
            let mut first = true;
            for (tag, entry) in map {
                if !first {
                    out.push_str(", ");
                }
                first = false;
                out.push_str(tag);
                out.push('=');
                out.push_str(&canonical_entry(entry));
            }
            out.push('}');
            out
        }
    }
}

pub fn canonical_entry(entry: &Entry) -> String {
    match entry {
        Entry::One(value) => canonical(value),
        Entry::Many(values) => {
            let parts: Vec<String> = values.iter().map(canonical).collect();
            format!("[{}]", parts.join(", "))
        }
    }
}

/// Non-empty, line-ending-normalized lines of every leaf under the entry,
/// as an order-insensitive set.
fn line_set(entry: &Entry) -> BTreeSet<String> {
    let mut lines = BTreeSet::new();
    for value in entry.values() {
        collect_lines(value, &mut lines);
    }
    lines
}

fn collect_lines(value: &XmlValue, lines: &mut BTreeSet<String>) {
    match value {
        XmlValue::Leaf(text) => {
            for line in text.split(['\r', '\n']) {
                let line = line.trim();
                if !line.is_empty() {
                    lines.insert(line.to_string());
                }
            }
        }
        XmlValue::Node(map) => {
            for entry in map.values() {
                for value in entry.values() {
                    collect_lines(value, lines);
                }
            }
        }
    }
}

fn collapsed(entry: &Entry) -> String {
    canonical_entry(entry)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
