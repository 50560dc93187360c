//! Generic XML-to-tree conversion for export documents.
//!
//! Each element becomes either trimmed leaf text or a map of child tag to
//! one-or-many values; repeated sibling tags collapse into an ordered list.
//! The decorative `<style>` wrapper some exporters emit around text is
//! unwrapped wherever it appears as an element's sole child.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};
use serde::Serialize;
use thiserror::Error;

/// Tag treated as a transparent formatting wrapper.
const WRAPPER_TAG: &str = "style";

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
}

/// Parsed element content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum XmlValue {
    Leaf(String),
    Node(BTreeMap<String, Entry>),
}

/// One child tag's content: a single value, or the ordered list formed by
/// repeated siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    One(XmlValue),
    Many(Vec<XmlValue>),
}

impl Entry {
    /// List view: a single value is a one-element list.
    pub fn values(&self) -> Vec<&XmlValue> {
        match self {
            Entry::One(value) => vec![value],
            Entry::Many(values) => values.iter().collect(),
        }
    }

    pub fn first(&self) -> Option<&XmlValue> {
        match self {
            Entry::One(value) => Some(value),
            Entry::Many(values) => values.first(),
        }
    }
}

/// One parsed export document, records keyed for matching.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub records: BTreeMap<String, XmlValue>,
}

impl ExportDocument {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// Parse an export document and key its `<record>` elements.
pub fn parse_export(path: &Path) -> Result<ExportDocument, CompareError> {
    let text = fs::read_to_string(path).map_err(|source| CompareError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = Document::parse(&text).map_err(|source| CompareError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let mut records = BTreeMap::new();
    for node in document
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "record")
    {
        let value = element_value(node);
        records.insert(record_key(&value), value);
    }
    Ok(ExportDocument { records })
}

fn element_value(node: Node<'_, '_>) -> XmlValue {
    let children: Vec<Node<'_, '_>> = node.children().filter(Node::is_element).collect();
    if children.is_empty() {
        return XmlValue::Leaf(node.text().unwrap_or("").trim().to_string());
    }
    if children.len() == 1 && children[0].tag_name().name() == WRAPPER_TAG {
        return element_value(children[0]);
    }
    let mut grouped: BTreeMap<String, Vec<XmlValue>> = BTreeMap::new();
    for child in children {
        grouped
            .entry(child.tag_name().name().to_string())
            .or_default()
            .push(element_value(child));
    }
    let map = grouped
        .into_iter()
        .map(|(tag, mut values)| {
            let entry = if values.len() == 1 {
                Entry::One(values.remove(0))
            } else {
                Entry::Many(values)
            };
            (tag, entry)
        })
        .collect();
    XmlValue::Node(map)
}

/// Matching key for a record: `rec-number` when present and non-empty,
/// otherwise the `title:<title>|year:<year>` composite. The composite can
/// collide across distinct records that lack an identifier; no further
/// disambiguation is attempted.
pub fn record_key(record: &XmlValue) -> String {
    if let Some(number) = leaf_at(record, &["rec-number"])
        && !number.is_empty()
    {
        return number.to_string();
    }
    let title = leaf_at(record, &["titles", "title"]).unwrap_or_default();
    let year = leaf_at(record, &["dates", "year"]).unwrap_or_default();
    format!("title:{title}|year:{year}")
}

/// Follow a path of tags through nested nodes to a leaf.
fn leaf_at<'a>(value: &'a XmlValue, path: &[&str]) -> Option<&'a str> {
    let mut current = value;
    for tag in path {
        let XmlValue::Node(map) = current else {
            return None;
        };
        current = map.get(*tag)?.first()?;
    }
    match current {
        XmlValue::Leaf(text) => Some(text.as_str()),
        XmlValue::Node(_) => None,
    }
}
