use crate::sanitize::sanitize;

/// Owned XML element node.
///
/// The export document is assembled as a tree first so the writer can
/// re-serialize the same tree through each fallback strategy. Text and
/// attribute values are sanitized at attachment time, which keeps the tree
/// well-formed no matter what upstream normalization produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_text(name: impl Into<String>, text: &str) -> Self {
        let mut element = Self::new(name);
        element.set_text(text);
        element
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = Some(sanitize(text).into_owned());
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: &str) {
        self.attributes
            .push((name.into(), sanitize(value).into_owned()));
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// First direct child with the given tag.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }
}
