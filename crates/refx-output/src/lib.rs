//! Serialization of canonical records into the export XML schema.
//!
//! The import boundary is strict about element order but tolerant of
//! missing optional elements; everything here exists to keep the document
//! well-formed and schema-shaped no matter what a single record contains.

mod record_xml;
mod sanitize;
mod tree;
mod writer;

pub use record_xml::{SerializeOptions, record_element};
pub use sanitize::{is_legal_xml_char, sanitize};
pub use tree::XmlElement;
pub use writer::{
    render_compact, render_escaped, render_pretty, render_with_fallback, wrap_document,
    write_document,
};
