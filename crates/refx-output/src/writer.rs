//! Document rendering and the serialization fallback cascade.
//!
//! Rendering degrades in four stages: indented pretty XML, compact XML,
//! a re-escaped compact rendering, and finally a per-record best-effort
//! reconstruction that drops only the records that individually fail.
//! Partial output always beats losing the whole export.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::warn;

use crate::tree::XmlElement;

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Wrap the `<records>` element in the export document root.
pub fn wrap_document(records: XmlElement) -> XmlElement {
    let mut root = XmlElement::new("xml");
    root.push(records);
    root
}

/// Indented rendering of the whole document.
pub fn render_pretty(root: &XmlElement) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root)?;
    let mut rendered = String::from_utf8(writer.into_inner())?;
    rendered.push('\n');
    Ok(rendered)
}

/// Unindented rendering of the whole document.
pub fn render_compact(root: &XmlElement) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

/// Compact rendering with generic XML escaping reapplied by hand.
pub fn render_escaped(root: &XmlElement) -> String {
    let mut out = String::from(XML_DECL);
    escaped_element(root, &mut out);
    out
}

/// Render the document through the fallback cascade. Always yields output;
/// individual records may be dropped (and logged) in the final stage.
pub fn render_with_fallback(root: &XmlElement) -> String {
    match render_pretty(root) {
        Ok(rendered) => return rendered,
        Err(error) => {
            warn!(%error, "pretty serialization failed; falling back to compact output");
        }
    }
    match render_compact(root) {
        Ok(rendered) => return rendered,
        Err(error) => {
            warn!(%error, "compact serialization failed; re-escaping element content");
        }
    }
    let escaped = render_escaped(root);
    if is_well_formed(&escaped) {
        return escaped;
    }
    warn!("re-escaped serialization failed; reconstructing record by record");
    render_per_record(root)
}

/// Write the document to disk through the cascade.
pub fn write_document(path: &Path, root: &XmlElement) -> Result<()> {
    let rendered = render_with_fallback(root);
    fs::write(path, rendered).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn is_well_formed(xml: &str) -> bool {
    let mut reader = quick_xml::Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => return true,
            Ok(_) => {}
            Err(_) => return false,
        }
    }
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }
    let empty = element.text.as_deref().unwrap_or_default().is_empty() && element.children.is_empty();
    if empty {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }
    writer.write_event(Event::Start(start))?;
    if let Some(text) = &element.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

fn escaped_element(element: &XmlElement, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }
    let text = element.text.as_deref().unwrap_or_default();
    if text.is_empty() && element.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    out.push_str(&escape(text));
    for child in &element.children {
        escaped_element(child, out);
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

/// Last-resort reconstruction: serialize each `<record>` independently and
/// keep the ones that succeed.
fn render_per_record(root: &XmlElement) -> String {
    let mut out = String::from(XML_DECL);
    out.push_str("<xml><records>");
    if let Some(records) = root.child("records") {
        for record in &records.children {
            match render_fragment(record) {
                Ok(fragment) => out.push_str(&fragment),
                Err(error) => {
                    let id = record
                        .child("rec-number")
                        .and_then(|number| number.text.clone())
                        .unwrap_or_default();
                    warn!(record_id = %id, %error, "record dropped from degraded output");
                }
            }
        }
    }
    out.push_str("</records></xml>");
    out
}

fn render_fragment(element: &XmlElement) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, element)?;
    Ok(String::from_utf8(writer.into_inner())?)
}
