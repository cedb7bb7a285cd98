//! OOXML package writing.
//!
//! An Office Open XML file is a ZIP archive of XML parts. [`OoxmlPackage`]
//! collects parts in memory; [`XmlPart`] builds a single part with
//! quick-xml so attribute values and text are always escaped.

use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Relationship namespace shared by every package.
pub(crate) const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// Package relationships namespace.
pub(crate) const NS_PACKAGE_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";
/// Content types namespace.
pub(crate) const NS_CONTENT_TYPES: &str =
    "http://schemas.openxmlformats.org/package/2006/content-types";
/// Relationship type of the package's main document part.
pub(crate) const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

/// In-memory ZIP archive of XML parts.
pub(crate) struct OoxmlPackage {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    parts: usize,
}

impl OoxmlPackage {
    pub(crate) fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            parts: 0,
        }
    }

    /// Add a part at `name` (a path inside the archive, no leading slash).
    pub(crate) fn add_part(&mut self, name: &str, content: &[u8]) -> Result<()> {
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(content)?;
        self.parts += 1;
        Ok(())
    }

    /// Close the archive and return its bytes.
    pub(crate) fn finish(self) -> Result<Vec<u8>> {
        log::trace!("Finishing OOXML package with {} parts", self.parts);
        Ok(self.zip.finish()?.into_inner())
    }
}

/// Builder for one XML part.
pub(crate) struct XmlPart {
    writer: Writer<Vec<u8>>,
}

impl XmlPart {
    /// Start a part with a standalone UTF-8 declaration.
    pub(crate) fn new() -> Result<Self> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(xml_error)?;
        Ok(Self { writer })
    }

    pub(crate) fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let element = element(name, attributes);
        self.writer.write_event(Event::Start(element)).map_err(xml_error)
    }

    pub(crate) fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let element = element(name, attributes);
        self.writer.write_event(Event::Empty(element)).map_err(xml_error)
    }

    pub(crate) fn text(&mut self, text: &str) -> Result<()> {
        let text = sanitize_xml_text(text);
        self.writer
            .write_event(Event::Text(BytesText::new(&text)))
            .map_err(xml_error)
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_error)
    }

    /// Write `<name attrs>text</name>`.
    pub(crate) fn text_element(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
        text: &str,
    ) -> Result<()> {
        self.start(name, attributes)?;
        self.text(text)?;
        self.end(name)
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn element<'a>(name: &'a str, attributes: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    for &attribute in attributes {
        element.push_attribute(attribute);
    }
    element
}

fn xml_error(e: impl std::fmt::Display) -> Error {
    Error::Xml(e.to_string())
}

/// Drop characters outside the XML 1.0 `Char` production.
///
/// Decoders occasionally hand over control characters or noncharacters from
/// broken font encodings; a single one would make the whole part unreadable.
pub(crate) fn sanitize_xml_text(text: &str) -> std::borrow::Cow<'_, str> {
    let allowed = |c: char| {
        matches!(c,
            '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}')
    };
    if text.chars().all(allowed) {
        std::borrow::Cow::Borrowed(text)
    } else {
        std::borrow::Cow::Owned(text.chars().filter(|&c| allowed(c)).collect())
    }
}

/// Write a relationships part.
///
/// Each entry is `(id, type, target)`.
pub(crate) fn relationships(entries: &[(&str, &str, &str)]) -> Result<Vec<u8>> {
    let mut xml = XmlPart::new()?;
    xml.start("Relationships", &[("xmlns", NS_PACKAGE_RELATIONSHIPS)])?;
    for &(id, kind, target) in entries {
        xml.empty("Relationship", &[("Id", id), ("Type", kind), ("Target", target)])?;
    }
    xml.end("Relationships")?;
    Ok(xml.finish())
}

/// Write a `[Content_Types].xml` part.
///
/// `overrides` maps absolute part names to content types; `rels` and `xml`
/// extensions get defaults.
pub(crate) fn content_types(overrides: &[(String, &str)]) -> Result<Vec<u8>> {
    let mut xml = XmlPart::new()?;
    xml.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    xml.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
    for (part_name, content_type) in overrides {
        xml.empty(
            "Override",
            &[("PartName", part_name.as_str()), ("ContentType", *content_type)],
        )?;
    }
    xml.end("Types")?;
    Ok(xml.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_xml_part_escapes_text_and_attributes() {
        let mut xml = XmlPart::new().unwrap();
        xml.text_element("t", &[("name", "a\"b")], "x < y & z").unwrap();
        let out = String::from_utf8(xml.finish()).unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
        assert!(out.contains("name=\"a&quot;b\""));
        assert!(out.contains(">x &lt; y &amp; z</t>"));
    }

    #[test]
    fn test_sanitize_drops_control_characters() {
        assert_eq!(sanitize_xml_text("plain"), "plain");
        assert_eq!(sanitize_xml_text("a\u{0}b\u{1b}c"), "abc");
        assert_eq!(sanitize_xml_text("tab\there"), "tab\there");
    }

    #[test]
    fn test_sanitize_follows_xml_char_ranges() {
        assert_eq!(sanitize_xml_text("a\u{FFFF}b\u{FFFE}c"), "abc");
        // C1 controls and astral characters are legal XML
        assert_eq!(sanitize_xml_text("x\u{85}y"), "x\u{85}y");
        assert_eq!(sanitize_xml_text("\u{1D400}\u{FFFD}"), "\u{1D400}\u{FFFD}");
        assert!(matches!(sanitize_xml_text("\u{E000}"), std::borrow::Cow::Borrowed(_)));
    }

    #[test]
    fn test_package_round_trip() {
        let mut package = OoxmlPackage::new();
        package.add_part("a.xml", b"<a/>").unwrap();
        package.add_part("dir/b.xml", b"<b/>").unwrap();
        let bytes = package.finish().unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        let mut content = String::new();
        archive
            .by_name("dir/b.xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "<b/>");
    }

    #[test]
    fn test_relationships_part() {
        let rels = relationships(&[("rId1", REL_OFFICE_DOCUMENT, "xl/workbook.xml")]).unwrap();
        let rels = String::from_utf8(rels).unwrap();
        assert!(rels.contains("<Relationship Id=\"rId1\""));
        assert!(rels.contains("Target=\"xl/workbook.xml\"/>"));
    }
}
