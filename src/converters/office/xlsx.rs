//! Spreadsheet (XLSX) emitter.
//!
//! One worksheet per page, named `Page N`. Each line becomes a row and each
//! fragment of the line an inline-string cell, left to right. Wide gaps do
//! not insert blank columns: fragments always fill consecutive columns.

use super::package::{
    content_types, relationships, OoxmlPackage, XmlPart, NS_RELATIONSHIPS, REL_OFFICE_DOCUMENT,
};
use crate::converters::{DocumentEmitter, OutputKind, OutputPayload};
use crate::document::{ReconstructedDocument, ReconstructedPage};
use crate::error::Result;

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const CT_WORKBOOK: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const CT_WORKSHEET: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";

/// SpreadsheetML sheet limits: rows 1..=1048576, columns A..=XFD.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
<cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>"#;

/// Spreadsheet emitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxEmitter;

impl XlsxEmitter {
    /// Create a spreadsheet emitter.
    pub fn new() -> Self {
        Self
    }

    /// Build the workbook bytes.
    pub fn render(&self, document: &ReconstructedDocument) -> Result<Vec<u8>> {
        // A workbook must contain at least one sheet
        let placeholder;
        let pages: Vec<&ReconstructedPage> = if document.pages.is_empty() {
            placeholder = ReconstructedPage::default();
            vec![&placeholder]
        } else {
            document.pages.iter().collect()
        };

        let mut package = OoxmlPackage::new();

        let mut overrides = vec![
            ("/xl/workbook.xml".to_string(), CT_WORKBOOK),
            ("/xl/styles.xml".to_string(), CT_STYLES),
        ];
        for index in 1..=pages.len() {
            overrides.push((format!("/xl/worksheets/sheet{}.xml", index), CT_WORKSHEET));
        }
        package.add_part("[Content_Types].xml", &content_types(&overrides)?)?;
        package.add_part(
            "_rels/.rels",
            &relationships(&[("rId1", REL_OFFICE_DOCUMENT, "xl/workbook.xml")])?,
        )?;
        package.add_part("xl/workbook.xml", &workbook(pages.len())?)?;
        package.add_part("xl/_rels/workbook.xml.rels", &workbook_relationships(pages.len())?)?;
        package.add_part("xl/styles.xml", STYLES.as_bytes())?;

        for (index, page) in pages.iter().enumerate() {
            let name = format!("xl/worksheets/sheet{}.xml", index + 1);
            package.add_part(&name, &worksheet(page)?)?;
        }

        log::debug!("Built workbook with {} sheets", pages.len());
        package.finish()
    }
}

impl DocumentEmitter for XlsxEmitter {
    fn emit(&self, document: &ReconstructedDocument) -> Result<OutputPayload> {
        Ok(OutputPayload::Workbook(self.render(document)?))
    }

    fn kind(&self) -> OutputKind {
        OutputKind::Spreadsheet
    }

    fn name(&self) -> &'static str {
        "XlsxEmitter"
    }
}

/// Spreadsheet column letters for a zero-based column index.
///
/// ```text
/// 0 -> A, 25 -> Z, 26 -> AA, 701 -> ZZ, 702 -> AAA
/// ```
pub fn column_name(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

fn workbook(sheet_count: usize) -> Result<Vec<u8>> {
    let mut xml = XmlPart::new()?;
    xml.start("workbook", &[("xmlns", NS_MAIN), ("xmlns:r", NS_RELATIONSHIPS)])?;
    xml.start("sheets", &[])?;
    for index in 1..=sheet_count {
        let name = format!("Page {}", index);
        let id = index.to_string();
        let rel = format!("rId{}", index);
        xml.empty(
            "sheet",
            &[("name", name.as_str()), ("sheetId", id.as_str()), ("r:id", rel.as_str())],
        )?;
    }
    xml.end("sheets")?;
    xml.end("workbook")?;
    Ok(xml.finish())
}

fn workbook_relationships(sheet_count: usize) -> Result<Vec<u8>> {
    let targets: Vec<(String, String)> = (1..=sheet_count)
        .map(|i| (format!("rId{}", i), format!("worksheets/sheet{}.xml", i)))
        .collect();
    let styles_id = format!("rId{}", sheet_count + 1);

    let mut entries: Vec<(&str, &str, &str)> = targets
        .iter()
        .map(|(id, target)| (id.as_str(), REL_WORKSHEET, target.as_str()))
        .collect();
    entries.push((styles_id.as_str(), REL_STYLES, "styles.xml"));
    relationships(&entries)
}

fn worksheet(page: &ReconstructedPage) -> Result<Vec<u8>> {
    let mut xml = XmlPart::new()?;
    xml.start("worksheet", &[("xmlns", NS_MAIN)])?;
    if page.lines.is_empty() {
        xml.empty("sheetData", &[])?;
    } else {
        if page.lines.len() > MAX_ROWS {
            log::warn!(
                "Page {} has {} lines; rows past {} are dropped",
                page.number,
                page.lines.len(),
                MAX_ROWS
            );
        }
        xml.start("sheetData", &[])?;
        for (row_index, line) in page.lines.iter().take(MAX_ROWS).enumerate() {
            if line.len() > MAX_COLUMNS {
                log::warn!(
                    "Page {} row {} has {} fragments; cells past column XFD are dropped",
                    page.number,
                    row_index + 1,
                    line.len()
                );
            }
            let row_number = (row_index + 1).to_string();
            xml.start("row", &[("r", row_number.as_str())])?;
            for (column, fragment) in line.fragments().take(MAX_COLUMNS).enumerate() {
                let reference = format!("{}{}", column_name(column), row_number);
                xml.start("c", &[("r", reference.as_str()), ("t", "inlineStr")])?;
                xml.start("is", &[])?;
                xml.text_element("t", &[("xml:space", "preserve")], &fragment.content)?;
                xml.end("is")?;
                xml.end("c")?;
            }
            xml.end("row")?;
        }
        xml.end("sheetData")?;
    }
    xml.end("worksheet")?;
    Ok(xml.finish())
}
