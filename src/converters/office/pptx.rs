//! Slide deck (PPTX) emitter.
//!
//! One slide per page. Every fragment of the page becomes its own text box,
//! positioned with a fixed linear scale from page units to EMU. Lines and
//! paragraphs are not used here: the deck keeps the page's geometry, not
//! its reading structure.

use super::package::{
    content_types, relationships, OoxmlPackage, XmlPart, NS_RELATIONSHIPS, REL_OFFICE_DOCUMENT,
};
use crate::converters::{DocumentEmitter, OutputKind, OutputPayload};
use crate::document::{ReconstructedDocument, ReconstructedPage};
use crate::error::Result;
use crate::layout::TextFragment;
use crate::pipeline::SlideConfig;

const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PRESENTATION: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";

/// Default slide size: 10in x 7.5in.
const DEFAULT_SLIDE_SIZE: (i64, i64) = (9_144_000, 6_858_000);
/// Slide dimensions PresentationML accepts, in EMU.
const MIN_SLIDE_EMU: i64 = 914_400;
const MAX_SLIDE_EMU: i64 = 51_206_400;
/// Font size range in hundredths of a point.
const MIN_FONT_SIZE: i64 = 100;
const MAX_FONT_SIZE: i64 = 400_000;

const SLIDE_MASTER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld>
<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>
<p:txStyles><p:titleStyle/><p:bodyStyle/><p:otherStyle/></p:txStyles>
</p:sldMaster>"#;

const SLIDE_LAYOUT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1">
<p:cSld name="Blank"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld>
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#;

const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
<a:themeElements>
<a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="44546A"/></a:dk2><a:lt2><a:srgbClr val="E7E6E6"/></a:lt2><a:accent1><a:srgbClr val="4472C4"/></a:accent1><a:accent2><a:srgbClr val="ED7D31"/></a:accent2><a:accent3><a:srgbClr val="A5A5A5"/></a:accent3><a:accent4><a:srgbClr val="FFC000"/></a:accent4><a:accent5><a:srgbClr val="5B9BD5"/></a:accent5><a:accent6><a:srgbClr val="70AD47"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme>
<a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme>
<a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme>
</a:themeElements>
</a:theme>"#;

/// Slide deck emitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PptxEmitter {
    config: SlideConfig,
}

impl PptxEmitter {
    /// Create a slide deck emitter.
    pub fn new(config: SlideConfig) -> Self {
        Self { config }
    }

    /// Build the presentation bytes.
    pub fn render(&self, document: &ReconstructedDocument) -> Result<Vec<u8>> {
        let slide_count = document.pages.len();
        let (slide_cx, slide_cy) = self.slide_size(document);

        let mut package = OoxmlPackage::new();

        let mut overrides = vec![
            ("/ppt/presentation.xml".to_string(), CT_PRESENTATION),
            ("/ppt/slideMasters/slideMaster1.xml".to_string(), CT_SLIDE_MASTER),
            ("/ppt/slideLayouts/slideLayout1.xml".to_string(), CT_SLIDE_LAYOUT),
            ("/ppt/theme/theme1.xml".to_string(), CT_THEME),
        ];
        for index in 1..=slide_count {
            overrides.push((format!("/ppt/slides/slide{}.xml", index), CT_SLIDE));
        }
        package.add_part("[Content_Types].xml", &content_types(&overrides)?)?;
        package.add_part(
            "_rels/.rels",
            &relationships(&[("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml")])?,
        )?;

        package.add_part("ppt/presentation.xml", &presentation(slide_count, slide_cx, slide_cy)?)?;
        package.add_part(
            "ppt/_rels/presentation.xml.rels",
            &presentation_relationships(slide_count)?,
        )?;

        package.add_part("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER.as_bytes())?;
        package.add_part(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &relationships(&[
                ("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
                ("rId2", REL_THEME, "../theme/theme1.xml"),
            ])?,
        )?;
        package.add_part("ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT.as_bytes())?;
        package.add_part(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &relationships(&[("rId1", REL_SLIDE_MASTER, "../slideMasters/slideMaster1.xml")])?,
        )?;
        package.add_part("ppt/theme/theme1.xml", THEME.as_bytes())?;

        let layout_rel =
            relationships(&[("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml")])?;
        for (index, page) in document.pages.iter().enumerate() {
            let number = index + 1;
            package.add_part(&format!("ppt/slides/slide{}.xml", number), &self.slide(page)?)?;
            package.add_part(&format!("ppt/slides/_rels/slide{}.xml.rels", number), &layout_rel)?;
        }

        log::debug!(
            "Built slide deck with {} slides ({}x{} EMU)",
            slide_count,
            slide_cx,
            slide_cy
        );
        package.finish()
    }

    /// Slide size in EMU, taken from the first page with a usable size.
    fn slide_size(&self, document: &ReconstructedDocument) -> (i64, i64) {
        document
            .pages
            .iter()
            .find(|p| p.width > 0.0 && p.height > 0.0)
            .map(|p| {
                (
                    self.to_emu(p.width).clamp(MIN_SLIDE_EMU, MAX_SLIDE_EMU),
                    self.to_emu(p.height).clamp(MIN_SLIDE_EMU, MAX_SLIDE_EMU),
                )
            })
            .unwrap_or(DEFAULT_SLIDE_SIZE)
    }

    fn to_emu(&self, value: f32) -> i64 {
        let emu = (value as f64 * self.config.emu_per_unit as f64).round();
        if emu.is_finite() && emu > 0.0 {
            emu.min(i64::MAX as f64) as i64
        } else {
            0
        }
    }

    fn font_size(&self, fragment: &TextFragment) -> i64 {
        let points = if fragment.height > 0.0 {
            fragment.height
        } else {
            self.config.default_font_size
        };
        ((points as f64 * 100.0).round() as i64).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    }

    fn slide(&self, page: &ReconstructedPage) -> Result<Vec<u8>> {
        let mut xml = XmlPart::new()?;
        xml.start(
            "p:sld",
            &[
                ("xmlns:a", NS_DRAWING),
                ("xmlns:r", NS_RELATIONSHIPS),
                ("xmlns:p", NS_PRESENTATION),
            ],
        )?;
        xml.start("p:cSld", &[])?;
        xml.start("p:spTree", &[])?;
        group_properties(&mut xml)?;

        for (index, fragment) in page.fragments.iter().enumerate() {
            // Shape id 1 is the tree itself
            self.text_box(&mut xml, index + 2, fragment)?;
        }

        xml.end("p:spTree")?;
        xml.end("p:cSld")?;
        xml.start("p:clrMapOvr", &[])?;
        xml.empty("a:masterClrMapping", &[])?;
        xml.end("p:clrMapOvr")?;
        xml.end("p:sld")?;
        Ok(xml.finish())
    }

    fn text_box(&self, xml: &mut XmlPart, id: usize, fragment: &TextFragment) -> Result<()> {
        // The normalized y is the baseline; the box top sits one height above it
        let x = self.to_emu(fragment.x).to_string();
        let y = self.to_emu((fragment.y - fragment.height).max(0.0)).to_string();
        let cx = self.to_emu(fragment.width).to_string();
        let cy = self.to_emu(fragment.height).to_string();
        let id = id.to_string();
        let name = format!("TextBox {}", id);
        let size = self.font_size(fragment).to_string();

        xml.start("p:sp", &[])?;
        xml.start("p:nvSpPr", &[])?;
        xml.empty("p:cNvPr", &[("id", id.as_str()), ("name", name.as_str())])?;
        xml.empty("p:cNvSpPr", &[("txBox", "1")])?;
        xml.empty("p:nvPr", &[])?;
        xml.end("p:nvSpPr")?;

        xml.start("p:spPr", &[])?;
        xml.start("a:xfrm", &[])?;
        xml.empty("a:off", &[("x", x.as_str()), ("y", y.as_str())])?;
        xml.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
        xml.end("a:xfrm")?;
        xml.start("a:prstGeom", &[("prst", "rect")])?;
        xml.empty("a:avLst", &[])?;
        xml.end("a:prstGeom")?;
        xml.empty("a:noFill", &[])?;
        xml.end("p:spPr")?;

        xml.start("p:txBody", &[])?;
        xml.empty(
            "a:bodyPr",
            &[
                ("wrap", "none"),
                ("lIns", "0"),
                ("tIns", "0"),
                ("rIns", "0"),
                ("bIns", "0"),
                ("rtlCol", "0"),
            ],
        )?;
        xml.empty("a:lstStyle", &[])?;
        xml.start("a:p", &[])?;
        xml.start("a:r", &[])?;
        xml.empty("a:rPr", &[("lang", "en-US"), ("sz", size.as_str()), ("dirty", "0")])?;
        xml.text_element("a:t", &[], &fragment.content)?;
        xml.end("a:r")?;
        xml.end("a:p")?;
        xml.end("p:txBody")?;
        xml.end("p:sp")
    }
}

impl DocumentEmitter for PptxEmitter {
    fn emit(&self, document: &ReconstructedDocument) -> Result<OutputPayload> {
        Ok(OutputPayload::SlideDeck(self.render(document)?))
    }

    fn kind(&self) -> OutputKind {
        OutputKind::SlideDeck
    }

    fn name(&self) -> &'static str {
        "PptxEmitter"
    }
}

fn group_properties(xml: &mut XmlPart) -> Result<()> {
    xml.start("p:nvGrpSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    xml.empty("p:cNvGrpSpPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvGrpSpPr")?;
    xml.start("p:grpSpPr", &[])?;
    xml.start("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    xml.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    xml.end("a:xfrm")?;
    xml.end("p:grpSpPr")
}

fn presentation(slide_count: usize, cx: i64, cy: i64) -> Result<Vec<u8>> {
    let mut xml = XmlPart::new()?;
    xml.start(
        "p:presentation",
        &[
            ("xmlns:a", NS_DRAWING),
            ("xmlns:r", NS_RELATIONSHIPS),
            ("xmlns:p", NS_PRESENTATION),
        ],
    )?;
    xml.start("p:sldMasterIdLst", &[])?;
    xml.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")])?;
    xml.end("p:sldMasterIdLst")?;

    if slide_count > 0 {
        xml.start("p:sldIdLst", &[])?;
        for index in 0..slide_count {
            // Slide ids start at 256; relationship 1 is the master
            let id = (256 + index).to_string();
            let rel = format!("rId{}", index + 2);
            xml.empty("p:sldId", &[("id", id.as_str()), ("r:id", rel.as_str())])?;
        }
        xml.end("p:sldIdLst")?;
    }

    let (cx, cy) = (cx.to_string(), cy.to_string());
    xml.empty("p:sldSz", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    xml.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;
    xml.end("p:presentation")?;
    Ok(xml.finish())
}

fn presentation_relationships(slide_count: usize) -> Result<Vec<u8>> {
    let slides: Vec<(String, String)> = (0..slide_count)
        .map(|i| (format!("rId{}", i + 2), format!("slides/slide{}.xml", i + 1)))
        .collect();
    let theme_id = format!("rId{}", slide_count + 2);

    let mut entries: Vec<(&str, &str, &str)> =
        vec![("rId1", REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml")];
    entries.extend(
        slides
            .iter()
            .map(|(id, target)| (id.as_str(), REL_SLIDE, target.as_str())),
    );
    entries.push((theme_id.as_str(), REL_THEME, "theme/theme1.xml"));
    relationships(&entries)
}
