//! Rich text emitter (Word-compatible HTML).
//!
//! Word processors open HTML carrying the Office namespaces as a native
//! document. The envelope declares UTF-8, a title, and a print-layout view;
//! the body holds one `<p>` per paragraph with `<br>` between the lines of a
//! paragraph. True tab stops are not available, so wide gaps become a run of
//! non-breaking spaces.

use super::{DocumentEmitter, OutputKind, OutputPayload};
use crate::document::{ReconstructedDocument, ReconstructedPage};
use crate::error::Result;
use crate::layout::{Line, Spacing};
use crate::pipeline::RichTextConfig;
use std::fmt::Write;

const ENVELOPE_OPEN: &str = "<html xmlns:o='urn:schemas-microsoft-com:office:office' \
xmlns:w='urn:schemas-microsoft-com:office:word' xmlns='http://www.w3.org/TR/REC-html40'>";

const PRINT_LAYOUT: &str = "<!--[if gte mso 9]><xml><w:WordDocument><w:View>Print</w:View>\
<w:Zoom>100</w:Zoom></w:WordDocument></xml><![endif]-->";

const PAGE_BREAK: &str = "<br clear=all style='page-break-before:always'>";

/// Rich text emitter.
#[derive(Debug, Clone, Default)]
pub struct RichTextEmitter {
    config: RichTextConfig,
}

impl RichTextEmitter {
    /// Create a rich text emitter.
    pub fn new(config: RichTextConfig) -> Self {
        Self { config }
    }

    /// Render a document to Word-compatible HTML.
    pub fn render(&self, document: &ReconstructedDocument) -> String {
        let mut html = String::new();
        html.push_str(ENVELOPE_OPEN);
        html.push('\n');
        let _ = writeln!(
            html,
            "<head><meta charset='utf-8'><title>{}</title>",
            escape_html(&self.config.title)
        );
        html.push_str(PRINT_LAYOUT);
        html.push_str("\n</head>\n<body>\n");

        for (index, page) in document.pages.iter().enumerate() {
            if index > 0 && self.config.page_breaks {
                html.push_str(PAGE_BREAK);
                html.push('\n');
            }
            self.render_page(page, &mut html);
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn render_page(&self, page: &ReconstructedPage, html: &mut String) {
        for paragraph in page.paragraphs() {
            html.push_str("<p>");
            for (index, line) in paragraph.iter().enumerate() {
                if index > 0 {
                    html.push_str("<br>");
                }
                self.render_line(line, html);
            }
            html.push_str("</p>\n");
        }
    }

    fn render_line(&self, line: &Line, html: &mut String) {
        for run in &line.runs {
            match run.spacing {
                Spacing::Joined => {},
                Spacing::Space => html.push(' '),
                Spacing::WideGap => {
                    for _ in 0..self.config.nbsp_per_wide_gap {
                        html.push_str("&nbsp;");
                    }
                },
            }
            html.push_str(&escape_html(&run.fragment.content));
        }
    }
}

impl DocumentEmitter for RichTextEmitter {
    fn emit(&self, document: &ReconstructedDocument) -> Result<OutputPayload> {
        Ok(OutputPayload::RichText(self.render(document)))
    }

    fn kind(&self) -> OutputKind {
        OutputKind::RichText
    }

    fn name(&self) -> &'static str {
        "RichTextEmitter"
    }
}

/// Entity-encode fragment text for the document body.
///
/// ```
/// use pdf_reflow::converters::rich_text::escape_html;
///
/// assert_eq!(escape_html("Q3 <draft> \"R&D\""), "Q3 &lt;draft&gt; &quot;R&amp;D&quot;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
