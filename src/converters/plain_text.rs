//! Plain text emitter.
//!
//! Each line becomes one output line with fragments joined by their
//! classified spacing (nothing, a space, or a tab for wide gaps). A line
//! that starts a paragraph is preceded by a blank line. Pages are joined by
//! a divider surrounded by blank lines.

use super::{DocumentEmitter, OutputKind, OutputPayload};
use crate::document::{ReconstructedDocument, ReconstructedPage};
use crate::error::Result;
use crate::pipeline::PlainTextConfig;

/// Plain text emitter.
#[derive(Debug, Clone, Default)]
pub struct PlainTextEmitter {
    config: PlainTextConfig,
}

impl PlainTextEmitter {
    /// Create a plain text emitter.
    pub fn new(config: PlainTextConfig) -> Self {
        Self { config }
    }

    /// Render a document to a string.
    pub fn render(&self, document: &ReconstructedDocument) -> String {
        let separator = format!("\n\n{}\n\n", self.config.page_separator);
        document
            .pages
            .iter()
            .map(render_page)
            .collect::<Vec<_>>()
            .join(&separator)
    }
}

/// Render one page: lines separated by newlines, paragraph starts by a blank
/// line.
///
/// # Examples
///
/// ```
/// use pdf_reflow::converters::plain_text::render_page;
/// use pdf_reflow::layout::{RawFragment, RawPage};
/// use pdf_reflow::pipeline::{reconstruct_page, LayoutThresholds};
///
/// let raw = RawPage::new(100.0, 100.0, vec![
///     RawFragment::new("one", 0.0, 90.0, 20.0, 8.0),
///     RawFragment::new("two", 0.0, 75.0, 20.0, 8.0),
/// ]);
/// let thresholds = LayoutThresholds::default().with_paragraph_gap(10.0);
/// let page = reconstruct_page(0, &raw, &thresholds);
/// assert_eq!(render_page(&page), "one\n\ntwo");
/// ```
pub fn render_page(page: &ReconstructedPage) -> String {
    let mut text = String::new();

    for (index, line) in page.lines.iter().enumerate() {
        if index > 0 {
            text.push('\n');
            if line.paragraph_break_before {
                text.push('\n');
            }
        }
        text.push_str(&line.text());
    }

    text
}

impl DocumentEmitter for PlainTextEmitter {
    fn emit(&self, document: &ReconstructedDocument) -> Result<OutputPayload> {
        Ok(OutputPayload::PlainText(self.render(document)))
    }

    fn kind(&self) -> OutputKind {
        OutputKind::PlainText
    }

    fn name(&self) -> &'static str {
        "PlainTextEmitter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{RawFragment, RawPage};
    use crate::pipeline::{reconstruct_page, LayoutThresholds};

    fn page(number: usize, items: Vec<RawFragment>) -> ReconstructedPage {
        let thresholds = LayoutThresholds::default().with_paragraph_gap(10.0);
        reconstruct_page(number, &RawPage::new(200.0, 100.0, items), &thresholds)
    }

    #[test]
    fn test_hello_world_tab() {
        let doc = ReconstructedDocument::new(vec![page(
            0,
            vec![
                RawFragment::new("Hello", 0.0, 90.0, 40.0, 10.0),
                RawFragment::new("World", 45.0, 90.0, 40.0, 10.0),
            ],
        )]);
        assert_eq!(PlainTextEmitter::default().render(&doc), "Hello\tWorld");
    }

    #[test]
    fn test_word_space_and_sub_word_join() {
        let doc = ReconstructedDocument::new(vec![page(
            0,
            vec![
                RawFragment::new("Hel", 0.0, 90.0, 15.0, 10.0),
                RawFragment::new("lo", 15.0, 90.0, 10.0, 10.0),
                RawFragment::new("there", 28.0, 90.0, 25.0, 10.0),
            ],
        )]);
        assert_eq!(PlainTextEmitter::default().render(&doc), "Hello there");
    }

    #[test]
    fn test_continuation_line_single_newline() {
        let doc = ReconstructedDocument::new(vec![page(
            0,
            vec![
                RawFragment::new("first", 0.0, 90.0, 20.0, 8.0),
                RawFragment::new("second", 0.0, 82.0, 20.0, 8.0),
            ],
        )]);
        assert_eq!(PlainTextEmitter::default().render(&doc), "first\nsecond");
    }

    #[test]
    fn test_pages_joined_by_separator() {
        let doc = ReconstructedDocument::new(vec![
            page(0, vec![RawFragment::new("a", 0.0, 90.0, 5.0, 8.0)]),
            page(1, vec![]),
            page(2, vec![RawFragment::new("c", 0.0, 90.0, 5.0, 8.0)]),
        ]);
        let emitter = PlainTextEmitter::new(PlainTextConfig {
            page_separator: "===".to_string(),
        });
        assert_eq!(emitter.render(&doc), "a\n\n===\n\n\n\n===\n\nc");
    }

    #[test]
    fn test_empty_document() {
        let payload = PlainTextEmitter::default()
            .emit(&ReconstructedDocument::default())
            .unwrap();
        assert_eq!(payload, OutputPayload::PlainText(String::new()));
    }
}
