//! The reconstructed document model.
//!
//! Built once per conversion and consumed read-only by the emitters. Each
//! page keeps both views the emitters need: the grouped, ordered lines and
//! the normalized fragments in extraction order.

use crate::layout::{Line, TextFragment};
use serde::Serialize;

/// One source page after layout reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconstructedPage {
    /// Zero-based page index in the source document
    pub number: usize,
    /// Viewport width in page units
    pub width: f32,
    /// Viewport height in page units
    pub height: f32,
    /// Lines, top to bottom
    pub lines: Vec<Line>,
    /// Normalized fragments in extraction order
    pub fragments: Vec<TextFragment>,
}

impl ReconstructedPage {
    /// Whether the page holds no text. Empty pages are valid.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Number of lines on the page.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of fragments on the page.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Split the lines into paragraphs.
    ///
    /// A paragraph is a maximal run of lines where only the first may carry
    /// `paragraph_break_before`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_reflow::document::ReconstructedPage;
    /// use pdf_reflow::layout::{Line, Run, Spacing, TextFragment};
    ///
    /// let line = |y: f32, brk: bool| Line {
    ///     y,
    ///     paragraph_break_before: brk,
    ///     runs: vec![Run { fragment: TextFragment::new("x", 0.0, y, 5.0, 5.0), spacing: Spacing::Joined }],
    /// };
    /// let page = ReconstructedPage {
    ///     number: 0,
    ///     width: 612.0,
    ///     height: 792.0,
    ///     lines: vec![line(10.0, false), line(20.0, false), line(60.0, true)],
    ///     fragments: vec![],
    /// };
    /// let sizes: Vec<usize> = page.paragraphs().iter().map(|p| p.len()).collect();
    /// assert_eq!(sizes, vec![2, 1]);
    /// ```
    pub fn paragraphs(&self) -> Vec<&[Line]> {
        let mut paragraphs = Vec::new();
        let mut start = 0;

        for (index, line) in self.lines.iter().enumerate() {
            if index > start && line.paragraph_break_before {
                paragraphs.push(&self.lines[start..index]);
                start = index;
            }
        }
        if start < self.lines.len() {
            paragraphs.push(&self.lines[start..]);
        }

        paragraphs
    }
}

/// The page → line → fragment structure shared by all emitters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconstructedDocument {
    /// Pages in source order
    pub pages: Vec<ReconstructedPage>,
}

impl ReconstructedDocument {
    /// Create a document from pages in source order.
    pub fn new(pages: Vec<ReconstructedPage>) -> Self {
        Self { pages }
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(ReconstructedPage::line_count).sum()
    }

    /// Total fragments across all pages.
    pub fn fragment_count(&self) -> usize {
        self.pages.iter().map(ReconstructedPage::fragment_count).sum()
    }

    /// Whether the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Serialize the model to pretty JSON, for inspection and diffing.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
