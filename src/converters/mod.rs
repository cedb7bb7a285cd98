//! Format emitters for reconstructed documents.
//!
//! Each emitter is a stateless pure function over a
//! [`ReconstructedDocument`], and each reads the model at the granularity
//! native to its target:
//! - **Plain text**: page text, one output line per line
//! - **Rich text**: paragraphs, Word-compatible HTML
//! - **Spreadsheet**: rows, one sheet per page (XLSX)
//! - **Slides**: raw fragments, one positioned text box each (PPTX)
//!
//! Because emitters only read the model, several of them may run over the
//! same document concurrently.
//!
//! # Examples
//!
//! ```
//! use pdf_reflow::converters::{create_emitter, OutputKind};
//! use pdf_reflow::document::ReconstructedDocument;
//! use pdf_reflow::pipeline::ReflowConfig;
//!
//! let kind: OutputKind = "txt".parse()?;
//! let emitter = create_emitter(kind, &ReflowConfig::default())?;
//! let payload = emitter.emit(&ReconstructedDocument::default())?;
//! assert_eq!(payload.kind(), OutputKind::PlainText);
//! # Ok::<(), pdf_reflow::Error>(())
//! ```

pub mod office;
pub mod plain_text;
pub mod rich_text;

pub use plain_text::PlainTextEmitter;
pub use rich_text::RichTextEmitter;

#[cfg(feature = "office")]
pub use office::{PptxEmitter, XlsxEmitter};

use crate::document::ReconstructedDocument;
use crate::error::{Error, Result};
use crate::pipeline::ReflowConfig;
use std::fmt;
use std::str::FromStr;

/// Target document shape requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// Plain text
    PlainText,
    /// Word-processor compatible rich text
    RichText,
    /// Spreadsheet workbook
    Spreadsheet,
    /// Slide deck
    SlideDeck,
}

impl OutputKind {
    /// All output kinds.
    pub const ALL: [OutputKind; 4] = [
        OutputKind::PlainText,
        OutputKind::RichText,
        OutputKind::Spreadsheet,
        OutputKind::SlideDeck,
    ];

    /// File extension for the produced payload.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputKind::PlainText => "txt",
            OutputKind::RichText => "doc",
            OutputKind::Spreadsheet => "xlsx",
            OutputKind::SlideDeck => "pptx",
        }
    }

    /// MIME type for the produced payload.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputKind::PlainText => "text/plain",
            OutputKind::RichText => "application/msword",
            OutputKind::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            },
            OutputKind::SlideDeck => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            },
        }
    }

    /// Whether the payload is binary rather than text.
    pub fn is_binary(&self) -> bool {
        matches!(self, OutputKind::Spreadsheet | OutputKind::SlideDeck)
    }
}

impl FromStr for OutputKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" | "plain" => Ok(OutputKind::PlainText),
            "doc" | "word" | "rich" => Ok(OutputKind::RichText),
            "xls" | "xlsx" | "spreadsheet" => Ok(OutputKind::Spreadsheet),
            "ppt" | "pptx" | "slides" => Ok(OutputKind::SlideDeck),
            other => Err(Error::UnsupportedTarget(other.to_string())),
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Format-native result of an emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPayload {
    /// Plain text
    PlainText(String),
    /// Rich text markup
    RichText(String),
    /// XLSX workbook bytes
    Workbook(Vec<u8>),
    /// PPTX presentation bytes
    SlideDeck(Vec<u8>),
}

impl OutputPayload {
    /// The kind this payload belongs to.
    pub fn kind(&self) -> OutputKind {
        match self {
            OutputPayload::PlainText(_) => OutputKind::PlainText,
            OutputPayload::RichText(_) => OutputKind::RichText,
            OutputPayload::Workbook(_) => OutputKind::Spreadsheet,
            OutputPayload::SlideDeck(_) => OutputKind::SlideDeck,
        }
    }

    /// Borrow the payload as bytes (UTF-8 for the text kinds).
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            OutputPayload::PlainText(s) | OutputPayload::RichText(s) => s.as_bytes(),
            OutputPayload::Workbook(b) | OutputPayload::SlideDeck(b) => b,
        }
    }

    /// Take the payload as bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            OutputPayload::PlainText(s) | OutputPayload::RichText(s) => s.into_bytes(),
            OutputPayload::Workbook(b) | OutputPayload::SlideDeck(b) => b,
        }
    }

    /// Borrow the text of a text payload.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OutputPayload::PlainText(s) | OutputPayload::RichText(s) => Some(s),
            OutputPayload::Workbook(_) | OutputPayload::SlideDeck(_) => None,
        }
    }
}

/// Trait for turning a reconstructed document into a format-native payload.
///
/// Implementations hold only configuration, never per-document state.
pub trait DocumentEmitter: Send + Sync {
    /// Produce the payload for a document.
    fn emit(&self, document: &ReconstructedDocument) -> Result<OutputPayload>;

    /// The output kind this emitter produces.
    fn kind(&self) -> OutputKind;

    /// Return the name of this emitter for debugging.
    fn name(&self) -> &'static str;
}

/// Create the emitter for an output kind.
///
/// Returns [`Error::UnsupportedTarget`] when the kind has no emitter in this
/// build (the office emitters need the `office` feature).
pub fn create_emitter(kind: OutputKind, config: &ReflowConfig) -> Result<Box<dyn DocumentEmitter>> {
    match kind {
        OutputKind::PlainText => Ok(Box::new(PlainTextEmitter::new(config.plain_text.clone()))),
        OutputKind::RichText => Ok(Box::new(RichTextEmitter::new(config.rich_text.clone()))),
        #[cfg(feature = "office")]
        OutputKind::Spreadsheet => Ok(Box::new(XlsxEmitter::new())),
        #[cfg(feature = "office")]
        OutputKind::SlideDeck => Ok(Box::new(PptxEmitter::new(config.slides))),
        #[cfg(not(feature = "office"))]
        OutputKind::Spreadsheet | OutputKind::SlideDeck => Err(Error::UnsupportedTarget(format!(
            "{} output requires the 'office' feature",
            kind
        ))),
    }
}

/// Emit a document with the default configuration for `kind`.
pub fn emit(document: &ReconstructedDocument, kind: OutputKind) -> Result<OutputPayload> {
    create_emitter(kind, &ReflowConfig::default())?.emit(document)
}
