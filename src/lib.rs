// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # PDF Reflow
//!
//! Layout reconstruction for positioned PDF text, and re-emission of the
//! recovered structure as editable documents.
//!
//! A PDF content stream yields an unordered bag of text fragments, each with
//! an absolute position and size but no notion of line, paragraph, or cell.
//! This crate infers that structure from geometry alone and writes it out in
//! the shape a target application expects.
//!
//! ## Core Features
//!
//! - **Normalization**: native bottom-left coordinates to a top-left frame,
//!   with malformed geometry clamped rather than rejected
//! - **Line Clustering**: deterministic greedy grouping by vertical tolerance
//! - **Spacing Classification**: joined, word space, or wide gap per fragment
//!   boundary; paragraph breaks from vertical gaps
//! - **Emitters**: plain text, Word-compatible rich text, XLSX workbooks and
//!   PPTX slide decks
//! - **Tunable Thresholds**: every heuristic constant lives in
//!   [`LayoutThresholds`]
//!
//! ## Architecture
//!
//! ```text
//! PageSource ─► normalize ─► cluster ─► classify ─► ReconstructedDocument
//!                                                          │
//!                       PlainText / RichText / Workbook / SlideDeck ◄┘
//! ```
//!
//! Pages are independent and may be rebuilt in parallel (`parallel`
//! feature); emitters only read the model.
//!
//! ## Quick Start
//!
//! ```
//! use pdf_reflow::{OutputKind, OutputPayload, ReflowPipeline};
//! use pdf_reflow::layout::{RawFragment, RawPage};
//!
//! # fn main() -> pdf_reflow::Result<()> {
//! let pages = vec![RawPage::new(612.0, 792.0, vec![
//!     RawFragment::new("Quarterly", 72.0, 700.0, 50.0, 12.0),
//!     RawFragment::new("report", 125.0, 700.0, 35.0, 12.0),
//! ])];
//!
//! let pipeline = ReflowPipeline::new();
//! let document = pipeline.reconstruct(&pages)?;
//! assert_eq!(document.line_count(), 1);
//!
//! let payload = pipeline.emit(&document, OutputKind::PlainText)?;
//! assert_eq!(payload, OutputPayload::PlainText("Quarterly report".to_string()));
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Geometry primitives
pub mod geometry;

// Layout reconstruction
pub mod layout;

// Reconstructed model
pub mod document;

// Page sources
pub mod extractors;

// Pipeline and configuration
pub mod pipeline;

// Format emitters
pub mod converters;

// Re-exports
pub use converters::{create_emitter, DocumentEmitter, OutputKind, OutputPayload};
pub use document::{ReconstructedDocument, ReconstructedPage};
pub use error::{Error, Result};
pub use extractors::{JsonPageSource, PageSource};
pub use layout::{Line, RawFragment, RawPage, Spacing, TextFragment};
pub use pipeline::{DocumentClass, LayoutThresholds, ReflowConfig, ReflowPipeline};

// Internal utilities
pub(crate) mod utils {
    use std::cmp::Ordering;

    /// Total order over page coordinates for sorting.
    ///
    /// NaN sorts after every number and ties with itself, so `sort_by`
    /// stays stable and never panics on a stray non-finite position.
    #[inline]
    pub fn cmp_position(a: f32, b: f32) -> Ordering {
        a.partial_cmp(&b)
            .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
