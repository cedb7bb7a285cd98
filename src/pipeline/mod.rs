//! Layout reconstruction pipeline.
//!
//! ```text
//! PageSource (decoder collaborator)
//!     ↓
//! RawPage[]            (native frame, extraction order)
//!     ↓  normalize_page
//! TextFragment[]       (top-left frame)
//!     ↓  cluster_lines
//! LineCluster[]        (grouped, ordered)
//!     ↓  classify_lines
//! Line[]               (spacing + paragraph breaks)
//!     ↓
//! ReconstructedDocument
//!     ↓  DocumentEmitter
//! OutputPayload
//! ```
//!
//! Pages share no state, so they may be reconstructed concurrently; the
//! resulting page order is always source order. Within a page, clustering is
//! sequential because line assignment depends on extraction order.

pub mod config;

pub use config::{
    DocumentClass, LayoutThresholds, PlainTextConfig, ReflowConfig, RichTextConfig, SlideConfig,
};

use crate::converters::{create_emitter, OutputKind, OutputPayload};
use crate::document::{ReconstructedDocument, ReconstructedPage};
use crate::error::Result;
use crate::extractors::PageSource;
use crate::layout::{classify_lines, cluster_lines, normalize_page, RawPage};

/// Rebuild one page.
///
/// Pure function of its inputs: the same raw page and thresholds always
/// produce the same reconstructed page.
pub fn reconstruct_page(
    number: usize,
    page: &RawPage,
    thresholds: &LayoutThresholds,
) -> ReconstructedPage {
    let fragments = normalize_page(page);
    let clusters = cluster_lines(&fragments, thresholds.y_tolerance);
    let lines = classify_lines(clusters, thresholds);

    log::debug!(
        "Page {}: {} fragments, {} lines, {} paragraph breaks",
        number,
        fragments.len(),
        lines.len(),
        lines.iter().filter(|l| l.paragraph_break_before).count()
    );

    ReconstructedPage {
        number,
        width: page.width,
        height: page.height,
        lines,
        fragments,
    }
}

/// The reconstruction pipeline - orchestrates decode, rebuild, and emit.
///
/// # Examples
///
/// ```
/// use pdf_reflow::converters::{OutputKind, OutputPayload};
/// use pdf_reflow::layout::{RawFragment, RawPage};
/// use pdf_reflow::pipeline::ReflowPipeline;
///
/// let pages = vec![RawPage::new(612.0, 792.0, vec![
///     RawFragment::new("Hello", 0.0, 782.0, 40.0, 10.0),
///     RawFragment::new("World", 45.0, 782.0, 40.0, 10.0),
/// ])];
///
/// let pipeline = ReflowPipeline::new();
/// let payload = pipeline.convert(&pages, OutputKind::PlainText)?;
/// assert_eq!(payload, OutputPayload::PlainText("Hello\tWorld".to_string()));
/// # Ok::<(), pdf_reflow::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReflowPipeline {
    config: ReflowConfig,
}

impl ReflowPipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: ReflowConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReflowConfig {
        &self.config
    }

    /// Decode every page and rebuild the document.
    ///
    /// All pages are decoded before reconstruction starts; the first decode
    /// failure aborts the whole document.
    pub fn reconstruct<S: PageSource + ?Sized>(&self, source: &S) -> Result<ReconstructedDocument> {
        self.config.validate()?;

        let mut raw_pages: Vec<RawPage> = Vec::with_capacity(source.page_count());
        for index in 0..source.page_count() {
            raw_pages.push(source.page(index)?);
        }

        Ok(self.reconstruct_pages(&raw_pages))
    }

    /// Rebuild already-decoded pages.
    pub fn reconstruct_pages(&self, raw_pages: &[RawPage]) -> ReconstructedDocument {
        let thresholds = &self.config.layout;

        let pages: Vec<ReconstructedPage> = if self.config.parallel_pages {
            reconstruct_parallel(raw_pages, thresholds)
        } else {
            raw_pages
                .iter()
                .enumerate()
                .map(|(number, page)| reconstruct_page(number, page, thresholds))
                .collect()
        };

        ReconstructedDocument::new(pages)
    }

    /// Emit a reconstructed document in the requested format.
    pub fn emit(&self, document: &ReconstructedDocument, kind: OutputKind) -> Result<OutputPayload> {
        let emitter = create_emitter(kind, &self.config)?;
        log::debug!("Emitting {} pages with {}", document.page_count(), emitter.name());
        emitter.emit(document)
    }

    /// Decode, rebuild, and emit in one call.
    pub fn convert<S: PageSource + ?Sized>(
        &self,
        source: &S,
        kind: OutputKind,
    ) -> Result<OutputPayload> {
        // Fail on an unavailable target before doing any work
        create_emitter(kind, &self.config)?;
        let document = self.reconstruct(source)?;
        self.emit(&document, kind)
    }
}

#[cfg(feature = "parallel")]
fn reconstruct_parallel(
    raw_pages: &[RawPage],
    thresholds: &LayoutThresholds,
) -> Vec<ReconstructedPage> {
    use rayon::prelude::*;

    // Indexed parallel iterators collect in source order
    raw_pages
        .par_iter()
        .enumerate()
        .map(|(number, page)| reconstruct_page(number, page, thresholds))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn reconstruct_parallel(
    raw_pages: &[RawPage],
    thresholds: &LayoutThresholds,
) -> Vec<ReconstructedPage> {
    log::debug!("parallel_pages requested without the `parallel` feature; running sequentially");
    raw_pages
        .iter()
        .enumerate()
        .map(|(number, page)| reconstruct_page(number, page, thresholds))
        .collect()
}
