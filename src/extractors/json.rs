//! JSON text-content dumps as a page source.
//!
//! Accepts the layout most text-content decoders can export:
//!
//! ```text
//! { "pages": [ { "width": 612, "height": 792,
//!                "items": [ { "str": "Hello", "transform": [12,0,0,12,72,700],
//!                             "width": 27.5, "height": 12, "hasEOL": false } ] } ] }
//! ```
//!
//! A top-level array of pages is accepted as well.

use super::PageSource;
use crate::error::{Error, Result};
use crate::layout::RawPage;
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum DumpShape {
    Wrapped { pages: Vec<RawPage> },
    Bare(Vec<RawPage>),
}

/// Pages loaded from a JSON text-content dump.
#[derive(Debug, Clone, Default)]
pub struct JsonPageSource {
    pages: Vec<RawPage>,
}

impl JsonPageSource {
    /// Parse a dump from a string.
    ///
    /// A dump that does not parse is reported as a decode failure of page 0:
    /// the source as a whole is unreadable.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_reflow::extractors::{JsonPageSource, PageSource};
    ///
    /// let source = JsonPageSource::from_str(r#"{"pages":[{"width":612,"height":792,"items":[]}]}"#)?;
    /// assert_eq!(source.page_count(), 1);
    /// # Ok::<(), pdf_reflow::Error>(())
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self> {
        let shape: DumpShape =
            serde_json::from_str(json).map_err(|e| Error::decode(0, format!("invalid dump: {}", e)))?;
        let pages = match shape {
            DumpShape::Wrapped { pages } | DumpShape::Bare(pages) => pages,
        };
        log::debug!("Loaded text-content dump with {} pages", pages.len());
        Ok(Self { pages })
    }

    /// Read and parse a dump from a file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&json)
    }

    /// Access the loaded pages.
    pub fn pages(&self) -> &[RawPage] {
        &self.pages
    }
}

impl PageSource for JsonPageSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Result<RawPage> {
        self.pages.as_slice().page(index)
    }
}
