//! Page sources: the seam to the page-content decoder.
//!
//! Decoding PDF content streams is not part of this crate. A decoder hands
//! pages over through [`PageSource`]; anything that can produce
//! [`RawPage`] values in source order qualifies.

pub mod json;

pub use json::JsonPageSource;

use crate::error::Result;
use crate::layout::RawPage;

/// Provider of decoded pages in source order.
///
/// Returning an error for any page aborts the whole conversion; partial
/// documents are never produced.
pub trait PageSource {
    /// Number of pages in the source document.
    fn page_count(&self) -> usize;

    /// Decode one page (zero-based).
    fn page(&self, index: usize) -> Result<RawPage>;
}

impl PageSource for [RawPage] {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page(&self, index: usize) -> Result<RawPage> {
        self.get(index)
            .cloned()
            .ok_or_else(|| crate::Error::decode(index, "page index out of range"))
    }
}

impl PageSource for Vec<RawPage> {
    fn page_count(&self) -> usize {
        self.as_slice().page_count()
    }

    fn page(&self, index: usize) -> Result<RawPage> {
        self.as_slice().page(index)
    }
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page(&self, index: usize) -> Result<RawPage> {
        (**self).page(index)
    }
}
