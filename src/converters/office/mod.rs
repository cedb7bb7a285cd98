//! Office Open XML emitters.
//!
//! Spreadsheet (XLSX) and slide deck (PPTX) output. Both are ZIP packages of
//! XML parts written from scratch with a minimal set of parts: no templates
//! are read from disk.
//!
//! # Feature Flag
//!
//! This module requires the `office` feature (enabled by default):
//!
//! ```toml
//! [dependencies]
//! pdf_reflow = { version = "0.1", features = ["office"] }
//! ```
//!
//! Without it, [`create_emitter`](super::create_emitter) reports the office
//! kinds as unsupported targets.

#[cfg(feature = "office")]
mod package;
#[cfg(feature = "office")]
mod pptx;
#[cfg(feature = "office")]
mod xlsx;

#[cfg(feature = "office")]
pub use pptx::PptxEmitter;
#[cfg(feature = "office")]
pub use xlsx::{column_name, XlsxEmitter};
