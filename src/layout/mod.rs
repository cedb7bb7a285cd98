//! Layout reconstruction from positioned text fragments.
//!
//! Stages, each a pure function over the previous stage's output:
//! - Geometry normalization (bottom-left native frame → top-left frame)
//! - Line clustering by vertical tolerance
//! - Spacing and paragraph break classification

pub mod clustering;
pub mod fragment;
pub mod line;
pub mod normalizer;
pub mod spacing;

// Re-export main types
pub use clustering::{cluster_lines, LineCluster};
pub use fragment::{RawFragment, RawPage, TextFragment};
pub use line::{Line, Run, Spacing};
pub use normalizer::{normalize_fragment, normalize_page};
pub use spacing::{classify_gap, classify_lines, classify_runs, classify_spacing, is_paragraph_break};
