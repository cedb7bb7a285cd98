//! Text fragment representation.
//!
//! A fragment is one atomic string run as reported by the page decoder. Two
//! shapes exist: [`RawFragment`], exactly as the decoder hands it over (text
//! matrix in the bottom-left frame), and [`TextFragment`], the normalized
//! top-left form every later stage works on.

use crate::geometry::Rect;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A text item as produced by the page-content decoder.
///
/// The serde names follow the common text-content JSON layout
/// (`str`, `transform`, `width`, `height`, `hasEOL`), so decoder dumps can
/// be read directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFragment {
    /// The string run
    #[serde(rename = "str", default, deserialize_with = "lenient_string")]
    pub content: String,
    /// Text matrix `[a, b, c, d, e, f]`; the native position is `(e, f)`.
    ///
    /// Anything shorter than six elements is treated as malformed.
    #[serde(default, deserialize_with = "lenient_matrix")]
    pub transform: Vec<f32>,
    /// Advance width in page units
    #[serde(default, deserialize_with = "lenient_number")]
    pub width: f32,
    /// Height in page units
    #[serde(default, deserialize_with = "lenient_number")]
    pub height: f32,
    /// Decoder-reported end of line
    #[serde(rename = "hasEOL", default, deserialize_with = "lenient_bool")]
    pub has_eol: bool,
}

impl RawFragment {
    /// Create a fragment positioned at native `(x, y)` with an identity
    /// scale.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_reflow::layout::RawFragment;
    ///
    /// let raw = RawFragment::new("Hello", 72.0, 700.0, 30.0, 12.0);
    /// assert_eq!(raw.native_position(), Some((72.0, 700.0)));
    /// ```
    pub fn new(content: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            content: content.into(),
            transform: vec![1.0, 0.0, 0.0, 1.0, x, y],
            width,
            height,
            has_eol: false,
        }
    }

    /// Mark this fragment as the last one on its line.
    pub fn with_eol(mut self, has_eol: bool) -> Self {
        self.has_eol = has_eol;
        self
    }

    /// The translation part of the text matrix, if the matrix is well formed.
    pub fn native_position(&self) -> Option<(f32, f32)> {
        if self.transform.len() < 6 {
            return None;
        }
        let (x, y) = (self.transform[4], self.transform[5]);
        if x.is_finite() && y.is_finite() {
            Some((x, y))
        } else {
            None
        }
    }
}

// Decoders report missing geometry as null, strings or omitted keys. A
// wrong-typed field degrades to a neutral value; it never fails the dump.

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    Ok(Value::deserialize(deserializer)?
        .as_f64()
        .map_or(0.0, |n| n as f32))
}

/// Non-numeric matrix entries become NaN, which `native_position` rejects.
fn lenient_matrix<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f32>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries
            .iter()
            .map(|entry| entry.as_f64().map_or(f32::NAN, |n| n as f32))
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool().unwrap_or(false))
}

/// One source page as handed over by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    /// Viewport width in page units
    #[serde(default, deserialize_with = "lenient_number")]
    pub width: f32,
    /// Viewport height in page units, used to flip Y
    #[serde(default, deserialize_with = "lenient_number")]
    pub height: f32,
    /// Fragments in extraction order
    #[serde(default, alias = "fragments")]
    pub items: Vec<RawFragment>,
}

impl RawPage {
    /// Create a page with the given viewport and fragments.
    pub fn new(width: f32, height: f32, items: Vec<RawFragment>) -> Self {
        Self {
            width,
            height,
            items,
        }
    }
}

/// A fragment in the top-left, Y-down page frame.
///
/// Invariants: `content` is non-empty, `width` and `height` are finite and
/// non-negative. Fragments are immutable once normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFragment {
    /// The string run
    pub content: String,
    /// Left edge
    pub x: f32,
    /// Baseline position, measured from the top of the page
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
    /// Decoder-reported end of line, when available
    pub explicit_break_hint: bool,
}

impl TextFragment {
    /// Create a fragment that is already in the normalized frame.
    ///
    /// Mostly useful in tests; production fragments come from
    /// [`crate::layout::normalize_fragment`].
    pub fn new(content: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            content: content.into(),
            x,
            y,
            width,
            height,
            explicit_break_hint: false,
        }
    }

    /// Bounding rectangle with `y` as the top edge.
    pub fn bbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}
