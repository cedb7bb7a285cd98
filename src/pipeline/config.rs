//! Unified configuration for layout reconstruction and emission.
//!
//! Every heuristic threshold lives here with its default and its effect, so
//! callers and tests can tune behavior per document class instead of
//! relying on literals buried in the algorithms.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::str::FromStr;

/// Geometric thresholds driving line clustering and gap classification.
///
/// All values are in normalized page units (PDF points).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutThresholds {
    /// Maximum vertical distance between a fragment and a line's
    /// representative Y for the fragment to join that line.
    ///
    /// Default: 5.0
    pub y_tolerance: f32,

    /// Horizontal gaps at or below this value join fragments with no
    /// separator (decoder sub-word splits).
    ///
    /// Default: 0.0
    pub small_gap: f32,

    /// Horizontal gaps above `small_gap` and at or below this value become a
    /// single space; wider gaps become a wide-gap token.
    ///
    /// Default: 4.0
    pub word_gap: f32,

    /// Vertical distance between consecutive lines above which a paragraph
    /// break is inferred.
    ///
    /// Default: 12.0
    pub paragraph_gap: f32,
}

impl Default for LayoutThresholds {
    fn default() -> Self {
        Self {
            y_tolerance: 5.0,
            small_gap: 0.0,
            word_gap: 4.0,
            paragraph_gap: 12.0,
        }
    }
}

impl LayoutThresholds {
    /// Set the line clustering tolerance.
    pub fn with_y_tolerance(mut self, value: f32) -> Self {
        self.y_tolerance = value;
        self
    }

    /// Set the sub-word joining threshold.
    pub fn with_small_gap(mut self, value: f32) -> Self {
        self.small_gap = value;
        self
    }

    /// Set the word-space threshold.
    pub fn with_word_gap(mut self, value: f32) -> Self {
        self.word_gap = value;
        self
    }

    /// Set the paragraph break threshold.
    pub fn with_paragraph_gap(mut self, value: f32) -> Self {
        self.paragraph_gap = value;
        self
    }

    /// Check that all thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("y_tolerance", self.y_tolerance),
            ("small_gap", self.small_gap),
            ("word_gap", self.word_gap),
            ("paragraph_gap", self.paragraph_gap),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("{} must be finite", name)));
            }
        }
        if self.y_tolerance < 0.0 || self.paragraph_gap < 0.0 {
            return Err(Error::InvalidConfig(
                "y_tolerance and paragraph_gap must be non-negative".to_string(),
            ));
        }
        if self.word_gap < self.small_gap {
            return Err(Error::InvalidConfig(format!(
                "word_gap ({}) must not be smaller than small_gap ({})",
                self.word_gap, self.small_gap
            )));
        }
        Ok(())
    }
}

/// Plain text emitter settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlainTextConfig {
    /// Divider placed between pages, surrounded by blank lines.
    ///
    /// Default: `"----------"`
    pub page_separator: String,
}

impl Default for PlainTextConfig {
    fn default() -> Self {
        Self {
            page_separator: "----------".to_string(),
        }
    }
}

/// Rich text (Word-compatible HTML) emitter settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RichTextConfig {
    /// Document title written to the `<title>` element.
    pub title: String,
    /// Non-breaking spaces emitted for each wide gap, approximating tab
    /// stops. Default: 4
    pub nbsp_per_wide_gap: usize,
    /// Insert a hard page break between source pages. Default: true
    pub page_breaks: bool,
}

impl Default for RichTextConfig {
    fn default() -> Self {
        Self {
            title: "Document".to_string(),
            nbsp_per_wide_gap: 4,
            page_breaks: true,
        }
    }
}

/// Slide deck emitter settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SlideConfig {
    /// English Metric Units per page unit. Default: 12700 (one point)
    pub emu_per_unit: i64,
    /// Font size in points for fragments with no usable height. Default: 12
    pub default_font_size: f32,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            emu_per_unit: 12_700,
            default_font_size: 12.0,
        }
    }
}

/// Complete configuration for a conversion.
///
/// # Examples
///
/// ```
/// use pdf_reflow::pipeline::{LayoutThresholds, ReflowConfig};
///
/// let config = ReflowConfig::default()
///     .with_layout(LayoutThresholds::default().with_paragraph_gap(10.0));
/// assert_eq!(config.layout.paragraph_gap, 10.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ReflowConfig {
    /// Clustering and classification thresholds
    pub layout: LayoutThresholds,
    /// Plain text output
    pub plain_text: PlainTextConfig,
    /// Rich text output
    pub rich_text: RichTextConfig,
    /// Slide output
    pub slides: SlideConfig,
    /// Reconstruct pages concurrently (needs the `parallel` feature)
    pub parallel_pages: bool,
}

impl ReflowConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the layout thresholds.
    pub fn with_layout(mut self, layout: LayoutThresholds) -> Self {
        self.layout = layout;
        self
    }

    /// Replace the plain text settings.
    pub fn with_plain_text(mut self, plain_text: PlainTextConfig) -> Self {
        self.plain_text = plain_text;
        self
    }

    /// Replace the rich text settings.
    pub fn with_rich_text(mut self, rich_text: RichTextConfig) -> Self {
        self.rich_text = rich_text;
        self
    }

    /// Replace the slide settings.
    pub fn with_slides(mut self, slides: SlideConfig) -> Self {
        self.slides = slides;
        self
    }

    /// Enable or disable per-page parallel reconstruction.
    pub fn with_parallel_pages(mut self, enable: bool) -> Self {
        self.parallel_pages = enable;
        self
    }

    /// Parse a (possibly partial) JSON configuration.
    ///
    /// Fields that are not named keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ReflowConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        if self.slides.emu_per_unit <= 0 {
            return Err(Error::InvalidConfig("emu_per_unit must be positive".to_string()));
        }
        if !self.slides.default_font_size.is_finite() || self.slides.default_font_size <= 0.0 {
            return Err(Error::InvalidConfig(
                "default_font_size must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Document classes with tuned threshold presets.
///
/// - Generic: balanced defaults
/// - Dense: small type and tight leading (reports, statements, footnotes)
/// - Loose: large type or generous leading (forms, slides, posters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentClass {
    /// Balanced defaults
    #[default]
    Generic,
    /// Tight spacing
    Dense,
    /// Generous spacing
    Loose,
}

impl DocumentClass {
    /// Create a configuration tuned for this document class.
    pub fn create_config(&self) -> ReflowConfig {
        let layout = match self {
            Self::Generic => LayoutThresholds::default(),
            Self::Dense => LayoutThresholds {
                y_tolerance: 3.0,
                small_gap: 0.0,
                word_gap: 3.0,
                paragraph_gap: 9.0,
            },
            Self::Loose => LayoutThresholds {
                y_tolerance: 6.0,
                small_gap: 0.5,
                word_gap: 6.0,
                paragraph_gap: 18.0,
            },
        };
        ReflowConfig::default().with_layout(layout)
    }
}

impl FromStr for DocumentClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(Self::Generic),
            "dense" => Ok(Self::Dense),
            "loose" => Ok(Self::Loose),
            other => Err(Error::InvalidConfig(format!("unknown document class: {}", other))),
        }
    }
}
