//! Reconstructed lines.

use crate::layout::fragment::TextFragment;
use serde::Serialize;

/// Classified horizontal gap in front of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Spacing {
    /// No separator: the decoder split one word into several fragments.
    #[default]
    Joined,
    /// An ordinary word space.
    Space,
    /// A gap wide enough to imply tab or column spacing.
    WideGap,
}

impl Spacing {
    /// Separator used in plain text output.
    pub fn as_plain_text(&self) -> &'static str {
        match self {
            Spacing::Joined => "",
            Spacing::Space => " ",
            Spacing::WideGap => "\t",
        }
    }
}

/// A fragment inside a line together with the gap classified in front of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    /// The fragment itself
    pub fragment: TextFragment,
    /// Spacing before this fragment; always `Joined` for the first run
    pub spacing: Spacing,
}

/// Fragments judged to sit on the same visual row.
///
/// Runs are ordered left to right. `y` is the representative vertical
/// position: the Y of the fragment that opened the line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// Representative Y (top-left frame)
    pub y: f32,
    /// Whether a paragraph boundary precedes this line
    pub paragraph_break_before: bool,
    /// Runs ordered left to right
    pub runs: Vec<Run>,
}

impl Line {
    /// Number of fragments on the line.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether the line has no fragments. Never true for lines produced by
    /// the clusterer.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Iterate the fragments left to right.
    pub fn fragments(&self) -> impl Iterator<Item = &TextFragment> {
        self.runs.iter().map(|run| &run.fragment)
    }

    /// Line text with plain-text separators (space, tab) applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_reflow::layout::{Line, Run, Spacing, TextFragment};
    ///
    /// let line = Line {
    ///     y: 10.0,
    ///     paragraph_break_before: false,
    ///     runs: vec![
    ///         Run { fragment: TextFragment::new("Hello", 0.0, 10.0, 40.0, 10.0), spacing: Spacing::Joined },
    ///         Run { fragment: TextFragment::new("World", 45.0, 10.0, 40.0, 10.0), spacing: Spacing::WideGap },
    ///     ],
    /// };
    /// assert_eq!(line.text(), "Hello\tWorld");
    /// ```
    pub fn text(&self) -> String {
        let mut text = String::new();
        for run in &self.runs {
            text.push_str(run.spacing.as_plain_text());
            text.push_str(&run.fragment.content);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(content: &str, x: f32, spacing: Spacing) -> Run {
        Run {
            fragment: TextFragment::new(content, x, 10.0, 10.0, 8.0),
            spacing,
        }
    }

    #[test]
    fn test_line_text_joins_by_spacing() {
        let line = Line {
            y: 10.0,
            paragraph_break_before: false,
            runs: vec![
                run("ab", 0.0, Spacing::Joined),
                run("c", 10.0, Spacing::Joined),
                run("d", 22.0, Spacing::Space),
                run("e", 60.0, Spacing::WideGap),
            ],
        };
        assert_eq!(line.text(), "abc d\te");
        assert_eq!(line.len(), 4);
        assert!(!line.is_empty());
    }

    #[test]
    fn test_empty_line_has_no_text() {
        let line = Line {
            y: 0.0,
            paragraph_break_before: false,
            runs: vec![],
        };
        assert!(line.is_empty());
        assert_eq!(line.text(), "");
    }
}
