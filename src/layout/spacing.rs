//! Spacing and break classification.
//!
//! Within a line, the horizontal gap between neighbouring fragments decides
//! the separator:
//!
//! ```text
//! gap = next.x - (prev.x + prev.width)
//! gap <= small_gap             -> Joined   (decoder split a word)
//! small_gap < gap <= word_gap  -> Space
//! gap > word_gap               -> WideGap  (tab / column spacing)
//! ```
//!
//! Between lines, a representative-Y delta above `paragraph_gap` marks a
//! paragraph break. Thresholds are fixed per run so the result is
//! deterministic and explainable.

use crate::layout::clustering::LineCluster;
use crate::layout::fragment::TextFragment;
use crate::layout::line::{Line, Run, Spacing};
use crate::pipeline::config::LayoutThresholds;

/// Classify a horizontal gap.
///
/// # Examples
///
/// ```
/// use pdf_reflow::layout::{classify_gap, Spacing};
/// use pdf_reflow::pipeline::LayoutThresholds;
///
/// let t = LayoutThresholds::default();
/// assert_eq!(classify_gap(-1.0, &t), Spacing::Joined);
/// assert_eq!(classify_gap(3.0, &t), Spacing::Space);
/// assert_eq!(classify_gap(5.0, &t), Spacing::WideGap);
/// ```
pub fn classify_gap(gap: f32, thresholds: &LayoutThresholds) -> Spacing {
    if gap <= thresholds.small_gap {
        Spacing::Joined
    } else if gap <= thresholds.word_gap {
        Spacing::Space
    } else {
        Spacing::WideGap
    }
}

/// Classify the spacing between two neighbouring fragments of a line.
///
/// A word space is dropped when the boundary already carries whitespace, so
/// decoders that keep trailing spaces do not produce doubled spaces. Wide
/// gaps are kept regardless.
pub fn classify_spacing(
    prev: &TextFragment,
    next: &TextFragment,
    thresholds: &LayoutThresholds,
) -> Spacing {
    let gap = prev.bbox().horizontal_gap_to(&next.bbox());
    match classify_gap(gap, thresholds) {
        Spacing::Space if has_boundary_whitespace(&prev.content, &next.content) => {
            Spacing::Joined
        },
        spacing => spacing,
    }
}

/// Check if boundary between texts already has whitespace.
#[inline]
fn has_boundary_whitespace(prev: &str, next: &str) -> bool {
    prev.chars().last().is_some_and(|c| c.is_whitespace())
        || next.chars().next().is_some_and(|c| c.is_whitespace())
}

/// Turn a clustered line into runs with classified spacing.
pub fn classify_runs(fragments: Vec<TextFragment>, thresholds: &LayoutThresholds) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::with_capacity(fragments.len());

    for fragment in fragments {
        let spacing = match runs.last() {
            Some(prev) => classify_spacing(&prev.fragment, &fragment, thresholds),
            None => Spacing::Joined,
        };
        runs.push(Run { fragment, spacing });
    }

    runs
}

/// Whether the vertical step from `previous_y` to `y` is a paragraph break.
#[inline]
pub fn is_paragraph_break(previous_y: f32, y: f32, thresholds: &LayoutThresholds) -> bool {
    y - previous_y > thresholds.paragraph_gap
}

/// Classify spacing within every line and breaks between lines.
///
/// Consumes the ordered clusters of one page. The first line never carries a
/// paragraph break.
///
/// # Examples
///
/// ```
/// use pdf_reflow::layout::{classify_lines, cluster_lines, TextFragment};
/// use pdf_reflow::pipeline::LayoutThresholds;
///
/// let t = LayoutThresholds::default().with_paragraph_gap(10.0);
/// let fragments = vec![
///     TextFragment::new("First", 0.0, 10.0, 30.0, 10.0),
///     TextFragment::new("Second", 0.0, 25.0, 30.0, 10.0),
/// ];
/// let lines = classify_lines(cluster_lines(&fragments, t.y_tolerance), &t);
/// assert!(!lines[0].paragraph_break_before);
/// assert!(lines[1].paragraph_break_before);
/// ```
pub fn classify_lines(clusters: Vec<LineCluster>, thresholds: &LayoutThresholds) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::with_capacity(clusters.len());

    for cluster in clusters {
        let paragraph_break_before = lines
            .last()
            .is_some_and(|prev| is_paragraph_break(prev.y, cluster.y, thresholds));
        lines.push(Line {
            y: cluster.y,
            paragraph_break_before,
            runs: classify_runs(cluster.fragments, thresholds),
        });
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::clustering::cluster_lines;

    fn frag(content: &str, x: f32, width: f32) -> TextFragment {
        TextFragment::new(content, x, 10.0, width, 10.0)
    }

    #[test]
    fn test_gap_boundaries_are_inclusive() {
        let t = LayoutThresholds::default();
        assert_eq!(classify_gap(0.0, &t), Spacing::Joined);
        assert_eq!(classify_gap(0.01, &t), Spacing::Space);
        assert_eq!(classify_gap(4.0, &t), Spacing::Space);
        assert_eq!(classify_gap(4.01, &t), Spacing::WideGap);
        assert_eq!(classify_gap(250.0, &t), Spacing::WideGap);
    }

    #[test]
    fn test_hello_world_is_wide_gap() {
        let t = LayoutThresholds::default();
        let hello = frag("Hello", 0.0, 40.0);
        let world = frag("World", 45.0, 40.0);
        assert_eq!(classify_spacing(&hello, &world, &t), Spacing::WideGap);
    }

    #[test]
    fn test_overlapping_fragments_join() {
        let t = LayoutThresholds::default();
        assert_eq!(classify_spacing(&frag("Hel", 0.0, 20.0), &frag("lo", 18.0, 10.0), &t), Spacing::Joined);
    }

    #[test]
    fn test_existing_whitespace_suppresses_space() {
        let t = LayoutThresholds::default();
        let prev = frag("Hello ", 0.0, 30.0);
        let next = frag("World", 32.0, 30.0);
        assert_eq!(classify_spacing(&prev, &next, &t), Spacing::Joined);
        let next = frag(" World", 32.0, 30.0);
        assert_eq!(classify_spacing(&frag("Hello", 0.0, 30.0), &next, &t), Spacing::Joined);
    }

    #[test]
    fn test_existing_whitespace_keeps_wide_gap() {
        let t = LayoutThresholds::default();
        let prev = frag("Name: ", 0.0, 30.0);
        let next = frag("Value", 100.0, 30.0);
        assert_eq!(classify_spacing(&prev, &next, &t), Spacing::WideGap);
    }

    #[test]
    fn test_first_run_is_joined() {
        let t = LayoutThresholds::default();
        let runs = classify_runs(vec![frag("a", 50.0, 10.0), frag("b", 62.0, 10.0)], &t);
        assert_eq!(runs[0].spacing, Spacing::Joined);
        assert_eq!(runs[1].spacing, Spacing::Space);
    }

    #[test]
    fn test_paragraph_break_threshold() {
        let t = LayoutThresholds::default().with_paragraph_gap(10.0);
        assert!(!is_paragraph_break(10.0, 20.0, &t));
        assert!(is_paragraph_break(10.0, 20.5, &t));
    }

    #[test]
    fn test_continuation_lines_have_no_break() {
        let t = LayoutThresholds::default();
        let fragments = vec![
            TextFragment::new("one", 0.0, 10.0, 20.0, 10.0),
            TextFragment::new("two", 0.0, 22.0, 20.0, 10.0),
            TextFragment::new("three", 0.0, 60.0, 20.0, 10.0),
        ];
        let lines = classify_lines(cluster_lines(&fragments, t.y_tolerance), &t);
        assert_eq!(lines.len(), 3);
        assert!(!lines[0].paragraph_break_before);
        assert!(!lines[1].paragraph_break_before);
        assert!(lines[2].paragraph_break_before);
    }

    #[test]
    fn test_no_lines_for_no_clusters() {
        assert!(classify_lines(Vec::new(), &LayoutThresholds::default()).is_empty());
    }
}
