//! Line clustering by vertical position.
//!
//! Greedy single-pass tolerance clustering: fragments are visited in
//! extraction order and each joins the *first* open line (in discovery order)
//! whose representative Y is within the tolerance. This is intentionally not
//! nearest-line assignment; on ambiguous input the result depends on
//! extraction order, and that dependence is part of the contract.

use crate::layout::fragment::TextFragment;
use crate::utils::cmp_position;

/// A group of fragments on one visual row, before spacing classification.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCluster {
    /// Representative Y: the Y of the fragment that opened the cluster
    pub y: f32,
    /// Member fragments, left to right once clustering finishes
    pub fragments: Vec<TextFragment>,
}

/// Partition a page's fragments into lines.
///
/// Lines come back ordered top to bottom by representative Y, fragments
/// within a line left to right by X. Both sorts are stable, so ties keep
/// discovery order. An empty page yields no lines.
///
/// # Examples
///
/// ```
/// use pdf_reflow::layout::{cluster_lines, TextFragment};
///
/// let fragments = vec![
///     TextFragment::new("World", 45.0, 10.0, 40.0, 10.0),
///     TextFragment::new("Second", 0.0, 30.0, 40.0, 10.0),
///     TextFragment::new("Hello", 0.0, 11.0, 40.0, 10.0),
/// ];
/// let lines = cluster_lines(&fragments, 5.0);
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].fragments[0].content, "Hello");
/// assert_eq!(lines[0].y, 10.0);
/// ```
pub fn cluster_lines(fragments: &[TextFragment], y_tolerance: f32) -> Vec<LineCluster> {
    let mut lines: Vec<LineCluster> = Vec::new();

    for fragment in fragments {
        match lines
            .iter_mut()
            .find(|line| (fragment.y - line.y).abs() <= y_tolerance)
        {
            Some(line) => line.fragments.push(fragment.clone()),
            None => lines.push(LineCluster {
                y: fragment.y,
                fragments: vec![fragment.clone()],
            }),
        }
    }

    // `sort_by` is stable: equal keys keep discovery order
    lines.sort_by(|a, b| cmp_position(a.y, b.y));
    for line in &mut lines {
        line.fragments.sort_by(|a, b| cmp_position(a.x, b.x));
    }

    log::trace!(
        "Clustered {} fragments into {} lines (tolerance {:.1})",
        fragments.len(),
        lines.len(),
        y_tolerance
    );

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(content: &str, x: f32, y: f32) -> TextFragment {
        TextFragment::new(content, x, y, 10.0, 10.0)
    }

    fn contents(line: &LineCluster) -> Vec<&str> {
        line.fragments.iter().map(|f| f.content.as_str()).collect()
    }

    #[test]
    fn test_empty_page_has_no_lines() {
        assert!(cluster_lines(&[], 5.0).is_empty());
    }

    #[test]
    fn test_same_row_within_tolerance() {
        let lines = cluster_lines(&[frag("a", 0.0, 10.0), frag("b", 20.0, 14.0)], 5.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(contents(&lines[0]), vec!["a", "b"]);
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let lines = cluster_lines(&[frag("a", 0.0, 10.0), frag("b", 20.0, 15.0)], 5.0);
        assert_eq!(lines.len(), 1);
        let lines = cluster_lines(&[frag("a", 0.0, 10.0), frag("b", 20.0, 15.5)], 5.0);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_lines_sorted_top_to_bottom() {
        let lines = cluster_lines(
            &[frag("bottom", 0.0, 100.0), frag("top", 0.0, 10.0), frag("middle", 0.0, 50.0)],
            5.0,
        );
        let order: Vec<&str> = lines.iter().map(|l| l.fragments[0].content.as_str()).collect();
        assert_eq!(order, vec!["top", "middle", "bottom"]);
    }

    #[test]
    fn test_fragments_sorted_left_to_right() {
        let lines = cluster_lines(
            &[frag("right", 100.0, 10.0), frag("left", 0.0, 10.0), frag("center", 50.0, 10.0)],
            5.0,
        );
        assert_eq!(contents(&lines[0]), vec!["left", "center", "right"]);
    }

    #[test]
    fn test_representative_y_is_first_fragment() {
        // The line does not drift: 10 -> 14 joins, 18 is 8 away from 10 and opens a new line
        let lines = cluster_lines(
            &[frag("a", 0.0, 10.0), frag("b", 10.0, 14.0), frag("c", 20.0, 18.0)],
            5.0,
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].y, 10.0);
        assert_eq!(contents(&lines[0]), vec!["a", "b"]);
        assert_eq!(lines[1].y, 18.0);
    }

    #[test]
    fn test_first_matching_line_wins_not_nearest() {
        // Open lines at y=10 and y=16; a fragment at y=15 is nearer to 16
        // but 10 was discovered first and is within tolerance.
        let lines = cluster_lines(
            &[frag("a", 0.0, 10.0), frag("b", 0.0, 16.0), frag("c", 30.0, 15.0)],
            5.0,
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(contents(&lines[0]), vec!["a", "c"]);
        assert_eq!(contents(&lines[1]), vec!["b"]);
    }

    #[test]
    fn test_assignment_depends_on_extraction_order() {
        let forward = cluster_lines(
            &[frag("a", 0.0, 10.0), frag("b", 0.0, 16.0), frag("c", 30.0, 13.0)],
            5.0,
        );
        let reordered = cluster_lines(
            &[frag("b", 0.0, 16.0), frag("a", 0.0, 10.0), frag("c", 30.0, 13.0)],
            5.0,
        );
        assert_eq!(contents(&forward[0]), vec!["a", "c"]);
        assert_eq!(contents(&reordered[1]), vec!["b", "c"]);
    }

    #[test]
    fn test_identical_y_merges_with_zero_tolerance() {
        let lines = cluster_lines(&[frag("first", 0.0, 20.0), frag("second", 0.0, 20.0)], 0.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(contents(&lines[0]), vec!["first", "second"]);
    }

    #[test]
    fn test_equal_x_keeps_discovery_order() {
        let lines = cluster_lines(&[frag("one", 5.0, 10.0), frag("two", 5.0, 11.0)], 5.0);
        assert_eq!(contents(&lines[0]), vec!["one", "two"]);
    }

    #[test]
    fn test_partition_property() {
        let fragments: Vec<TextFragment> = (0..40)
            .map(|i| frag(&format!("f{}", i), (i % 7) as f32 * 15.0, (i % 9) as f32 * 6.5))
            .collect();
        let lines = cluster_lines(&fragments, 5.0);
        let total: usize = lines.iter().map(|l| l.fragments.len()).sum();
        assert_eq!(total, fragments.len());
        assert!(lines.len() <= fragments.len());
        assert!(lines.windows(2).all(|w| w[0].y <= w[1].y));
    }
}
