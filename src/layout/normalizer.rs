//! Geometry normalization.
//!
//! Moves decoder fragments from the native bottom-left frame into the
//! top-left, Y-down frame used by every later stage. Malformed geometry is
//! clamped here so that a misplaced fragment degrades layout quality instead
//! of aborting the page.

use crate::geometry::{finite_or, flip_y, non_negative, Point};
use crate::layout::fragment::{RawFragment, RawPage, TextFragment};

/// Normalize a single fragment.
///
/// `y_normalized = viewport_height - native_y`. A missing or non-finite text
/// matrix places the fragment at the native origin; negative or non-finite
/// sizes become zero.
///
/// Returns `None` for fragments with empty content, which decoders emit as
/// end-of-line markers.
///
/// # Examples
///
/// ```
/// use pdf_reflow::layout::{normalize_fragment, RawFragment};
///
/// let raw = RawFragment::new("Title", 72.0, 700.0, 40.0, 18.0);
/// let frag = normalize_fragment(&raw, 792.0).unwrap();
/// assert_eq!(frag.x, 72.0);
/// assert_eq!(frag.y, 92.0);
/// ```
pub fn normalize_fragment(raw: &RawFragment, viewport_height: f32) -> Option<TextFragment> {
    if raw.content.is_empty() {
        return None;
    }

    let native = match raw.native_position() {
        Some((x, y)) => Point::new(x, y),
        None => {
            log::trace!("Malformed transform for {:?}, placing at origin", raw.content);
            Point::origin()
        },
    };
    let viewport_height = non_negative(viewport_height);

    Some(TextFragment {
        content: raw.content.clone(),
        x: native.x,
        y: finite_or(flip_y(native.y, viewport_height), 0.0),
        width: non_negative(raw.width),
        height: non_negative(raw.height),
        explicit_break_hint: raw.has_eol,
    })
}

/// Normalize every fragment of a page, preserving extraction order.
///
/// Empty end-of-line markers are dropped; their break hint is moved onto
/// the preceding kept fragment.
pub fn normalize_page(page: &RawPage) -> Vec<TextFragment> {
    let mut fragments: Vec<TextFragment> = Vec::with_capacity(page.items.len());

    for raw in &page.items {
        match normalize_fragment(raw, page.height) {
            Some(fragment) => fragments.push(fragment),
            None => {
                if raw.has_eol {
                    if let Some(last) = fragments.last_mut() {
                        last.explicit_break_hint = true;
                    }
                }
            },
        }
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_into_top_left_frame() {
        let raw = RawFragment::new("a", 10.0, 780.0, 5.0, 12.0);
        let frag = normalize_fragment(&raw, 792.0).unwrap();
        assert_eq!(frag.y, 12.0);
        assert_eq!(frag.x, 10.0);
    }

    #[test]
    fn test_malformed_transform_falls_back_to_origin() {
        let raw = RawFragment {
            content: "a".to_string(),
            transform: vec![],
            width: 5.0,
            height: 12.0,
            has_eol: false,
        };
        let frag = normalize_fragment(&raw, 792.0).unwrap();
        assert_eq!(frag.x, 0.0);
        assert_eq!(frag.y, 792.0);
    }

    #[test]
    fn test_negative_sizes_are_clamped() {
        let raw = RawFragment::new("a", 0.0, 0.0, -5.0, f32::NAN);
        let frag = normalize_fragment(&raw, 100.0).unwrap();
        assert_eq!(frag.width, 0.0);
        assert_eq!(frag.height, 0.0);
    }

    #[test]
    fn test_bad_viewport_height_is_zero() {
        let raw = RawFragment::new("a", 0.0, 50.0, 5.0, 5.0);
        let frag = normalize_fragment(&raw, f32::NAN).unwrap();
        assert_eq!(frag.y, -50.0);
        let frag = normalize_fragment(&raw, -10.0).unwrap();
        assert_eq!(frag.y, -50.0);
    }

    #[test]
    fn test_empty_content_is_dropped() {
        let raw = RawFragment::new("", 0.0, 0.0, 0.0, 0.0);
        assert!(normalize_fragment(&raw, 792.0).is_none());
    }

    #[test]
    fn test_eol_marker_moves_hint_to_previous_fragment() {
        let page = RawPage::new(
            612.0,
            792.0,
            vec![
                RawFragment::new("first", 0.0, 700.0, 20.0, 12.0),
                RawFragment::new("", 20.0, 700.0, 0.0, 0.0).with_eol(true),
                RawFragment::new("second", 0.0, 680.0, 20.0, 12.0),
            ],
        );
        let frags = normalize_page(&page);
        assert_eq!(frags.len(), 2);
        assert!(frags[0].explicit_break_hint);
        assert!(!frags[1].explicit_break_hint);
    }

    #[test]
    fn test_leading_eol_marker_is_ignored() {
        let page = RawPage::new(
            612.0,
            792.0,
            vec![RawFragment::new("", 0.0, 0.0, 0.0, 0.0).with_eol(true)],
        );
        assert!(normalize_page(&page).is_empty());
    }
}
