//! Geometric primitives for layout reconstruction.
//!
//! All coordinates use the top-left page frame: X grows to the right and Y
//! grows downward. Fragments arrive in the decoder's bottom-left frame and
//! are moved into this frame by [`flip_y`].

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_reflow::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin, used as the fallback position for malformed input.
    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// A rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Rect {
    /// X coordinate of the left edge
    pub x: f32,
    /// Y coordinate of the top edge
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_reflow::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Horizontal distance from the right edge of `self` to the left edge of
    /// `next`. Negative when the two overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_reflow::geometry::Rect;
    ///
    /// let hello = Rect::new(0.0, 10.0, 40.0, 10.0);
    /// let world = Rect::new(45.0, 10.0, 40.0, 10.0);
    /// assert_eq!(hello.horizontal_gap_to(&world), 5.0);
    /// ```
    pub fn horizontal_gap_to(&self, next: &Rect) -> f32 {
        next.left() - self.right()
    }
}

/// Replace NaN and infinities with `fallback`.
#[inline]
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Clamp a length to a finite, non-negative value.
#[inline]
pub fn non_negative(value: f32) -> f32 {
    finite_or(value, 0.0).max(0.0)
}

/// Convert a bottom-left-origin Y into the top-left frame of a page with the
/// given viewport height.
///
/// # Examples
///
/// ```
/// use pdf_reflow::geometry::flip_y;
///
/// assert_eq!(flip_y(700.0, 792.0), 92.0);
/// ```
#[inline]
pub fn flip_y(native_y: f32, viewport_height: f32) -> f32 {
    viewport_height - native_y
}
