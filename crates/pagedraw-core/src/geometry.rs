//! Geometric primitives for diagram layout and positioning.
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate System
//!
//! Coordinates follow SVG: origin at the top-left corner, X grows to the
//! right and Y grows downward.
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     ▼
//!    +Y
//! ```

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use pagedraw_core::geometry::{Point, Size};
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let bounds = p1.to_bounds(Size::new(p2.x(), p2.y()));
/// assert_eq!(bounds.min_x(), 7.5);
/// assert_eq!(bounds.max_y(), 22.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Converts a center point and size into a bounds rectangle
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns a new Size grown by the horizontal and vertical sums of `insets`
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Merges two bounds into the smallest bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pagedraw_core::geometry::{Bounds, Point, Size};
    /// let header = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let content = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = header.merge(&content);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Expands the bounds outward by the given insets.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }
}

/// Represents spacing around an element with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_bounds_from_center() {
        let bounds = Point::new(50.0, 50.0).to_bounds(Size::new(20.0, 10.0));
        assert_approx_eq!(f32, bounds.min_x(), 40.0);
        assert_approx_eq!(f32, bounds.min_y(), 45.0);
        assert_approx_eq!(f32, bounds.max_x(), 60.0);
        assert_approx_eq!(f32, bounds.max_y(), 55.0);
        assert_eq!(bounds.center(), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_bounds_add_padding() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(10.0, 10.0))
            .add_padding(Insets::new(1.0, 2.0, 3.0, 4.0));
        assert_approx_eq!(f32, bounds.min_x(), 6.0);
        assert_approx_eq!(f32, bounds.min_y(), 9.0);
        assert_approx_eq!(f32, bounds.max_x(), 22.0);
        assert_approx_eq!(f32, bounds.max_y(), 23.0);
    }

    #[test]
    fn test_size_add_padding() {
        let size = Size::new(10.0, 5.0).add_padding(Insets::uniform(2.0));
        assert_approx_eq!(f32, size.width(), 14.0);
        assert_approx_eq!(f32, size.height(), 9.0);
        assert!(Size::default().is_zero());
    }

    proptest! {
        #[test]
        fn merged_bounds_contain_both(
            x1 in -500.0f32..500.0, y1 in -500.0f32..500.0,
            x2 in -500.0f32..500.0, y2 in -500.0f32..500.0,
            w1 in 0.0f32..200.0, h1 in 0.0f32..200.0,
            w2 in 0.0f32..200.0, h2 in 0.0f32..200.0,
        ) {
            let a = Bounds::new_from_top_left(Point::new(x1, y1), Size::new(w1, h1));
            let b = Bounds::new_from_top_left(Point::new(x2, y2), Size::new(w2, h2));
            let merged = a.merge(&b);

            prop_assert!(merged.min_x() <= a.min_x() && merged.min_x() <= b.min_x());
            prop_assert!(merged.min_y() <= a.min_y() && merged.min_y() <= b.min_y());
            prop_assert!(merged.max_x() >= a.max_x() && merged.max_x() >= b.max_x());
            prop_assert!(merged.max_y() >= a.max_y() && merged.max_y() >= b.max_y());
        }
    }
}
