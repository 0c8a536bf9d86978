use crate::point::Point;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle described by origin plus extents.
///
/// The origin is the bottom-left corner; width and height grow towards
/// positive x and y. Bounds are stored as min/max corners so a split never
/// recomputes an edge: siblings share the exact same mid line and the outer
/// quadrants end exactly on the parent's edges. Containment is closed on
/// every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Rect {
    /// Rectangle with origin `(x, y)`, width `w` and height `h`.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::from_bounds(x, y, x + w, y + h)
    }

    pub fn from_bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The square `[0, size] x [0, size]`.
    pub fn square(size: f64) -> Self {
        Self::from_bounds(0.0, 0.0, size, size)
    }

    pub fn x(&self) -> f64 {
        self.min_x
    }

    pub fn y(&self) -> f64 {
        self.min_y
    }

    pub fn w(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn h(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Check if a point lies inside the rectangle or on its boundary.
    ///
    /// A point on an edge shared by two sibling quadrants is contained by
    /// both of them.
    pub fn contains<T>(&self, point: &Point<T>) -> bool {
        self.contains_xy(point.x(), point.y())
    }

    pub fn contains_xy(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Split into four equal quadrants.
    ///
    /// Order is bottom-left, top-left, bottom-right, top-right.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadtok_types::rect::Rect;
    ///
    /// let [bl, tl, br, tr] = Rect::square(2.0).quadrants();
    /// assert_eq!(bl, Rect::new(0.0, 0.0, 1.0, 1.0));
    /// assert_eq!(tl, Rect::new(0.0, 1.0, 1.0, 1.0));
    /// assert_eq!(br, Rect::new(1.0, 0.0, 1.0, 1.0));
    /// assert_eq!(tr, Rect::new(1.0, 1.0, 1.0, 1.0));
    /// ```
    pub fn quadrants(&self) -> [Rect; 4] {
        let mid_x = self.min_x + self.w() / 2.0;
        let mid_y = self.min_y + self.h() / 2.0;
        [
            Rect::from_bounds(self.min_x, self.min_y, mid_x, mid_y),
            Rect::from_bounds(self.min_x, mid_y, mid_x, self.max_y),
            Rect::from_bounds(mid_x, self.min_y, self.max_x, mid_y),
            Rect::from_bounds(mid_x, mid_y, self.max_x, self.max_y),
        ]
    }
}

impl From<Rect> for geo::Rect<f64> {
    fn from(rect: Rect) -> Self {
        geo::Rect::new(
            geo::coord! { x: rect.min_x, y: rect.min_y },
            geo::coord! { x: rect.max_x, y: rect.max_y },
        )
    }
}

impl From<geo::Rect<f64>> for Rect {
    fn from(rect: geo::Rect<f64>) -> Self {
        Self::from_bounds(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_containment() {
        let rect = Rect::new(0.0, 0.0, 0.5, 0.5);
        assert!(rect.contains(&Point::new(0.0, 0.0, ())));
        assert!(rect.contains(&Point::new(0.5, 0.5, ())));
        assert!(rect.contains(&Point::new(0.25, 0.5, ())));
        assert!(!rect.contains(&Point::new(0.51, 0.2, ())));
        assert!(!rect.contains(&Point::new(0.2, -0.01, ())));
    }

    #[test]
    fn test_shared_edge_belongs_to_both_quadrants() {
        let [bl, tl, br, tr] = Rect::square(1.0).quadrants();
        let center = Point::new(0.5, 0.5, ());
        assert!(bl.contains(&center));
        assert!(tl.contains(&center));
        assert!(br.contains(&center));
        assert!(tr.contains(&center));
    }

    #[test]
    fn test_quadrants_keep_parent_edges_exact() {
        for size in [0.3, 0.7, 3.3, 123.456] {
            let mut rect = Rect::square(size);
            for _ in 0..12 {
                let [bl, tl, br, tr] = rect.quadrants();
                assert_eq!(br.max_x(), rect.max_x());
                assert_eq!(tr.max_x(), rect.max_x());
                assert_eq!(tl.max_y(), rect.max_y());
                assert_eq!(tr.max_y(), rect.max_y());
                assert_eq!(bl.max_x(), br.x());
                assert_eq!(bl.max_y(), tl.y());
                assert!(tr.contains_xy(rect.max_x(), rect.max_y()));
                rect = tr;
            }
        }
    }

    #[test]
    fn test_geo_round_trip() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        let geo_rect: geo::Rect<f64> = rect.into();
        assert_eq!(geo_rect.max(), geo::coord! { x: 4.0, y: 6.0 });
        assert_eq!(Rect::from(geo_rect), rect);
    }
}
