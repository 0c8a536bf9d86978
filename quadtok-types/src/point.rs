use serde::{Deserialize, Serialize};

/// A 2-D coordinate tagged with the entity it stands for.
///
/// The payload is opaque to the tree: it is typically the index of a
/// customer visit or a time window in the caller's own tables.
///
/// # Examples
///
/// ```
/// use quadtok_types::point::Point;
///
/// let p = Point::new(0.1, 0.9, "depot");
/// assert_eq!(p.x(), 0.1);
/// assert_eq!(*p.data(), "depot");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point<T> {
    x: f64,
    y: f64,
    data: T,
}

impl<T> Point<T> {
    pub fn new(x: f64, y: f64, data: T) -> Self {
        Self { x, y, data }
    }

    /// Build a point from a `geo::Point` and a payload.
    pub fn from_geo(point: geo::Point<f64>, data: T) -> Self {
        Self::new(point.x(), point.y(), data)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_data(self) -> T {
        self.data
    }

    /// Coordinates without the payload.
    pub fn to_geo(&self) -> geo::Point<f64> {
        geo::Point::new(self.x, self.y)
    }

    /// Whether both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
