//! Point structure for representing coordinates

/// A coordinate pair in some reference system
///
/// For projected references `x`/`y` are easting/northing in meters, for
/// geographic ones they are longitude/latitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Easting or longitude
    pub x: f64,
    /// Northing or latitude
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Whether both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
