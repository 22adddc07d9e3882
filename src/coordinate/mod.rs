//! Coordinate handling for surveyed points
//!
//! This module provides the registry of supported coordinate references and
//! the projection engine used to move points between them.

pub mod crs;
mod datum;
mod ellipsoid;
mod point;
mod projection;
mod transform;

// Re-export key types
pub use self::crs::{CoordinateReference, WGS84};
pub use self::datum::Datum;
pub use self::ellipsoid::Ellipsoid;
pub use self::point::Point;
pub use self::projection::Projection;
pub use self::transform::{CoordinateTransformer, ProjectionEngine};
