//! Coordinate transformation between registered references

use log::debug;

use super::crs::CoordinateReference;
use super::datum::{self, Datum};
use super::ellipsoid::Ellipsoid;
use super::point::Point;
use crate::survey::errors::{TwdError, TwdResult};

/// A pure numeric service converting a coordinate pair between two references
pub trait ProjectionEngine {
    /// Convert `point` from `source` to `target`
    fn project(&self, source: &CoordinateReference, target: &CoordinateReference, point: Point) -> TwdResult<Point>;
}

/// In-process projection engine
///
/// Unprojects to geodetic coordinates on the source ellipsoid, applies the
/// datum shift through WGS84 when the datums differ, then projects onto the
/// target reference.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoordinateTransformer;

impl CoordinateTransformer {
    pub fn new() -> Self {
        CoordinateTransformer
    }

    fn shift_datum(
        &self,
        lon: f64,
        lat: f64,
        source: &CoordinateReference,
        target: &CoordinateReference,
    ) -> (f64, f64) {
        if source.datum.is_equivalent(&source.ellipsoid, &target.datum, &target.ellipsoid) {
            return (lon, lat);
        }

        // A null grid maps lon/lat onto WGS84 without touching them
        let (from_datum, from_ellps) = match source.datum {
            Datum::NullGrid => (Datum::Wgs84, Ellipsoid::WGS84),
            d => (d, source.ellipsoid),
        };
        let (to_datum, to_ellps) = match target.datum {
            Datum::NullGrid => (Datum::Wgs84, Ellipsoid::WGS84),
            d => (d, target.ellipsoid),
        };
        if from_datum.is_equivalent(&from_ellps, &to_datum, &to_ellps) {
            return (lon, lat);
        }

        let mut g = datum::geodetic_to_geocentric(&from_ellps, lon, lat, 0.0);
        if let Datum::ToWgs84(p) = from_datum {
            g = datum::to_wgs84(&g, &p);
        }
        if let Datum::ToWgs84(p) = to_datum {
            g = datum::from_wgs84(&g, &p);
        }
        let (lon, lat, _) = datum::geocentric_to_geodetic(&to_ellps, &g);

        (lon, lat)
    }
}

impl ProjectionEngine for CoordinateTransformer {
    fn project(&self, source: &CoordinateReference, target: &CoordinateReference, point: Point) -> TwdResult<Point> {
        if source == target {
            return Ok(point);
        }
        if !point.is_finite() {
            return Err(TwdError::ProjectionError(format!("({}, {}) is not a finite coordinate", point.x, point.y)));
        }

        let (lon, lat) = source.projection.inverse(&source.ellipsoid, &point)?;
        if !lon.is_finite() || !lat.is_finite() || lat.abs() > std::f64::consts::FRAC_PI_2 {
            return Err(TwdError::ProjectionError(format!(
                "({}, {}) is outside the valid domain of {}", point.x, point.y, source.name
            )));
        }

        let (lon, lat) = self.shift_datum(lon, lat, source, target);
        let projected = target.projection.forward(&target.ellipsoid, lon, lat)?;

        if !projected.is_finite() {
            return Err(TwdError::ProjectionError(format!(
                "({}, {}) has no representation in {}", point.x, point.y, target.name
            )));
        }

        debug!("Transformed {} ({}, {}) to {} ({}, {})",
               source.name, point.x, point.y, target.name, projected.x, projected.y);

        Ok(projected)
    }
}
