//! Datum definitions and geocentric datum shifts
//!
//! Shifts follow the PROJ `+towgs84` convention: seven position-vector
//! Helmert parameters with translations in meters, rotations in arc-seconds
//! and scale in parts per million.

use super::ellipsoid::Ellipsoid;

const SEC_TO_RAD: f64 = std::f64::consts::PI / 180.0 / 3600.0;

/// Two datums are considered identical when their eccentricities differ less than this
const ES_TOLERANCE: f64 = 0.000000000050;

/// How a datum relates to WGS84
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Datum {
    /// WGS84 itself
    Wgs84,
    /// `+towgs84=dx,dy,dz,rx,ry,rz,ds`
    ToWgs84([f64; 7]),
    /// `+nadgrids=@null`: geographic coordinates are taken as WGS84 unchanged
    NullGrid,
}

impl Datum {
    /// Helmert parameters towards WGS84, zero for WGS84 itself
    pub fn params(&self) -> [f64; 7] {
        match self {
            Datum::ToWgs84(p) => *p,
            _ => [0.0; 7],
        }
    }

    fn is_three_param(&self) -> bool {
        let p = self.params();
        p[3] == 0.0 && p[4] == 0.0 && p[5] == 0.0 && p[6] == 0.0
    }

    /// Whether a shift between the two datums is a no-op
    pub fn is_equivalent(&self, ellps: &Ellipsoid, other: &Datum, other_ellps: &Ellipsoid) -> bool {
        match (self, other) {
            (Datum::NullGrid, Datum::NullGrid) => true,
            (Datum::NullGrid, _) | (_, Datum::NullGrid) => false,
            _ => {
                self.is_three_param() == other.is_three_param()
                    && self.params() == other.params()
                    && ellps.a == other_ellps.a
                    && (ellps.es() - other_ellps.es()).abs() < ES_TOLERANCE
            }
        }
    }
}

/// Earth-centered earth-fixed cartesian coordinate in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geocentric {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Convert geodetic lon/lat (radians) and height to geocentric coordinates
pub fn geodetic_to_geocentric(ellps: &Ellipsoid, lon: f64, lat: f64, h: f64) -> Geocentric {
    let es = ellps.es();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let rn = ellps.a / (1.0 - es * sin_lat * sin_lat).sqrt();

    Geocentric {
        x: (rn + h) * cos_lat * lon.cos(),
        y: (rn + h) * cos_lat * lon.sin(),
        z: (rn * (1.0 - es) + h) * sin_lat,
    }
}

/// Convert geocentric coordinates to geodetic lon/lat (radians) and height
pub fn geocentric_to_geodetic(ellps: &Ellipsoid, g: &Geocentric) -> (f64, f64, f64) {
    let es = ellps.es();
    let p = g.x.hypot(g.y);
    let lon = g.y.atan2(g.x);

    if p < 1.0e-12 {
        let lat = if g.z < 0.0 { -std::f64::consts::FRAC_PI_2 } else { std::f64::consts::FRAC_PI_2 };
        return (lon, lat, g.z.abs() - ellps.b());
    }

    let mut lat = g.z.atan2(p * (1.0 - es));
    let mut h = 0.0;
    for _ in 0..30 {
        let sin_lat = lat.sin();
        let rn = ellps.a / (1.0 - es * sin_lat * sin_lat).sqrt();
        h = p / lat.cos() - rn;
        let next = g.z.atan2(p * (1.0 - es * rn / (rn + h)));
        let done = (next - lat).abs() < 1.0e-14;
        lat = next;
        if done {
            break;
        }
    }

    (lon, lat, h)
}

/// Apply `+towgs84` parameters: datum frame to WGS84
pub fn to_wgs84(g: &Geocentric, p: &[f64; 7]) -> Geocentric {
    let (rx, ry, rz) = (p[3] * SEC_TO_RAD, p[4] * SEC_TO_RAD, p[5] * SEC_TO_RAD);
    let m = 1.0 + p[6] / 1.0e6;

    Geocentric {
        x: m * (g.x - rz * g.y + ry * g.z) + p[0],
        y: m * (rz * g.x + g.y - rx * g.z) + p[1],
        z: m * (-ry * g.x + rx * g.y + g.z) + p[2],
    }
}

/// Reverse `+towgs84` parameters: WGS84 to datum frame
pub fn from_wgs84(g: &Geocentric, p: &[f64; 7]) -> Geocentric {
    let (rx, ry, rz) = (p[3] * SEC_TO_RAD, p[4] * SEC_TO_RAD, p[5] * SEC_TO_RAD);
    let m = 1.0 + p[6] / 1.0e6;

    let x = (g.x - p[0]) / m;
    let y = (g.y - p[1]) / m;
    let z = (g.z - p[2]) / m;

    Geocentric {
        x: x + rz * y - ry * z,
        y: -rz * x + y + rx * z,
        z: ry * x - rx * y + z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocentric_round_trip() {
        let ellps = Ellipsoid::GRS67;
        let (lon, lat) = (121.5_f64.to_radians(), 25.0_f64.to_radians());
        let g = geodetic_to_geocentric(&ellps, lon, lat, 0.0);
        let (lon2, lat2, h) = geocentric_to_geodetic(&ellps, &g);

        assert!((lon - lon2).abs() < 1e-12);
        assert!((lat - lat2).abs() < 1e-12);
        assert!(h.abs() < 1e-6);
    }

    #[test]
    fn test_helmert_translation_only() {
        let g = Geocentric { x: 1.0, y: 2.0, z: 3.0 };
        let shifted = to_wgs84(&g, &[10.0, 20.0, 30.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(shifted, Geocentric { x: 11.0, y: 22.0, z: 33.0 });
        assert_eq!(from_wgs84(&shifted, &[10.0, 20.0, 30.0, 0.0, 0.0, 0.0, 0.0]), g);
    }

    #[test]
    fn test_grs80_zero_shift_is_equivalent_to_wgs84() {
        let twd97 = Datum::ToWgs84([0.0; 7]);
        assert!(twd97.is_equivalent(&Ellipsoid::GRS80, &Datum::Wgs84, &Ellipsoid::WGS84));
        assert!(!Datum::NullGrid.is_equivalent(&Ellipsoid::WEB_SPHERE, &Datum::Wgs84, &Ellipsoid::WGS84));
    }
}
