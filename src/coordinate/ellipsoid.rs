//! Reference ellipsoids

/// A reference ellipsoid given by semi-major axis and inverse flattening
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Short name as used in PROJ definitions
    pub name: &'static str,
    /// Semi-major axis in meters
    pub a: f64,
    /// Inverse flattening, 0.0 for a sphere
    pub rf: f64,
}

impl Ellipsoid {
    /// Geodetic Reference System 1967 (TWD67)
    pub const GRS67: Ellipsoid = Ellipsoid { name: "GRS67", a: 6378160.0, rf: 298.247167427 };
    /// Geodetic Reference System 1980 (TWD97)
    pub const GRS80: Ellipsoid = Ellipsoid { name: "GRS80", a: 6378137.0, rf: 298.257222101 };
    /// World Geodetic System 1984
    pub const WGS84: Ellipsoid = Ellipsoid { name: "WGS84", a: 6378137.0, rf: 298.257223563 };
    /// Sphere with the WGS84 semi-major axis, used by web mercator
    pub const WEB_SPHERE: Ellipsoid = Ellipsoid { name: "sphere", a: 6378137.0, rf: 0.0 };

    /// Flattening
    pub fn f(&self) -> f64 {
        if self.rf == 0.0 {
            0.0
        } else {
            1.0 / self.rf
        }
    }

    /// First eccentricity squared
    pub fn es(&self) -> f64 {
        let f = self.f();
        f * (2.0 - f)
    }

    /// First eccentricity
    pub fn e(&self) -> f64 {
        self.es().sqrt()
    }

    /// Semi-minor axis
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f())
    }

    /// Third flattening n = (a - b) / (a + b)
    pub fn n(&self) -> f64 {
        let f = self.f();
        f / (2.0 - f)
    }

    /// Whether this ellipsoid is a sphere
    pub fn is_sphere(&self) -> bool {
        self.rf == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grs80_derived_values() {
        let e = Ellipsoid::GRS80;
        assert!((e.es() - 0.006694380022900787).abs() < 1e-15);
        assert!((e.b() - 6356752.314140356).abs() < 1e-6);
    }

    #[test]
    fn test_sphere_has_no_eccentricity() {
        let s = Ellipsoid::WEB_SPHERE;
        assert!(s.is_sphere());
        assert_eq!(s.es(), 0.0);
        assert_eq!(s.b(), s.a);
    }
}
