//! Map projection math
//!
//! Transverse Mercator uses the Krüger series to sixth order in the third
//! flattening, the same formulation as PROJ's `tmerc`. Mercator uses the
//! ellipsoidal formula, which reduces to the spherical one when a = b.
//! All angles here are radians; `Projection` values store degrees as they
//! appear in PROJ definitions.

use std::f64::consts::{FRAC_PI_2, PI};

use super::ellipsoid::Ellipsoid;
use super::point::Point;
use crate::survey::errors::{TwdError, TwdResult};

/// Largest |eta| accepted by the Krüger series
const TMERC_ETA_LIMIT: f64 = 2.623395162778;

/// Projection family and its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// `+proj=longlat`, coordinates are degrees
    Geographic,
    /// `+proj=tmerc`
    TransverseMercator {
        lon_0: f64,
        lat_0: f64,
        k_0: f64,
        x_0: f64,
        y_0: f64,
    },
    /// `+proj=merc`
    Mercator {
        lon_0: f64,
        lat_ts: f64,
        x_0: f64,
        y_0: f64,
    },
}

impl Projection {
    /// Projected (or geographic degree) coordinates to geodetic lon/lat in radians
    pub fn inverse(&self, ellps: &Ellipsoid, point: &Point) -> TwdResult<(f64, f64)> {
        match *self {
            Projection::Geographic => Ok((point.x.to_radians(), point.y.to_radians())),
            Projection::TransverseMercator { lon_0, lat_0, k_0, x_0, y_0 } => {
                let series = KrugerSeries::new(ellps);
                let scale = k_0 * ellps.a * series.a;
                let xi = (point.y - y_0) / scale + series.xi_at(ellps, lat_0.to_radians());
                let eta = (point.x - x_0) / scale;

                if eta.abs() > TMERC_ETA_LIMIT {
                    return Err(TwdError::ProjectionError(format!(
                        "({}, {}) is outside the transverse mercator domain", point.x, point.y
                    )));
                }

                let mut xip = xi;
                let mut etap = eta;
                for (j, beta) in series.beta.iter().enumerate() {
                    let k = 2.0 * (j + 1) as f64;
                    xip -= beta * (k * xi).sin() * (k * eta).cosh();
                    etap -= beta * (k * xi).cos() * (k * eta).sinh();
                }

                let taup = xip.sin() / (etap.sinh().powi(2) + xip.cos().powi(2)).sqrt();
                let lam = etap.sinh().atan2(xip.cos());
                let lat = tauf(taup, ellps.e()).atan();

                Ok((adjlon(lam + lon_0.to_radians()), lat))
            },
            Projection::Mercator { lon_0, lat_ts, x_0, y_0 } => {
                let scale = ellps.a * mercator_scale(ellps, lat_ts);
                let lon = (point.x - x_0) / scale + lon_0.to_radians();
                let taup = ((point.y - y_0) / scale).sinh();
                let lat = tauf(taup, ellps.e()).atan();

                Ok((adjlon(lon), lat))
            },
        }
    }

    /// Geodetic lon/lat in radians to projected (or geographic degree) coordinates
    pub fn forward(&self, ellps: &Ellipsoid, lon: f64, lat: f64) -> TwdResult<Point> {
        match *self {
            Projection::Geographic => Ok(Point::new(lon.to_degrees(), lat.to_degrees())),
            Projection::TransverseMercator { lon_0, lat_0, k_0, x_0, y_0 } => {
                let series = KrugerSeries::new(ellps);
                let lam = adjlon(lon - lon_0.to_radians());
                let taup = taupf(lat.tan(), ellps.e());

                let xip = taup.atan2(lam.cos());
                let etap = (lam.sin() / (1.0 + taup * taup).sqrt()).atanh();
                if !etap.is_finite() || etap.abs() > TMERC_ETA_LIMIT {
                    return Err(TwdError::ProjectionError(format!(
                        "({}, {}) is outside the transverse mercator domain",
                        lon.to_degrees(), lat.to_degrees()
                    )));
                }

                let (xi, eta) = series.apply_alpha(xip, etap);
                let scale = k_0 * ellps.a * series.a;
                let xi0 = series.xi_at(ellps, lat_0.to_radians());

                Ok(Point::new(x_0 + scale * eta, y_0 + scale * (xi - xi0)))
            },
            Projection::Mercator { lon_0, lat_ts, x_0, y_0 } => {
                if (lat.abs() - FRAC_PI_2).abs() < 1.0e-10 {
                    return Err(TwdError::ProjectionError(format!(
                        "latitude {} is outside the mercator domain", lat.to_degrees()
                    )));
                }
                let scale = ellps.a * mercator_scale(ellps, lat_ts);
                let x = x_0 + scale * adjlon(lon - lon_0.to_radians());
                let y = y_0 + scale * taupf(lat.tan(), ellps.e()).asinh();

                Ok(Point::new(x, y))
            },
        }
    }
}

/// Krüger series coefficients for one ellipsoid
struct KrugerSeries {
    /// Rectifying radius divided by a
    a: f64,
    alpha: [f64; 6],
    beta: [f64; 6],
}

impl KrugerSeries {
    fn new(ellps: &Ellipsoid) -> Self {
        let n = ellps.n();
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        KrugerSeries {
            a: (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0) / (1.0 + n),
            alpha: [
                n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0 - 127.0 * n5 / 288.0
                    + 7891.0 * n6 / 37800.0,
                13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0 + 281.0 * n5 / 630.0
                    - 1983433.0 * n6 / 1935360.0,
                61.0 * n3 / 240.0 - 103.0 * n4 / 140.0 + 15061.0 * n5 / 26880.0 + 167603.0 * n6 / 181440.0,
                49561.0 * n4 / 161280.0 - 179.0 * n5 / 168.0 + 6601661.0 * n6 / 7257600.0,
                34729.0 * n5 / 80640.0 - 3418889.0 * n6 / 1995840.0,
                212378941.0 * n6 / 319334400.0,
            ],
            beta: [
                n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0 - 81.0 * n5 / 512.0
                    + 96199.0 * n6 / 604800.0,
                n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0 + 46.0 * n5 / 105.0 - 1118711.0 * n6 / 3870720.0,
                17.0 * n3 / 480.0 - 37.0 * n4 / 840.0 - 209.0 * n5 / 4480.0 + 5569.0 * n6 / 90720.0,
                4397.0 * n4 / 161280.0 - 11.0 * n5 / 504.0 - 830251.0 * n6 / 7257600.0,
                4583.0 * n5 / 161280.0 - 108847.0 * n6 / 3991680.0,
                20648693.0 * n6 / 638668800.0,
            ],
        }
    }

    fn apply_alpha(&self, xip: f64, etap: f64) -> (f64, f64) {
        let mut xi = xip;
        let mut eta = etap;
        for (j, alpha) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += alpha * (k * xip).sin() * (k * etap).cosh();
            eta += alpha * (k * xip).cos() * (k * etap).sinh();
        }
        (xi, eta)
    }

    /// Normalized meridian distance to a latitude on the central meridian
    fn xi_at(&self, ellps: &Ellipsoid, lat: f64) -> f64 {
        if lat == 0.0 {
            return 0.0;
        }
        let xip = taupf(lat.tan(), ellps.e()).atan();
        self.apply_alpha(xip, 0.0).0
    }
}

/// Tangent of the conformal latitude from the tangent of the geodetic latitude
fn taupf(tau: f64, e: f64) -> f64 {
    let tau1 = (1.0 + tau * tau).sqrt();
    let sig = (e * (e * tau / tau1).atanh()).sinh();
    tau * (1.0 + sig * sig).sqrt() - sig * tau1
}

/// Inverse of `taupf` by Newton iteration
fn tauf(taup: f64, e: f64) -> f64 {
    let e2m = 1.0 - e * e;
    let stol = f64::EPSILON.sqrt() / 10.0 * taup.abs().max(1.0);
    let mut tau = taup / e2m;

    for _ in 0..10 {
        let taupa = taupf(tau, e);
        let dtau = (taup - taupa) * (1.0 + e2m * tau * tau)
            / (e2m * (1.0 + tau * tau).sqrt() * (1.0 + taupa * taupa).sqrt());
        tau += dtau;
        if !(dtau.abs() >= stol) {
            break;
        }
    }
    tau
}

/// Scale factor on the equator for a mercator true at `lat_ts` degrees
fn mercator_scale(ellps: &Ellipsoid, lat_ts: f64) -> f64 {
    let (s, c) = lat_ts.to_radians().sin_cos();
    c / (1.0 - ellps.es() * s * s).sqrt()
}

/// Wrap a longitude into [-pi, pi]
fn adjlon(lon: f64) -> f64 {
    if lon.abs() <= PI {
        return lon;
    }
    let wrapped = (lon + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI && lon > 0.0 {
        PI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TM2_121: Projection = Projection::TransverseMercator {
        lon_0: 121.0,
        lat_0: 0.0,
        k_0: 0.9999,
        x_0: 250000.0,
        y_0: 0.0,
    };

    #[test]
    fn test_tmerc_inverse_on_central_meridian() {
        let (lon, lat) = TM2_121.inverse(&Ellipsoid::GRS80, &Point::new(250000.0, 2544283.0)).unwrap();
        assert!((lon.to_degrees() - 121.0).abs() < 1e-12);
        assert!((lat.to_degrees() - 22.999998873016086).abs() < 1e-9);
    }

    #[test]
    fn test_tmerc_forward_inverse_round_trip() {
        let ellps = Ellipsoid::GRS80;
        let (lon, lat) = (121.564468_f64.to_radians(), 25.033964_f64.to_radians());
        let p = TM2_121.forward(&ellps, lon, lat).unwrap();
        assert!((p.x - 306962.3199420266).abs() < 1e-4);
        assert!((p.y - 2769658.222656996).abs() < 1e-4);

        let (lon2, lat2) = TM2_121.inverse(&ellps, &p).unwrap();
        assert!((lon - lon2).abs() < 1e-12);
        assert!((lat - lat2).abs() < 1e-12);
    }

    #[test]
    fn test_tmerc_rejects_far_easting() {
        let result = TM2_121.inverse(&Ellipsoid::GRS80, &Point::new(1.0e9, 2500000.0));
        assert!(matches!(result, Err(TwdError::ProjectionError(_))));
    }

    #[test]
    fn test_spherical_mercator_inverse() {
        let merc = Projection::Mercator { lon_0: 0.0, lat_ts: 0.0, x_0: 0.0, y_0: 0.0 };
        let (lon, lat) = merc.inverse(&Ellipsoid::WEB_SPHERE, &Point::new(13532000.0, 2875000.0)).unwrap();
        assert!((lon.to_degrees() - 121.56002424705365).abs() < 1e-9);
        assert!((lat.to_degrees() - 24.99393749026751).abs() < 1e-9);
    }

    #[test]
    fn test_mercator_rejects_pole() {
        let merc = Projection::Mercator { lon_0: 0.0, lat_ts: 0.0, x_0: 0.0, y_0: 0.0 };
        assert!(merc.forward(&Ellipsoid::WEB_SPHERE, 0.0, FRAC_PI_2).is_err());
    }

    #[test]
    fn test_adjlon_wraps() {
        assert!((adjlon(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert_eq!(adjlon(1.0), 1.0);
    }
}
