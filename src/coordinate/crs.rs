//! Coordinate Reference System registry
//!
//! The registry is a fixed table built once on first use. Parameters are
//! copied from the PROJ definitions the TWD datasets are published with; the
//! datum shift coefficients are part of the output contract and must not be
//! rounded.

use std::collections::HashMap;
use lazy_static::lazy_static;
use regex::Regex;

use super::datum::Datum;
use super::ellipsoid::Ellipsoid;
use super::projection::Projection;
use crate::survey::errors::{TwdError, TwdResult};

/// Registry key of the default output reference
pub const WGS84: &str = "CRS_WGS84";

/// A named coordinate reference definition
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateReference {
    /// Registry key, e.g. `CRS_TWD97`
    pub name: &'static str,
    /// EPSG codes that resolve to this entry
    pub epsg: &'static [u32],
    /// Human readable description
    pub description: &'static str,
    /// PROJ definition the parameters were taken from
    pub definition: &'static str,
    pub ellipsoid: Ellipsoid,
    pub datum: Datum,
    pub projection: Projection,
}

impl CoordinateReference {
    /// Whether coordinates in this reference are longitude/latitude degrees
    pub fn is_geographic(&self) -> bool {
        self.projection == Projection::Geographic
    }
}

/// Taiwan TM2 zone with central meridian 121E
const TM2_121: Projection = Projection::TransverseMercator {
    lon_0: 121.0,
    lat_0: 0.0,
    k_0: 0.9999,
    x_0: 250000.0,
    y_0: 0.0,
};

fn definitions() -> Vec<CoordinateReference> {
    vec![
        CoordinateReference {
            name: "CRS_TWD67",
            epsg: &[3828],
            description: "TWD67 / TM2 zone 121",
            definition: "+proj=tmerc +ellps=GRS67 +towgs84=-752,-358,-179,-.0000011698,.0000018398,.0000009822,.00002329 +lon_0=121 +x_0=250000 +k=0.9999",
            ellipsoid: Ellipsoid::GRS67,
            datum: Datum::ToWgs84([-752.0, -358.0, -179.0, -0.0000011698, 0.0000018398, 0.0000009822, 0.00002329]),
            projection: TM2_121,
        },
        CoordinateReference {
            name: "CRS_TWD97",
            epsg: &[3826],
            description: "TWD97 / TM2 zone 121",
            definition: "+proj=tmerc +lat_0=0 +lon_0=121 +k=0.9999 +x_0=250000 +y_0=0 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
            ellipsoid: Ellipsoid::GRS80,
            datum: Datum::ToWgs84([0.0; 7]),
            projection: TM2_121,
        },
        CoordinateReference {
            name: WGS84,
            epsg: &[4326],
            description: "WGS 84 geographic",
            definition: "+proj=longlat +datum=WGS84 +no_defs",
            ellipsoid: Ellipsoid::WGS84,
            datum: Datum::Wgs84,
            projection: Projection::Geographic,
        },
        CoordinateReference {
            name: "CRS_GOOGLE900913",
            epsg: &[3857, 900913],
            description: "Spherical web mercator",
            definition: "+proj=merc +a=6378137 +b=6378137 +lat_ts=0.0 +lon_0=0.0 +x_0=0.0 +y_0=0 +k=1.0 +units=m +nadgrids=@null +wktext +no_defs",
            ellipsoid: Ellipsoid::WEB_SPHERE,
            datum: Datum::NullGrid,
            projection: Projection::Mercator { lon_0: 0.0, lat_ts: 0.0, x_0: 0.0, y_0: 0.0 },
        },
    ]
}

lazy_static! {
    static ref REGISTRY: Vec<CoordinateReference> = definitions();

    static ref BY_NAME: HashMap<&'static str, usize> = REGISTRY
        .iter()
        .enumerate()
        .map(|(i, crs)| (crs.name, i))
        .collect();

    static ref EPSG_PATTERN: Regex = Regex::new(r"^(?:EPSG:)?(\d+)$").unwrap();
}

/// Look up a coordinate reference by name
///
/// Accepts the registry key (`CRS_TWD97`), the key without its `CRS_` prefix
/// (`twd97`), or an EPSG code (`EPSG:3826`, `3826`). Names are matched
/// case-insensitively. There is no fallback: anything else is an
/// `UnknownReference`.
pub fn lookup(name: &str) -> TwdResult<&'static CoordinateReference> {
    let key = name.trim().to_uppercase();

    if let Some(caps) = EPSG_PATTERN.captures(&key) {
        if let Ok(code) = caps[1].parse::<u32>() {
            if let Some(crs) = REGISTRY.iter().find(|crs| crs.epsg.contains(&code)) {
                return Ok(crs);
            }
        }
        return Err(TwdError::UnknownReference(name.to_string()));
    }

    let key = if key.starts_with("CRS_") { key } else { format!("CRS_{}", key) };
    BY_NAME
        .get(key.as_str())
        .map(|&i| &REGISTRY[i])
        .ok_or_else(|| TwdError::UnknownReference(name.to_string()))
}

/// All registered references in registration order
pub fn all() -> &'static [CoordinateReference] {
    &REGISTRY
}
