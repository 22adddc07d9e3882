//! Waypoint collection built from reprojected records

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::survey::errors::TwdError;
use crate::survey::record::GeoRecord;

/// Symbol tag written on every waypoint
pub const DEFAULT_SYMBOL: &str = "Waypoint";

/// Creator attribute of generated documents
pub const CREATOR: &str = "twdkit";

/// GPX schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpxVersion {
    V1_0,
    #[default]
    V1_1,
}

impl GpxVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            GpxVersion::V1_0 => "1.0",
            GpxVersion::V1_1 => "1.1",
        }
    }

    /// Default namespace of the version's schema
    pub fn namespace(&self) -> &'static str {
        match self {
            GpxVersion::V1_0 => "http://www.topografix.com/GPX/1/0",
            GpxVersion::V1_1 => "http://www.topografix.com/GPX/1/1",
        }
    }

    /// Location of the version's XSD
    pub fn schema_location(&self) -> &'static str {
        match self {
            GpxVersion::V1_0 => "http://www.topografix.com/GPX/1/0 http://www.topografix.com/GPX/1/0/gpx.xsd",
            GpxVersion::V1_1 => "http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd",
        }
    }
}

impl fmt::Display for GpxVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GpxVersion {
    type Err = TwdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1.0" => Ok(GpxVersion::V1_0),
            "1.1" => Ok(GpxVersion::V1_1),
            other => Err(TwdError::ConfigError(format!("Unsupported GPX version: {}", other))),
        }
    }
}

/// A named, positioned waypoint
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub longitude: f64,
    pub latitude: f64,
    /// Elevation text as found in the source
    pub elevation: Option<String>,
    pub name: String,
    pub time: DateTime<Utc>,
    pub symbol: String,
}

/// Ordered set of waypoints forming one GPX document
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointCollection {
    pub version: GpxVersion,
    pub creator: String,
    pub waypoints: Vec<Waypoint>,
}

impl WaypointCollection {
    /// Empty collection for the given schema version
    pub fn new(version: GpxVersion) -> Self {
        WaypointCollection {
            version,
            creator: CREATOR.to_string(),
            waypoints: Vec::new(),
        }
    }

    /// Change the schema version
    pub fn with_version(mut self, version: GpxVersion) -> Self {
        self.version = version;
        self
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

/// Build waypoints from reprojected records, stamped with the current time
pub fn build(records: &[GeoRecord]) -> WaypointCollection {
    build_at(records, Utc::now())
}

/// Build waypoints from reprojected records with a fixed timestamp
pub fn build_at(records: &[GeoRecord], time: DateTime<Utc>) -> WaypointCollection {
    let mut collection = WaypointCollection::new(GpxVersion::default());
    collection.waypoints = records
        .iter()
        .map(|r| Waypoint {
            longitude: r.longitude,
            latitude: r.latitude,
            elevation: r.record.elevation.clone(),
            name: r.record.name.clone(),
            time,
            symbol: DEFAULT_SYMBOL.to_string(),
        })
        .collect();
    collection
}
