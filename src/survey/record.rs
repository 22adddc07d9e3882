//! Survey point records

/// Required width of a normalized easting
pub const X_WIDTH: usize = 6;
/// Required width of a normalized northing
pub const Y_WIDTH: usize = 7;

/// One surveyed point as read from the source table
///
/// `x` and `y` stay text so that leading digits survive until normalization;
/// they are only parsed as numbers by the reprojection stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PointRecord {
    /// Native grid easting
    pub x: String,
    /// Native grid northing
    pub y: String,
    /// Elevation, absent when the column is empty
    pub elevation: Option<String>,
    /// Label; comma separated after aggregation
    pub name: String,
}

impl PointRecord {
    pub fn new(x: &str, y: &str, elevation: Option<&str>, name: &str) -> Self {
        PointRecord {
            x: x.to_string(),
            y: y.to_string(),
            elevation: elevation.map(str::to_string),
            name: name.to_string(),
        }
    }

    /// Copy of this record with surrounding whitespace removed from every field
    pub fn trimmed(&self) -> Self {
        PointRecord {
            x: self.x.trim().to_string(),
            y: self.y.trim().to_string(),
            elevation: self.elevation
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
            name: self.name.trim().to_string(),
        }
    }

    /// Position key used for aggregation
    pub fn position_key(&self) -> (String, String, Option<String>) {
        (self.x.clone(), self.y.clone(), self.elevation.clone())
    }

    /// Elevation for display, empty when absent
    pub fn elevation_str(&self) -> &str {
        self.elevation.as_deref().unwrap_or("")
    }
}

/// A record after reprojection, keeping its native grid text for audit
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRecord {
    pub record: PointRecord,
    /// Longitude in the target reference, full precision
    pub longitude: f64,
    /// Latitude in the target reference, full precision
    pub latitude: f64,
}

/// Column headers of a cleaned or normalized table
pub const RECORD_COLUMNS: [&str; 4] = ["x", "y", "ele", "name"];

/// Column headers of a reprojected table; geographic columns follow their grid column
pub const GEO_RECORD_COLUMNS: [&str; 6] = ["x", "lon", "y", "lat", "ele", "name"];

impl PointRecord {
    /// Cells in `RECORD_COLUMNS` order
    pub fn to_row(&self) -> Vec<String> {
        vec![self.x.clone(), self.y.clone(), self.elevation_str().to_string(), self.name.clone()]
    }
}

impl GeoRecord {
    /// Cells in `GEO_RECORD_COLUMNS` order
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.record.x.clone(),
            format!("{:.8}", self.longitude),
            self.record.y.clone(),
            format!("{:.8}", self.latitude),
            self.record.elevation_str().to_string(),
            self.record.name.clone(),
        ]
    }
}
