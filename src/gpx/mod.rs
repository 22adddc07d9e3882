//! GPX waypoint export
//!
//! Turns reprojected records into waypoints and writes them in the GPX
//! interchange format.

pub mod waypoint;
pub mod writer;

pub use waypoint::{build, build_at, GpxVersion, Waypoint, WaypointCollection, DEFAULT_SYMBOL};
pub use writer::{default_output_path, serialize, to_xml, write};
