pub mod survey;
pub mod coordinate;
pub mod gpx;
pub mod config;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::TwdKit;
pub use crate::config::Config;

pub use survey::{GeoRecord, NormalizationRule, PointRecord, RecordLoader, TwdError, TwdResult};
pub use coordinate::{CoordinateReference, CoordinateTransformer, Point, ProjectionEngine};
pub use gpx::{GpxVersion, Waypoint, WaypointCollection};
