//! Survey point table processing
//!
//! The pipeline stages in order: load, clean, normalize, reproject. Each
//! stage takes ownership of the table produced by the previous one and
//! returns a new table.

pub mod errors;
pub mod record;
pub mod reader;
pub mod cleaner;
pub mod normalizer;
pub mod reprojector;

pub use errors::{TwdError, TwdResult};
pub use record::{GeoRecord, PointRecord, X_WIDTH, Y_WIDTH};
pub use reader::RecordLoader;
pub use cleaner::clean;
pub use normalizer::{normalize, NormalizationRule};
pub use reprojector::transform;
