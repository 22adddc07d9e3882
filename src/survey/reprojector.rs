//! Native grid to geographic reprojection of a record table

use log::info;

use super::errors::{TwdError, TwdResult};
use super::record::{GeoRecord, PointRecord};
use crate::coordinate::{CoordinateReference, Point, ProjectionEngine};
use crate::utils::progress::ProgressTracker;

/// Reproject every record from `source` to `target`
///
/// Coordinates are parsed as `f64` and passed to `engine` unrounded. The
/// native grid text is kept on each output record. Any unparseable value or
/// out-of-domain pair fails the whole batch.
pub fn transform<E: ProjectionEngine>(
    records: Vec<PointRecord>,
    engine: &E,
    source: &CoordinateReference,
    target: &CoordinateReference,
) -> TwdResult<Vec<GeoRecord>> {
    transform_with_progress(records, engine, source, target, None)
}

/// Same as `transform`, advancing `progress` once per record
pub fn transform_with_progress<E: ProjectionEngine>(
    records: Vec<PointRecord>,
    engine: &E,
    source: &CoordinateReference,
    target: &CoordinateReference,
    progress: Option<&ProgressTracker>,
) -> TwdResult<Vec<GeoRecord>> {
    let mut out = Vec::with_capacity(records.len());

    for (row, record) in records.into_iter().enumerate() {
        let x = parse_coordinate(&record.x, row, "x")?;
        let y = parse_coordinate(&record.y, row, "y")?;

        let projected = engine.project(source, target, Point::new(x, y)).map_err(|e| match e {
            TwdError::ProjectionError(msg) => TwdError::ProjectionError(format!("row {}: {}", row, msg)),
            other => other,
        })?;

        info!("{:5.8},{:5.8}, name={}", projected.y, projected.x, record.name);

        if let Some(tracker) = progress {
            tracker.increment(1);
        }

        out.push(GeoRecord {
            record,
            longitude: projected.x,
            latitude: projected.y,
        });
    }

    Ok(out)
}

fn parse_coordinate(value: &str, row: usize, field: &str) -> TwdResult<f64> {
    value.parse::<f64>().map_err(|_| {
        TwdError::ProjectionError(format!("row {}: {} = '{}' is not a number", row, field, value))
    })
}
