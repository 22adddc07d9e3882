//! Fixed-width digit normalization

use log::debug;

use super::errors::{TwdError, TwdResult};
use super::record::{PointRecord, X_WIDTH, Y_WIDTH};

/// Prefix and postfix strings padding raw coordinates to canonical width
///
/// Every field may be empty. The rule is fixed for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationRule {
    pub prefix_x: String,
    pub post_x: String,
    pub prefix_y: String,
    pub post_y: String,
}

impl NormalizationRule {
    pub fn new(prefix_x: &str, post_x: &str, prefix_y: &str, post_y: &str) -> Self {
        NormalizationRule {
            prefix_x: prefix_x.to_string(),
            post_x: post_x.to_string(),
            prefix_y: prefix_y.to_string(),
            post_y: post_y.to_string(),
        }
    }

    pub fn apply_x(&self, x: &str) -> String {
        format!("{}{}{}", self.prefix_x, x, self.post_x)
    }

    pub fn apply_y(&self, y: &str) -> String {
        format!("{}{}{}", self.prefix_y, y, self.post_y)
    }
}

/// Pad every record's coordinates and validate their width
///
/// All eastings are checked before any northing. The first record that
/// misses its width fails the whole batch; nothing is returned in that case.
pub fn normalize(records: Vec<PointRecord>, rule: &NormalizationRule) -> TwdResult<Vec<PointRecord>> {
    debug!("Normalizing {} records with {:?}", records.len(), rule);

    let xs = records.iter().map(|r| rule.apply_x(&r.x)).collect::<Vec<_>>();
    check_width(&xs, "x", X_WIDTH)?;

    let ys = records.iter().map(|r| rule.apply_y(&r.y)).collect::<Vec<_>>();
    check_width(&ys, "y", Y_WIDTH)?;

    Ok(records
        .into_iter()
        .zip(xs.into_iter().zip(ys))
        .map(|(record, (x, y))| PointRecord { x, y, ..record })
        .collect())
}

fn check_width(values: &[String], field: &'static str, expected: usize) -> TwdResult<()> {
    match values.iter().position(|v| v.chars().count() != expected) {
        Some(row) => Err(TwdError::InvalidCoordinateWidth {
            row,
            field,
            value: values[row].clone(),
            expected,
        }),
        None => Ok(()),
    }
}
