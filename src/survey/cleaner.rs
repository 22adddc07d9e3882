//! Whitespace stripping, deduplication and name aggregation

use std::collections::{HashMap, HashSet};
use log::debug;

use super::record::PointRecord;

/// Separator placed between names of aggregated records
pub const NAME_SEPARATOR: &str = ",";

/// Clean a batch of records
///
/// Strips every field, drops exact duplicates, merges the names of rows that
/// share `(x, y, elevation)` in encounter order, then drops duplicates once
/// more. Output follows the first appearance of each position.
pub fn clean(records: Vec<PointRecord>) -> Vec<PointRecord> {
    let input_len = records.len();

    let stripped: Vec<PointRecord> = records.iter().map(PointRecord::trimmed).collect();
    let unique = drop_duplicates(stripped);
    let aggregated = aggregate_names(unique);
    // Kept for parity with the grouping step; aggregated keys are already unique
    let cleaned = drop_duplicates(aggregated);

    debug!("Cleaned {} records into {}", input_len, cleaned.len());
    cleaned
}

/// Remove rows equal on every field, keeping the first occurrence
pub fn drop_duplicates(records: Vec<PointRecord>) -> Vec<PointRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.clone()))
        .collect()
}

/// Collapse rows sharing `(x, y, elevation)` into one row with joined names
pub fn aggregate_names(records: Vec<PointRecord>) -> Vec<PointRecord> {
    let mut index: HashMap<(String, String, Option<String>), usize> = HashMap::new();
    let mut groups: Vec<(PointRecord, Vec<String>)> = Vec::new();

    for record in records {
        let key = record.position_key();
        match index.get(&key).copied() {
            Some(i) => groups[i].1.push(record.name),
            None => {
                index.insert(key, groups.len());
                let name = record.name.clone();
                groups.push((record, vec![name]));
            }
        }
    }

    groups
        .into_iter()
        .map(|(mut record, names)| {
            if names.len() > 1 {
                debug!("Merging {} names at ({}, {}): {:?}", names.len(), record.x, record.y, names);
                record.name = names.join(NAME_SEPARATOR);
            }
            record
        })
        .collect()
}
