use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, info, log_enabled, Level};

use crate::config::Config;
use crate::coordinate::{crs, CoordinateReference, CoordinateTransformer};
use crate::gpx::{self, WaypointCollection};
use crate::survey::errors::TwdResult;
use crate::survey::{cleaner, normalizer, reprojector, GeoRecord, NormalizationRule, PointRecord, RecordLoader};
use crate::survey::record::{GEO_RECORD_COLUMNS, RECORD_COLUMNS};
use crate::utils::progress::ProgressTracker;
use crate::utils::table;

/// Main interface to the twdkit library
///
/// Holds everything fixed for one run: the source reference, the
/// normalization rule, the loader settings and the GPX version. Each stage
/// is exposed separately so callers can inspect the table in between.
pub struct TwdKit {
    source: &'static CoordinateReference,
    target: &'static CoordinateReference,
    rule: NormalizationRule,
    loader: RecordLoader,
    engine: CoordinateTransformer,
    config: Config,
}

/// Everything produced by a full run
pub struct ConversionOutput {
    /// Final table with native and geographic coordinates
    pub records: Vec<GeoRecord>,
    /// Waypoints ready for serialization
    pub waypoints: WaypointCollection,
}

impl TwdKit {
    /// Create a TwdKit instance from a configuration
    ///
    /// # Returns
    /// A TwdKit instance, or `UnknownReference` if `config.crs` is not registered
    pub fn new(config: &Config) -> TwdResult<Self> {
        let source = crs::lookup(&config.crs)?;
        let target = crs::lookup(crs::WGS84)?;
        info!("Converting from {} ({}) to {}", source.name, source.description, target.name);

        Ok(TwdKit {
            source,
            target,
            rule: config.rule.clone(),
            loader: RecordLoader::new().with_delimiter(config.delimiter),
            engine: CoordinateTransformer::new(),
            config: config.clone(),
        })
    }

    /// Reference of the input coordinates
    pub fn source(&self) -> &'static CoordinateReference {
        self.source
    }

    /// Load the point table at `path`
    pub fn load(&self, path: &Path) -> TwdResult<Vec<PointRecord>> {
        self.loader.load(path)
    }

    /// Strip, deduplicate and aggregate records
    pub fn clean(&self, records: Vec<PointRecord>) -> Vec<PointRecord> {
        let cleaned = cleaner::clean(records);
        debug!("Cleaned table:\n{}", render_records(&cleaned));
        cleaned
    }

    /// Pad coordinates with the configured rule and validate their width
    pub fn normalize(&self, records: Vec<PointRecord>) -> TwdResult<Vec<PointRecord>> {
        let normalized = normalizer::normalize(records, &self.rule)?;
        debug!("Normalized table:\n{}", render_records(&normalized));
        Ok(normalized)
    }

    /// Reproject records to WGS84
    pub fn transform(&self, records: Vec<PointRecord>) -> TwdResult<Vec<GeoRecord>> {
        reprojector::transform(records, &self.engine, self.source, self.target)
    }

    /// Reproject records to WGS84 while drawing a progress bar
    pub fn transform_with_progress(&self, records: Vec<PointRecord>) -> TwdResult<Vec<GeoRecord>> {
        let tracker = ProgressTracker::new(records.len() as u64, "Reprojecting");
        let result = reprojector::transform_with_progress(records, &self.engine, self.source, self.target, Some(&tracker));
        tracker.finish();
        result
    }

    /// Build the waypoint collection for reprojected records
    pub fn build_waypoints(&self, records: &[GeoRecord]) -> TwdResult<WaypointCollection> {
        let collection = gpx::build(records).with_version(self.config.gpx_version);
        if log_enabled!(Level::Debug) {
            debug!("{}", gpx::to_xml(&collection)?);
        }
        Ok(collection)
    }

    /// Run every stage on `path` without writing anything
    pub fn run(&self, path: &Path) -> TwdResult<ConversionOutput> {
        let records = self.load(path)?;
        let records = self.clean(records);
        let records = self.normalize(records)?;
        let records = self.transform(records)?;
        let waypoints = self.build_waypoints(&records)?;

        Ok(ConversionOutput { records, waypoints })
    }

    /// Run every stage and write the GPX file
    ///
    /// # Arguments
    /// * `path` - Point table to convert
    /// * `output` - GPX destination; defaults to the configured output, then
    ///   to a timestamped name next to the input
    ///
    /// # Returns
    /// The path written
    pub fn convert(&self, path: &Path, output: Option<&Path>) -> TwdResult<PathBuf> {
        let result = self.run(path)?;
        let destination = self.output_path(path, output);
        gpx::write(&result.waypoints, &destination)?;
        Ok(destination)
    }

    /// Resolve where the GPX document for `input` goes
    pub fn output_path(&self, input: &Path, output: Option<&Path>) -> PathBuf {
        output
            .map(Path::to_path_buf)
            .or_else(|| self.config.output.clone())
            .unwrap_or_else(|| gpx::default_output_path(input, Local::now()))
    }
}

/// Render a cleaned or normalized table for display
pub fn render_records(records: &[PointRecord]) -> String {
    let rows: Vec<Vec<String>> = records.iter().map(PointRecord::to_row).collect();
    table::render(&RECORD_COLUMNS, &rows)
}

/// Render a reprojected table for display
pub fn render_geo_records(records: &[GeoRecord]) -> String {
    let rows: Vec<Vec<String>> = records.iter().map(GeoRecord::to_row).collect();
    table::render(&GEO_RECORD_COLUMNS, &rows)
}
