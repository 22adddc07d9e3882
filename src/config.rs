//! Run configuration
//!
//! Options are read from the `[twd]` table of a TOML document:
//!
//! ```toml
//! [twd]
//! debug = false
//! data = "data/points.csv"
//! crs = "CRS_TWD97"
//! prefix_x = "3"
//! post_x = ""
//! prefix_y = "27"
//! post_y = ""
//! ```
//!
//! `output`, `gpx_version`, `delimiter` and `log_file` are optional.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::gpx::GpxVersion;
use crate::survey::errors::{TwdError, TwdResult};
use crate::survey::normalizer::NormalizationRule;

/// Name of the table holding the options
const SECTION: &str = "twd";

/// Reference used when the document names none
pub const DEFAULT_CRS: &str = "CRS_TWD97";

/// Options for one conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Enables debug logging
    pub debug: bool,
    /// Point table to convert
    pub data: Option<PathBuf>,
    /// Registry name of the input reference
    pub crs: String,
    /// Padding applied to raw coordinates
    pub rule: NormalizationRule,
    /// GPX destination; derived from `data` when absent
    pub output: Option<PathBuf>,
    pub gpx_version: GpxVersion,
    /// Field delimiter of the point table
    pub delimiter: u8,
    /// Log to this file instead of stderr
    pub log_file: Option<PathBuf>,
    /// Keys of the `[twd]` table that were not recognized
    pub unknown_keys: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            debug: false,
            data: None,
            crs: DEFAULT_CRS.to_string(),
            rule: NormalizationRule::default(),
            output: None,
            gpx_version: GpxVersion::default(),
            delimiter: b',',
            log_file: None,
            unknown_keys: Vec::new(),
        }
    }
}

impl Config {
    /// Parse a configuration document
    pub fn from_str(content: &str) -> TwdResult<Self> {
        let document: toml::Table = content
            .parse()
            .map_err(|e| TwdError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        let table = document
            .get(SECTION)
            .and_then(|v| v.as_table())
            .ok_or_else(|| TwdError::ConfigError(format!("Missing [{}] table", SECTION)))?;

        let mut config = Config::default();
        for (key, value) in table {
            match key.as_str() {
                "debug" => config.debug = value
                    .as_bool()
                    .ok_or_else(|| type_error(key, "a boolean"))?,
                "data" => config.data = Some(PathBuf::from(as_string(key, value)?)),
                "crs" => config.crs = as_string(key, value)?,
                "prefix_x" => config.rule.prefix_x = as_string(key, value)?,
                "post_x" => config.rule.post_x = as_string(key, value)?,
                "prefix_y" => config.rule.prefix_y = as_string(key, value)?,
                "post_y" => config.rule.post_y = as_string(key, value)?,
                "output" => config.output = Some(PathBuf::from(as_string(key, value)?)),
                "gpx_version" => config.gpx_version = as_string(key, value)?.parse()?,
                "delimiter" => config.delimiter = parse_delimiter(&as_string(key, value)?)?,
                "log_file" => config.log_file = Some(PathBuf::from(as_string(key, value)?)),
                other => config.unknown_keys.push(other.to_string()),
            }
        }

        Ok(config)
    }

    /// Log a warning for every unrecognized key
    ///
    /// Parsing usually happens before a logger is installed, so the
    /// warnings are emitted separately once logging is up.
    pub fn warn_unknown_keys(&self) {
        for key in &self.unknown_keys {
            warn!("Ignoring unknown option '{}' in [{}]", key, SECTION);
        }
    }

    /// Load a configuration file
    pub fn from_file(path: &Path) -> TwdResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| TwdError::ConfigError(format!("Cannot read {}: {}", path.display(), e)))?;

        Self::from_str(&contents)
    }
}

/// Accept a single ASCII character, or `\t` / `tab`
pub fn parse_delimiter(value: &str) -> TwdResult<u8> {
    match value {
        "\\t" | "tab" => Ok(b'\t'),
        v if v.len() == 1 && v.is_ascii() => Ok(v.as_bytes()[0]),
        v => Err(TwdError::ConfigError(format!("Delimiter must be a single ASCII character, got '{}'", v))),
    }
}

/// Strings and bare numbers are both accepted, so `prefix_x = 3` works
fn as_string(key: &str, value: &toml::Value) -> TwdResult<String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        _ => Err(type_error(key, "a string")),
    }
}

fn type_error(key: &str, expected: &str) -> TwdError {
    TwdError::ConfigError(format!("Option '{}' must be {}", key, expected))
}
