//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod convert_command;
pub mod inspect_command;
pub mod list_crs_command;

pub use command_traits::{Command, CommandFactory};
pub use convert_command::ConvertCommand;
pub use inspect_command::InspectCommand;
pub use list_crs_command::ListCrsCommand;

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};

use crate::config::{parse_delimiter, Config};
use crate::survey::errors::{TwdError, TwdResult};

/// Factory for creating command instances based on CLI arguments
pub struct TwdkitCommandFactory;

impl TwdkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        TwdkitCommandFactory
    }
}

impl Default for TwdkitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for TwdkitCommandFactory {
    fn create_command(&self, args: &ArgMatches, config: &Config) -> TwdResult<Box<dyn Command>> {
        if args.get_flag("list-crs") {
            Ok(Box::new(ListCrsCommand::new()))
        } else if args.get_flag("inspect") {
            Ok(Box::new(InspectCommand::new(config)?))
        } else {
            // Default to converting
            Ok(Box::new(ConvertCommand::new(args, config)?))
        }
    }
}

/// Command line definition of the twdkit binary
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("twdkit")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Maurice Schilpp")
        .about("Convert TWD67/TWD97 survey points to GPX waypoints")
        .arg(
            Arg::new("input")
                .help("Point table (x, y, elevation, name); overrides `data` in the config")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Configuration file (default: ./config.toml if present)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("crs")
                .long("crs")
                .help("Coordinate reference of the input (CRS_TWD67, CRS_TWD97, CRS_WGS84, CRS_GOOGLE900913 or an EPSG code)")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("prefix-x")
                .long("prefix-x")
                .help("Prefix added to every x before width validation")
                .value_name("DIGITS")
                .required(false),
        )
        .arg(
            Arg::new("post-x")
                .long("post-x")
                .help("Postfix added to every x before width validation")
                .value_name("DIGITS")
                .required(false),
        )
        .arg(
            Arg::new("prefix-y")
                .long("prefix-y")
                .help("Prefix added to every y before width validation")
                .value_name("DIGITS")
                .required(false),
        )
        .arg(
            Arg::new("post-y")
                .long("post-y")
                .help("Postfix added to every y before width validation")
                .value_name("DIGITS")
                .required(false),
        )
        .arg(
            Arg::new("delimiter")
                .long("delimiter")
                .help("Field delimiter of the point table")
                .value_name("CHAR")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output GPX file (default: <input>_<timestamp>.gpx)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("gpx-version")
                .long("gpx-version")
                .help("GPX schema version (1.0 or 1.1)")
                .value_name("VERSION")
                .required(false),
        )
        .arg(
            Arg::new("stdout")
                .long("stdout")
                .help("Write the GPX document to stdout instead of a file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("inspect")
                .long("inspect")
                .help("Print the cleaned and normalized table without converting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-crs")
                .long("list-crs")
                .help("List the supported coordinate references")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write log records to this file")
                .value_name("FILE")
                .required(false),
        )
}

/// Load the configuration named on the command line and apply CLI overrides
///
/// Without `--config`, `config.toml` in the working directory is used when it
/// exists; otherwise defaults apply.
pub fn resolve_config(args: &ArgMatches) -> TwdResult<Config> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => Config::from_file(&PathBuf::from(path))?,
        None => {
            let default = PathBuf::from("config.toml");
            if default.is_file() {
                Config::from_file(&default)?
            } else {
                Config::default()
            }
        }
    };

    if let Some(input) = args.get_one::<String>("input") {
        config.data = Some(PathBuf::from(input));
    }
    if let Some(crs) = args.get_one::<String>("crs") {
        config.crs = crs.clone();
    }
    if let Some(v) = args.get_one::<String>("prefix-x") {
        config.rule.prefix_x = v.clone();
    }
    if let Some(v) = args.get_one::<String>("post-x") {
        config.rule.post_x = v.clone();
    }
    if let Some(v) = args.get_one::<String>("prefix-y") {
        config.rule.prefix_y = v.clone();
    }
    if let Some(v) = args.get_one::<String>("post-y") {
        config.rule.post_y = v.clone();
    }
    if let Some(output) = args.get_one::<String>("output") {
        config.output = Some(PathBuf::from(output));
    }
    if let Some(version) = args.get_one::<String>("gpx-version") {
        config.gpx_version = version.parse()?;
    }
    if let Some(delimiter) = args.get_one::<String>("delimiter") {
        config.delimiter = parse_delimiter(delimiter)?;
    }
    if let Some(log_file) = args.get_one::<String>("log-file") {
        config.log_file = Some(PathBuf::from(log_file));
    }
    if args.get_flag("verbose") {
        config.debug = true;
    }

    Ok(config)
}

/// The input path every pipeline command needs
pub(crate) fn require_data(config: &Config) -> TwdResult<PathBuf> {
    config
        .data
        .clone()
        .ok_or_else(|| TwdError::ConfigError("No point file given (use INPUT or `data` in the config)".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpx::GpxVersion;
    use tempfile::TempDir;

    fn config_file(dir: &TempDir) -> String {
        let path = dir.path().join("twd.toml");
        std::fs::write(
            &path,
            "[twd]\ndata = \"file.csv\"\ncrs = \"CRS_TWD67\"\nprefix_x = \"2\"\nprefix_y = \"27\"\ngpx_version = \"1.1\"\n",
        )
        .unwrap();
        path.to_string_lossy().into_owned()
    }

    fn resolve(args: &[&str]) -> TwdResult<Config> {
        let matches = build_cli().try_get_matches_from(args.iter().copied()).unwrap();
        resolve_config(&matches)
    }

    #[test]
    fn test_config_file_values_without_overrides() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);

        let config = resolve(&["twdkit", "-c", path.as_str()]).unwrap();

        assert_eq!(config.data, Some(PathBuf::from("file.csv")));
        assert_eq!(config.crs, "CRS_TWD67");
        assert_eq!(config.rule.prefix_x, "2");
        assert_eq!(config.gpx_version, GpxVersion::V1_1);
        assert!(!config.debug);
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);

        let config = resolve(&[
            "twdkit", "-c", path.as_str(),
            "--crs", "CRS_TWD97",
            "--prefix-x", "3",
            "--gpx-version", "1.0",
            "-v",
            "points.csv",
        ])
        .unwrap();

        assert_eq!(config.data, Some(PathBuf::from("points.csv")));
        assert_eq!(config.crs, "CRS_TWD97");
        assert_eq!(config.rule.prefix_x, "3");
        assert_eq!(config.rule.prefix_y, "27");
        assert_eq!(config.gpx_version, GpxVersion::V1_0);
        assert!(config.debug);
    }

    #[test]
    fn test_bad_gpx_version_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);

        let result = resolve(&["twdkit", "-c", path.as_str(), "--gpx-version", "2.0"]);
        assert!(matches!(result, Err(TwdError::ConfigError(_))));
    }

    #[test]
    fn test_bad_delimiter_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);

        let result = resolve(&["twdkit", "-c", path.as_str(), "--delimiter", ";;"]);
        assert!(matches!(result, Err(TwdError::ConfigError(_))));
    }
}
