//! Point table to GPX conversion command
//!
//! Drives every pipeline stage, prints the final table and writes the
//! waypoints to a file or stdout.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::api::{render_geo_records, TwdKit};
use crate::commands::command_traits::Command;
use crate::config::Config;
use crate::gpx;
use crate::survey::errors::{TwdError, TwdResult};

/// Command for converting a point table into a GPX file
pub struct ConvertCommand {
    /// Path to the point table
    input_file: PathBuf,
    /// Write the document to stdout instead of a file
    to_stdout: bool,
    /// Whether to draw a progress bar while reprojecting
    show_progress: bool,
    kit: TwdKit,
}

impl ConvertCommand {
    /// Create a new convert command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `config` - Resolved configuration
    ///
    /// # Returns
    /// A new ConvertCommand instance or an error
    pub fn new(args: &ArgMatches, config: &Config) -> TwdResult<Self> {
        let input_file = super::require_data(config)?;
        let to_stdout = args.get_flag("stdout");

        Ok(ConvertCommand {
            input_file,
            to_stdout,
            show_progress: !to_stdout && !config.debug,
            kit: TwdKit::new(config)?,
        })
    }
}

impl Command for ConvertCommand {
    fn execute(&self) -> TwdResult<()> {
        info!("Converting {} ({})", self.input_file.display(), self.kit.source().name);

        let records = self.kit.load(&self.input_file)?;
        let records = self.kit.clean(records);
        let records = self.kit.normalize(records)?;
        let records = if self.show_progress {
            self.kit.transform_with_progress(records)?
        } else {
            self.kit.transform(records)?
        };
        let waypoints = self.kit.build_waypoints(&records)?;

        if self.to_stdout {
            let bytes = gpx::serialize(&waypoints)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)
                .and_then(|_| stdout.flush())
                .map_err(|source| TwdError::WriteError { path: PathBuf::from("-"), source })?;
            return Ok(());
        }

        let destination = self.kit.output_path(&self.input_file, None);
        gpx::write(&waypoints, &destination)?;

        println!("{}", render_geo_records(&records));
        println!("{} waypoints written to {}", waypoints.len(), destination.display());
        Ok(())
    }
}
