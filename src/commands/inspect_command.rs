//! Point table inspection command
//!
//! Loads, cleans and normalizes a point table and prints the result without
//! reprojecting or writing anything. Useful for tuning the prefix/postfix
//! options.

use std::path::PathBuf;

use crate::api::{render_records, TwdKit};
use crate::commands::command_traits::Command;
use crate::config::Config;
use crate::survey::errors::TwdResult;

/// Command for inspecting the cleaned and normalized table
pub struct InspectCommand {
    input_file: PathBuf,
    kit: TwdKit,
}

impl InspectCommand {
    pub fn new(config: &Config) -> TwdResult<Self> {
        Ok(InspectCommand {
            input_file: super::require_data(config)?,
            kit: TwdKit::new(config)?,
        })
    }
}

impl Command for InspectCommand {
    fn execute(&self) -> TwdResult<()> {
        let raw = self.kit.load(&self.input_file)?;
        let raw_count = raw.len();
        let cleaned = self.kit.clean(raw);
        let cleaned_count = cleaned.len();
        let normalized = self.kit.normalize(cleaned)?;

        println!("{}", render_records(&normalized));
        println!("{} rows read, {} points after cleaning", raw_count, cleaned_count);
        Ok(())
    }
}
