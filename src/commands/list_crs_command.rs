//! Coordinate reference listing command

use crate::commands::command_traits::Command;
use crate::coordinate::crs;
use crate::survey::errors::TwdResult;
use crate::utils::table;

/// Command printing every registered coordinate reference
pub struct ListCrsCommand;

impl ListCrsCommand {
    pub fn new() -> Self {
        ListCrsCommand
    }

    /// Table of the registry
    pub fn render(&self) -> String {
        let rows: Vec<Vec<String>> = crs::all()
            .iter()
            .map(|c| {
                let epsg = c.epsg.iter().map(|code| code.to_string()).collect::<Vec<_>>().join(", ");
                vec![c.name.to_string(), epsg, c.description.to_string(), c.definition.to_string()]
            })
            .collect();

        table::render(&["name", "epsg", "description", "definition"], &rows)
    }
}

impl Default for ListCrsCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for ListCrsCommand {
    fn execute(&self) -> TwdResult<()> {
        println!("{}", self.render());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_reference() {
        let rendered = ListCrsCommand::new().render();
        for name in ["CRS_TWD67", "CRS_TWD97", "CRS_WGS84", "CRS_GOOGLE900913"] {
            assert!(rendered.contains(name));
        }
        assert!(rendered.contains("3826"));
    }
}
