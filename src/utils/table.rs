//! Console table rendering
//!
//! Renders rows in a bordered grid with centered cells, the layout used when
//! printing intermediate and final point tables. Column widths follow the
//! terminal width of each cell, so CJK point names keep the borders aligned.

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

/// Render a table with the given headers and rows
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).set_alignment(CellAlignment::Center))
            .collect::<Vec<_>>(),
    );

    for row in rows {
        table.add_row(Row::from(
            row.iter()
                .map(|cell| Cell::new(cell).set_alignment(CellAlignment::Center))
                .collect::<Vec<_>>(),
        ));
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Terminal columns of a line; CJK ideographs take two
    fn display_width(line: &str) -> usize {
        line.chars()
            .map(|c| if ('\u{4E00}'..='\u{9FFF}').contains(&c) { 2 } else { 1 })
            .sum()
    }

    #[test]
    fn test_render_headers_and_cells() {
        let table = render(&["x", "name"], &[vec!["123456".to_string(), "A,B".to_string()]]);

        let header = table.lines().nth(1).unwrap();
        assert!(header.contains('x'));
        assert!(header.contains("name"));
        assert!(table.contains("123456"));
        assert!(table.contains("A,B"));
    }

    #[test]
    fn test_render_keeps_borders_aligned_for_wide_names() {
        let rows = vec![
            vec!["306962".to_string(), "2769658".to_string(), "508".to_string(), "台北101".to_string()],
            vec!["306000".to_string(), "2769000".to_string(), "".to_string(), "A".to_string()],
        ];
        let table = render(&["x", "y", "ele", "name"], &rows);

        let widths: Vec<usize> = table.lines().map(display_width).collect();
        assert!(widths.len() > 4);
        assert!(widths.iter().all(|w| *w == widths[0]), "ragged table:\n{}", table);
    }

    #[test]
    fn test_render_without_rows() {
        let table = render(&["x"], &[]);
        assert!(table.contains('x'));
        assert!(table.lines().count() >= 3);
    }
}
