// src/report.rs

use prettytable::{format, Cell, Row, Table as Grid};

use crate::{pipeline::DuplicateReport, table::Table};

const RULE: &str = "-------------------------------------";
const BANNER: &str = "######################################";

/// Render selected rows as a boxed grid, each prefixed by its position in
/// `table`.
pub fn render_rows(table: &Table, positions: &[usize]) -> String {
    let mut grid = Grid::new();
    grid.set_format(*format::consts::FORMAT_BOX_CHARS);

    let mut header = vec![Cell::new("")];
    header.extend(table.columns().iter().map(|c| Cell::new(c).style_spec("bFg")));
    grid.add_row(Row::new(header));

    for &p in positions {
        let mut cells = vec![Cell::new(&p.to_string()).style_spec("r")];
        cells.extend((0..table.columns().len()).map(|c| {
            let value = table.get(p, c).map(|v| v.to_string()).unwrap_or_default();
            Cell::new(&value).style_spec("r")
        }));
        grid.add_row(Row::new(cells));
    }
    grid.to_string()
}

/// Full console message for a run stopped by duplicated identifiers.
pub fn render_duplicate_report(table: &Table, report: &DuplicateReport) -> String {
    let mut out = String::new();
    if !report.cpf.is_empty() {
        out.push_str("Duplicated CPF rows:\n");
        out.push_str(&render_rows(table, &report.cpf));
        out.push_str(RULE);
        out.push('\n');
    }
    if !report.pis.is_empty() {
        out.push_str("Duplicated PIS rows:\n");
        out.push_str(&render_rows(table, &report.pis));
        out.push_str(RULE);
        out.push('\n');
    }
    out.push_str(BANNER);
    out.push('\n');
    out.push_str("Resolve duplications before proceding\n");
    out.push_str(BANNER);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn table() -> Table {
        Table::from_rows(
            ["nome", "cpf"],
            [
                vec![Value::text("Ana"), Value::text("1")],
                vec![Value::text("Beatriz"), Value::text("2")],
                vec![Value::text("Cid"), Value::text("1")],
            ],
        )
    }

    #[test]
    fn renders_selected_rows_with_positions() {
        let out = render_rows(&table(), &[0, 2]);
        let lines: Vec<&str> = out.lines().filter(|l| l.contains("│")).collect();
        assert_eq!(lines.len(), 3, "header plus two rows:\n{out}");
        assert!(lines[0].contains("nome") && lines[0].contains("cpf"));
        assert!(lines[1].contains(" 0 ") && lines[1].contains("Ana"));
        assert!(lines[2].contains(" 2 ") && lines[2].contains("Cid"));
        assert!(!out.contains("Beatriz"));
    }

    #[test]
    fn empty_selection_renders_header_only() {
        let out = render_rows(&table(), &[]);
        assert!(out.contains("nome"));
        assert!(!out.contains("Ana"));
    }

    #[test]
    fn report_lists_only_failing_checks() {
        let report = DuplicateReport {
            cpf: vec![0, 2],
            pis: vec![],
        };
        let out = render_duplicate_report(&table(), &report);
        assert!(out.starts_with("Duplicated CPF rows:\n"));
        assert!(!out.contains("PIS"));
        assert!(out.contains("Resolve duplications before proceding"));
        assert_eq!(out.matches(RULE).count(), 1);
    }
}
