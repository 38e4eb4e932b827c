use crate::db::{schema::Table, types::Record};

/// Renders records as an aligned text table, columns in schema order
pub fn render_records(columns: &[String], records: &[Record]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| record.get(c).map(|v| v.to_string()).unwrap_or_default())
                .collect()
        })
        .collect();
    render_table(columns, &rows)
}

/// Renders a table schema for the `info` command
pub fn render_schema(table: &Table) -> String {
    let header = ["column".to_string(), "type".to_string()];
    let rows: Vec<Vec<String>> = table
        .columns
        .iter()
        .map(|c| vec![c.name.clone(), c.datatype.tag().to_string()])
        .collect();
    format!("table {}\n{}", table.name, render_table(&header, &rows))
}

/// Renders a header and rows with per-column width alignment
fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    push_row(&mut out, header, &widths);
    push_separator(&mut out, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    for (cell, width) in cells.iter().zip(widths) {
        out.push_str("| ");
        out.push_str(cell);
        out.push_str(&" ".repeat(width - cell.len() + 1));
    }
    out.push_str("|\n");
}

fn push_separator(out: &mut String, widths: &[usize]) {
    for width in widths {
        out.push('+');
        out.push_str(&"-".repeat(width + 2));
    }
    out.push_str("+\n");
}
