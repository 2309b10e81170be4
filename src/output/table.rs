use super::*;
use std::io::Write;

/// Width of the rule printed under each report title.
pub const RULE_WIDTH: usize = 80;

/// Writes reports to a terminal as plain aligned tables.
pub struct ConsoleTable<W: Write> {
    out: W,
}

impl<W: Write> ConsoleTable<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> OutputGenerator for ConsoleTable<W> {
    fn generate(&mut self, report: &Report) -> Result<()> {
        writeln!(self.out, "{}", report.title)?;
        writeln!(self.out, "{}", "*".repeat(RULE_WIDTH))?;
        write!(self.out, "{}", render(report))?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Header, dashed underline, then rows; two spaces between columns.
pub fn render(report: &Report) -> String {
    let mut widths: Vec<usize> = report.headers().map(|h| h.chars().count()).collect();
    for row in &report.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();

    let header: Vec<String> = report.headers().map(str::to_string).collect();
    push_line(&mut out, &report.columns, &widths, &header);

    let underline: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &report.columns, &widths, &underline);

    for row in &report.rows {
        push_line(&mut out, &report.columns, &widths, row);
    }

    out
}

fn push_line(out: &mut String, columns: &[Column], widths: &[usize], cells: &[String]) {
    let line = columns
        .iter()
        .zip(widths)
        .zip(cells)
        .map(|((column, width), cell)| pad(cell, *width, column.align))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.chars().count()));
    match align {
        Align::Left => format!("{cell}{fill}"),
        Align::Right => format!("{fill}{cell}"),
    }
}
