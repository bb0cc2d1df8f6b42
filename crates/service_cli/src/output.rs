//! Result rendering as an aligned table, JSON or CSV.

use serde::Serialize;
use std::io::Write;

use crate::config::OutputFormat;
use crate::Result;

/// A flat, serialisable result row.
///
/// Field order of the `Serialize` derive must match [`TableRow::headers`];
/// CSV headers come from the field names.
pub trait TableRow: Serialize {
    /// Column headers for table output.
    fn headers() -> &'static [&'static str];

    /// Cell text for table output.
    fn cells(&self) -> Vec<String>;
}

/// Format a number for table output.
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || (1e-4..1e7).contains(&magnitude) {
        format!("{:.6}", value)
    } else if value.is_finite() {
        format!("{:.6e}", value)
    } else {
        format!("{}", value)
    }
}

/// Render `rows` to `out` in the requested format.
pub fn render<R, W>(format: OutputFormat, rows: &[R], out: &mut W) -> Result<()>
where
    R: TableRow,
    W: Write,
{
    match format {
        OutputFormat::Table => render_table(rows, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
            Ok(())
        }
    }
}

fn render_table<R: TableRow, W: Write>(rows: &[R], out: &mut W) -> Result<()> {
    let headers = R::headers();
    let cells: Vec<Vec<String>> = rows.iter().map(TableRow::cells).collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = |left: &str, mid: &str, right: &str| {
        let inner: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, inner.join(mid), right)
    };
    let line = |values: &[String]| {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let value = values.get(i).map(String::as_str).unwrap_or("");
                format!(" {:>width$} ", value, width = w)
            })
            .collect();
        format!("│{}│", padded.join("│"))
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    writeln!(out, "{}", rule("┌", "┬", "┐"))?;
    writeln!(out, "{}", line(&header_cells))?;
    writeln!(out, "{}", rule("├", "┼", "┤"))?;
    for row in &cells {
        writeln!(out, "{}", line(row))?;
    }
    writeln!(out, "{}", rule("└", "┴", "┘"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        x: f64,
        label: String,
    }

    impl TableRow for Row {
        fn headers() -> &'static [&'static str] {
            &["x", "label"]
        }

        fn cells(&self) -> Vec<String> {
            vec![format_number(self.x), self.label.clone()]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                x: 1.5,
                label: "a".to_string(),
            },
            Row {
                x: -20.25,
                label: "long label".to_string(),
            },
        ]
    }

    fn rendered(format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        render(format, &rows(), &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0.000000");
        assert_eq!(format_number(3.880233), "3.880233");
        assert_eq!(format_number(1.5e-9), "1.500000e-9");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn test_table_output() {
        let text = rendered(OutputFormat::Table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with('┌'));
        assert!(lines[1].contains("label"));
        assert!(lines[4].contains("-20.250000"));
        assert!(lines[4].contains("long label"));
        // Every line has the same display width
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_json_output() {
        let value: serde_json::Value = serde_json::from_str(&rendered(OutputFormat::Json)).unwrap();
        assert_eq!(value[1]["x"], -20.25);
        assert_eq!(value[0]["label"], "a");
    }

    #[test]
    fn test_csv_output() {
        let text = rendered(OutputFormat::Csv);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["x,label", "1.5,a", "-20.25,long label"]);
    }
}
