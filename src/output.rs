// src/output.rs
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write aligned curves as CSV columns, one row per sample
///
/// Every column must have the same length as `headers` has entries.
pub fn write_curves_to_csv<P: AsRef<Path>>(
    filename: P,
    headers: &[&str],
    columns: &[&[f64]],
) -> io::Result<()> {
    if headers.len() != columns.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} headers for {} columns", headers.len(), columns.len()),
        ));
    }
    let rows = columns.first().map_or(0, |c| c.len());
    if let Some(bad) = columns.iter().position(|c| c.len() != rows) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("column '{}' has {} rows, expected {}", headers[bad], columns[bad].len(), rows),
        ));
    }

    let mut file = BufWriter::new(File::create(filename)?);
    writeln!(file, "{}", headers.join(","))?;
    for row in 0..rows {
        let line: Vec<String> = columns.iter().map(|c| c[row].to_string()).collect();
        writeln!(file, "{}", line.join(","))?;
    }
    file.flush()
}

pub fn write_summary_to_csv<P: AsRef<Path>>(filename: P, summary_data: &[(&str, &str)]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    file.flush()
}
