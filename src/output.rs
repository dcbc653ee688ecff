use crate::error::ReportError;
use crate::render::table_row;
use crate::util::Formatter;
use crate::view::ViewSnapshot;
use serde::Serialize;
use std::path::Path;

pub fn write_csv<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), ReportError> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Export the visible rows, in display order and display formatting.
pub fn export_csv(
    path: impl AsRef<Path>,
    snapshot: &ViewSnapshot<'_>,
    fmt: &Formatter,
) -> Result<usize, ReportError> {
    let rows: Vec<_> = snapshot.rows.iter().map(|r| table_row(r, fmt)).collect();
    write_csv(path, &rows)?;
    Ok(rows.len())
}
