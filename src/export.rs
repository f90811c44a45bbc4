//! CSV export of the difference report

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::compare::ExportTable;
use crate::error::{ComparerError, Result};
use crate::logging::LogSink;

/// `<name>_<YYYYMMDDHHMMSS>.csv`
pub fn export_file_name(name: &str, at: NaiveDateTime) -> String {
    format!("{}_{}.csv", name, at.format("%Y%m%d%H%M%S"))
}

/// Write `table` as a timestamped CSV file inside `dir`.
///
/// A missing destination directory is an error. Any other write failure is
/// logged and reported as `Ok(None)`.
pub fn export_report(
    table: &ExportTable,
    dir: &Path,
    name: &str,
    sink: LogSink<'_>,
) -> Result<Option<PathBuf>> {
    if !dir.is_dir() {
        sink.error(format_args!(
            "Export path {} does not exist or is not a directory",
            dir.display()
        ));
        return Err(ComparerError::ExportDirectory {
            path: dir.to_path_buf(),
        });
    }

    let path = dir.join(export_file_name(name, Local::now().naive_local()));
    match write_csv(table, &path) {
        Ok(()) => {
            sink.info(format_args!(
                "Exported {} rows to {}",
                table.rows.len(),
                path.display()
            ));
            Ok(Some(path))
        }
        Err(e) => {
            sink.error(format_args!("Failed to export to {}: {}", path.display(), e));
            Ok(None)
        }
    }
}

fn write_csv(table: &ExportTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
