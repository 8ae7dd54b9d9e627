use std::path::Path;

use crate::error::Result;
use crate::model::Task;

/// Canonical column order shared by export and import.
pub const CANONICAL_HEADERS: [&str; 8] = [
    "AssignTo",
    "ArtifactID",
    "Description",
    "Start",
    "End",
    "Duration",
    "Progress",
    "Dependencies",
];

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Export tasks to a comma-delimited CSV file in the canonical schema.
///
/// `Duration` is recomputed from the date span on every export; it is never
/// read back on import. Dependencies serialize as a comma-joined id list
/// (the csv writer quotes the cell). Returns the number of tasks written.
pub fn export_csv(tasks: &[Task], path: &Path) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(CANONICAL_HEADERS)?;
    for task in tasks {
        wtr.write_record([
            task.owner.clone(),
            task.artifact_id.clone(),
            task.description.clone(),
            task.start().format(DATE_FORMAT).to_string(),
            task.end().format(DATE_FORMAT).to_string(),
            task.duration().to_string(),
            task.progress().to_string(),
            task.dependencies.join(","),
        ])?;
    }

    wtr.flush()?;
    Ok(tasks.len())
}
