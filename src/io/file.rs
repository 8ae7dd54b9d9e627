use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{GanttError, Result};
use crate::model::Chart;

/// Save a chart to a pretty-printed JSON project file, creating parent
/// directories as needed. Dates serialize as ISO text and round-trip.
pub fn save_project(chart: &Chart, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(chart)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a chart from a JSON project file.
pub fn load_project(path: &Path) -> Result<Chart> {
    if !path.exists() {
        return Err(GanttError::NotFound(path.to_path_buf()));
    }
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// The most recently modified files in a directory, newest first, capped at
/// `max`. A missing directory yields an empty list.
pub fn recent_files(dir: &Path, max: usize) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<(PathBuf, SystemTime)> = entries
        .flatten()
        .filter(|e| e.path().is_file())
        .filter_map(|e| {
            let modified = e.metadata().ok()?.modified().ok()?;
            Some((e.path(), modified))
        })
        .collect();

    files.sort_by(|a, b| b.1.cmp(&a.1));
    files.into_iter().take(max).map(|(p, _)| p).collect()
}

/// Per-user data directory for project files, when the platform exposes one.
pub fn default_project_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "gantt-core").map(|d| d.data_dir().to_path_buf())
}
