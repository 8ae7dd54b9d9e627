use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::Task;
use crate::error::Result;
use crate::io;

/// An ordered collection of tasks plus title metadata.
///
/// Insertion order is the render order: the first task added draws at the
/// top of the chart. Tasks are not deduplicated by artifact id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub tasks: Vec<Task>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Chart {
    fn default() -> Self {
        Self {
            title: "Project Timeline".to_string(),
            tasks: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Chart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Append a task at the bottom of the chart.
    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
        self.touch();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    /// Stable-sort tasks by owner. The legacy wide import applies this
    /// automatically; it is also useful on its own.
    pub fn sort_by_owner(&mut self) {
        self.tasks.sort_by(|a, b| a.owner.cmp(&b.owner));
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Export tasks to the canonical CSV schema. Returns the number of
    /// tasks written.
    pub fn export_csv(&self, path: &Path) -> Result<usize> {
        io::csv_export::export_csv(&self.tasks, path)
    }

    /// Replace the task list with the contents of a canonical CSV file.
    ///
    /// The file is parsed in full before the chart is touched: a file-level
    /// failure leaves the previous tasks intact. Returns the number of rows
    /// skipped (unparsable rows and rows whose status is "Reviewed").
    pub fn load_from_csv(&mut self, path: &Path) -> Result<usize> {
        let (tasks, skipped) = io::csv_import::import_csv(path)?;
        self.tasks = tasks;
        self.touch();
        Ok(skipped)
    }

    /// Replace the task list from a loosely-structured sheet (arbitrary
    /// column names, resolved heuristically). Rows missing dates default to
    /// today through today + 7 days.
    pub fn load_from_sheet(&mut self, headers: &[String], rows: &[Vec<String>]) -> Result<usize> {
        let (tasks, skipped) = io::sheet::import_sheet(headers, rows, io::sheet::DateDefaults::Loose);
        self.tasks = tasks;
        self.touch();
        Ok(skipped)
    }

    /// Legacy wide-sheet import: same column resolution as
    /// [`Chart::load_from_sheet`] but rows missing dates default to a span
    /// starting 30 days ago, and the result is sorted by owner.
    pub fn load_from_wide_sheet(
        &mut self,
        headers: &[String],
        rows: &[Vec<String>],
    ) -> Result<usize> {
        let (tasks, skipped) =
            io::sheet::import_sheet(headers, rows, io::sheet::DateDefaults::LegacyWide);
        self.tasks = tasks;
        self.sort_by_owner();
        self.touch();
        Ok(skipped)
    }
}
