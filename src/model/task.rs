use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{GanttError, Result};

/// Default bar color when a task does not carry one.
pub const DEFAULT_COLOR: &str = "#4287f5";

/// Color of the progress overlay drawn on top of a task bar.
pub const PROGRESS_COLOR: &str = "#50C878";

/// Rotating palette used for tasks imported without an explicit color.
pub const TASK_COLORS: &[&str] = &["#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7"];

/// A single task on the timeline.
///
/// Construction through [`Task::new`] is the validation gate: the date span
/// and progress invariants hold for every live `Task`, and the setters that
/// touch those fields re-run the same checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    /// Responsible party; imports fall back to `"unassigned"`.
    pub owner: String,
    /// External identifier, e.g. "TASK-001". Not required to be unique.
    pub artifact_id: String,
    /// Label shown on the bar.
    pub description: String,
    start: NaiveDate,
    end: NaiveDate,
    /// Completion percentage, 0-100.
    progress: f32,
    /// Display color as hex text, e.g. "#4287f5".
    pub color: String,
    /// Artifact ids of tasks this one depends on. Stored verbatim, never
    /// resolved against the chart.
    pub dependencies: Vec<String>,
    /// Child tasks, exclusively owned by this one.
    pub subtasks: Vec<Task>,
}

impl Task {
    /// Create a validated task.
    ///
    /// Fails with [`GanttError::InvalidDateRange`] when `end < start` and
    /// with [`GanttError::InvalidProgress`] when `progress` is outside 0-100.
    pub fn new(
        owner: impl Into<String>,
        artifact_id: impl Into<String>,
        description: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        progress: f32,
    ) -> Result<Self> {
        validate_dates(start, end)?;
        validate_progress(progress)?;
        Ok(Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            artifact_id: artifact_id.into(),
            description: description.into(),
            start,
            end,
            progress,
            color: DEFAULT_COLOR.to_string(),
            dependencies: Vec::new(),
            subtasks: Vec::new(),
        })
    }

    /// Builder-style color override.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Builder-style dependency list override.
    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Move the task to a new date span, re-checking the date invariant.
    pub fn set_dates(&mut self, start: NaiveDate, end: NaiveDate) -> Result<()> {
        validate_dates(start, end)?;
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Update progress, re-checking the 0-100 invariant.
    pub fn set_progress(&mut self, progress: f32) -> Result<()> {
        validate_progress(progress)?;
        self.progress = progress;
        Ok(())
    }

    /// Append a child task.
    pub fn add_subtask(&mut self, task: Task) {
        self.subtasks.push(task);
    }

    /// Duration in days, floored at 1: a task starting and ending on the
    /// same day still occupies one day of axis width.
    pub fn duration(&self) -> i64 {
        (self.end - self.start).num_days().max(1)
    }
}

fn validate_dates(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end < start {
        return Err(GanttError::InvalidDateRange { start, end });
    }
    Ok(())
}

fn validate_progress(progress: f32) -> Result<()> {
    if !(0.0..=100.0).contains(&progress) {
        return Err(GanttError::InvalidProgress(progress));
    }
    Ok(())
}
