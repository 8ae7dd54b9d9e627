use chrono::{Duration, NaiveDate};

use super::columns::{ColumnMap, ColumnRole};
use super::csv_import::{generated_id, parse_date, REVIEWED_STATUS, UNASSIGNED};
use crate::error::{GanttError, Result};
use crate::model::task::TASK_COLORS;
use crate::model::Task;

/// Date span synthesized for rows whose date cells could not be resolved.
/// Which policy applies is decided by the import entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateDefaults {
    /// start = today, end = start + 7 days.
    Loose,
    /// start = today - 30 days, end = start + 10 days.
    LegacyWide,
}

impl DateDefaults {
    fn start(self, today: NaiveDate) -> NaiveDate {
        match self {
            DateDefaults::Loose => today,
            DateDefaults::LegacyWide => today - Duration::days(30),
        }
    }

    fn end(self, start: NaiveDate) -> NaiveDate {
        match self {
            DateDefaults::Loose => start + Duration::days(7),
            DateDefaults::LegacyWide => start + Duration::days(10),
        }
    }
}

fn resolve_date(
    cell: Option<&str>,
    line: usize,
    what: &str,
    default: NaiveDate,
) -> Result<NaiveDate> {
    match cell {
        None => Ok(default),
        Some(raw) => parse_date(raw).ok_or_else(|| GanttError::Row {
            row: line,
            message: format!("invalid {} date '{}'", what, raw),
        }),
    }
}

fn parse_row(
    map: &ColumnMap,
    row: &[String],
    line: usize,
    count: usize,
    defaults: DateDefaults,
    today: NaiveDate,
) -> Result<Task> {
    let description = map
        .cell(ColumnRole::Description, row)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Task {}", count + 1));
    let owner = map
        .cell(ColumnRole::AssignTo, row)
        .unwrap_or(UNASSIGNED)
        .to_string();
    let artifact_id = map
        .cell(ColumnRole::ArtifactId, row)
        .map(str::to_string)
        .unwrap_or_else(|| generated_id(count));

    let start = resolve_date(
        map.cell(ColumnRole::StartDate, row),
        line,
        "start",
        defaults.start(today),
    )?;
    let end = resolve_date(map.cell(ColumnRole::EndDate, row), line, "end", defaults.end(start))?;

    let progress = match map.cell(ColumnRole::Progress, row) {
        Some(raw) => raw
            .trim_end_matches('%')
            .parse::<f32>()
            .map_err(|_| GanttError::Row {
                row: line,
                message: format!("invalid progress '{}'", raw),
            })?,
        None => 0.0,
    };

    let task =
        Task::new(owner, artifact_id, description, start, end, progress).map_err(|e| {
            GanttError::Row {
                row: line,
                message: e.to_string(),
            }
        })?;
    Ok(task.with_color(TASK_COLORS[count % TASK_COLORS.len()]))
}

/// Import tasks from already-decoded sheet cells with unpredictable column
/// names. Columns are resolved heuristically, rows with status "Reviewed"
/// are excluded, and unusable rows are skipped with a logged diagnostic.
/// Returns `(tasks, skipped_count)`.
pub fn import_sheet(
    headers: &[String],
    rows: &[Vec<String>],
    defaults: DateDefaults,
) -> (Vec<Task>, usize) {
    let map = ColumnMap::identify(headers);
    let today = chrono::Local::now().date_naive();

    let mut tasks: Vec<Task> = Vec::new();
    let mut skipped = 0usize;

    for (i, row) in rows.iter().enumerate() {
        // Header is line 1 in the source sheet.
        let line = i + 2;

        if map.cell(ColumnRole::Status, row) == Some(REVIEWED_STATUS) {
            skipped += 1;
            continue;
        }

        match parse_row(&map, row, line, tasks.len(), defaults, today) {
            Ok(task) => tasks.push(task),
            Err(e) => {
                log::warn!("skipping sheet row {}: {}", line, e);
                skipped += 1;
            }
        }
    }

    (tasks, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(row: &[&str]) -> Vec<String> {
        row.iter().map(|s| s.to_string()).collect()
    }

    fn tracker_headers() -> Vec<String> {
        strings(&[
            "Task Name",
            "Owner",
            "Expected Start Date",
            "Expected End Date",
            "Status",
        ])
    }

    #[test]
    fn imports_rows_through_the_column_heuristic() {
        let rows = vec![
            strings(&["Design", "alice", "2025-05-01", "2025-05-08", "Open"]),
            strings(&["Build", "bob", "2025-05-05", "2025-05-20", "Open"]),
        ];
        let (tasks, skipped) = import_sheet(&tracker_headers(), &rows, DateDefaults::Loose);
        assert_eq!(skipped, 0);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].description, "Design");
        assert_eq!(tasks[0].owner, "alice");
        assert_eq!(tasks[1].end(), NaiveDate::from_ymd_opt(2025, 5, 20).unwrap());
    }

    #[test]
    fn reviewed_rows_are_excluded() {
        let rows = vec![
            strings(&["Design", "alice", "2025-05-01", "2025-05-08", "Reviewed"]),
            strings(&["Build", "bob", "2025-05-05", "2025-05-20", "Open"]),
        ];
        let (tasks, skipped) = import_sheet(&tracker_headers(), &rows, DateDefaults::Loose);
        assert_eq!(skipped, 1);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "Build");
    }

    #[test]
    fn missing_cells_fall_back_to_defaults() {
        let rows = vec![strings(&["Design", "", "", "", ""])];
        let today = chrono::Local::now().date_naive();

        let (tasks, _) = import_sheet(&tracker_headers(), &rows, DateDefaults::Loose);
        assert_eq!(tasks[0].owner, UNASSIGNED);
        assert_eq!(tasks[0].artifact_id, "ID-0001");
        assert_eq!(tasks[0].start(), today);
        assert_eq!(tasks[0].end(), today + Duration::days(7));

        let (tasks, _) = import_sheet(&tracker_headers(), &rows, DateDefaults::LegacyWide);
        assert_eq!(tasks[0].start(), today - Duration::days(30));
        assert_eq!(tasks[0].end(), today - Duration::days(30) + Duration::days(10));
    }

    #[test]
    fn unrecognizable_headers_import_first_column_with_synthesized_dates() {
        let headers = strings(&["alpha", "beta"]);
        let rows = vec![
            strings(&["Design", "whatever"]),
            strings(&["Build", "whatever"]),
        ];
        let today = chrono::Local::now().date_naive();

        let (tasks, skipped) = import_sheet(&headers, &rows, DateDefaults::Loose);
        assert_eq!(skipped, 0);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].description, "Design");
        assert_eq!(tasks[1].description, "Build");
        assert_eq!(tasks[0].owner, UNASSIGNED);
        assert_eq!(tasks[0].artifact_id, "ID-0001");
        assert_eq!(tasks[0].start(), today);
        assert_eq!(tasks[0].end(), today + Duration::days(7));
    }

    #[test]
    fn unparsable_rows_are_skipped_not_fatal() {
        let rows = vec![
            strings(&["Design", "alice", "not a date", "2025-05-08", ""]),
            strings(&["Build", "bob", "2025-05-05", "2025-05-20", ""]),
        ];
        let (tasks, skipped) = import_sheet(&tracker_headers(), &rows, DateDefaults::Loose);
        assert_eq!(skipped, 1);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "Build");
    }

    #[test]
    fn generated_ids_count_imported_tasks_only() {
        let rows = vec![
            strings(&["A", "", "2025-05-01", "2025-05-02", "Reviewed"]),
            strings(&["B", "", "2025-05-01", "2025-05-02", ""]),
            strings(&["C", "", "2025-05-01", "2025-05-02", ""]),
        ];
        let (tasks, _) = import_sheet(&tracker_headers(), &rows, DateDefaults::Loose);
        assert_eq!(tasks[0].artifact_id, "ID-0001");
        assert_eq!(tasks[1].artifact_id, "ID-0002");
    }

    #[test]
    fn palette_colors_rotate_per_task() {
        let rows: Vec<Vec<String>> = (0..7)
            .map(|i| strings(&[&format!("T{}", i), "", "2025-05-01", "2025-05-02", ""]))
            .collect();
        let (tasks, _) = import_sheet(&tracker_headers(), &rows, DateDefaults::Loose);
        assert_eq!(tasks[0].color, TASK_COLORS[0]);
        assert_eq!(tasks[5].color, TASK_COLORS[0]);
        assert_eq!(tasks[6].color, TASK_COLORS[1]);
    }

    #[test]
    fn progress_column_accepts_percent_suffix() {
        let headers = strings(&["Task", "Progress"]);
        let rows = vec![strings(&["Design", "60%"])];
        let (tasks, _) = import_sheet(&headers, &rows, DateDefaults::Loose);
        assert_eq!(tasks[0].progress(), 60.0);
    }
}
