use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use super::csv_export::CANONICAL_HEADERS;
use crate::error::{GanttError, Result};
use crate::model::Task;

/// Owner applied to rows that do not name one.
pub const UNASSIGNED: &str = "unassigned";

/// Rows carrying this status are excluded from every import path.
pub(crate) const REVIEWED_STATUS: &str = "Reviewed";

/// Try parsing a date string with several common formats.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in [
        "%Y-%m-%d",
        "%d/%m/%Y",
        "%m/%d/%Y",
        "%d-%m-%Y",
        "%d.%m.%Y",
        "%Y/%m/%d",
        "%m-%d-%Y",
    ] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Placeholder artifact id for rows that do not carry one, numbered from
/// the task's position in the import.
pub(crate) fn generated_id(index: usize) -> String {
    format!("ID-{:04}", index + 1)
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Positions of the canonical columns in one concrete file.
struct Columns {
    assign_to: Option<usize>,
    artifact_id: Option<usize>,
    description: Option<usize>,
    start: usize,
    end: usize,
    progress: Option<usize>,
    dependencies: Option<usize>,
    status: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let (start, end) = match (find("Start"), find("End")) {
            (Some(s), Some(e)) => (s, e),
            _ => {
                let found: Vec<&str> = headers.iter().collect();
                return Err(GanttError::Format(format!(
                    "missing Start/End columns, found headers: {:?}",
                    found
                )));
            }
        };

        Ok(Self {
            assign_to: find(CANONICAL_HEADERS[0]),
            artifact_id: find(CANONICAL_HEADERS[1]),
            description: find(CANONICAL_HEADERS[2]),
            start,
            end,
            progress: find(CANONICAL_HEADERS[6]),
            dependencies: find(CANONICAL_HEADERS[7]),
            // Not part of the canonical schema, honored when present.
            status: find("Status"),
        })
    }

    /// Non-empty trimmed cell at an optional column position.
    fn cell<'a>(&self, idx: Option<usize>, record: &'a StringRecord) -> Option<&'a str> {
        idx.and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn parse_row(columns: &Columns, record: &StringRecord, line: usize, count: usize) -> Result<Task> {
    let date_cell = |idx: usize, what: &str| -> Result<NaiveDate> {
        let raw = record.get(idx).map(str::trim).unwrap_or("");
        parse_date(raw).ok_or_else(|| GanttError::Row {
            row: line,
            message: format!("invalid {} date '{}'", what, raw),
        })
    };

    let start = date_cell(columns.start, "start")?;
    let end = date_cell(columns.end, "end")?;

    let progress = match columns.cell(columns.progress, record) {
        Some(raw) => raw.parse::<f32>().map_err(|_| GanttError::Row {
            row: line,
            message: format!("invalid progress '{}'", raw),
        })?,
        None => 0.0,
    };

    let owner = columns
        .cell(columns.assign_to, record)
        .unwrap_or(UNASSIGNED)
        .to_string();
    let artifact_id = columns
        .cell(columns.artifact_id, record)
        .map(str::to_string)
        .unwrap_or_else(|| generated_id(count));
    let description = columns
        .cell(columns.description, record)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Task {}", count + 1));

    let dependencies: Vec<String> = columns
        .cell(columns.dependencies, record)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let task = Task::new(owner, artifact_id, description, start, end, progress).map_err(|e| {
        GanttError::Row {
            row: line,
            message: e.to_string(),
        }
    })?;
    Ok(task.with_dependencies(dependencies))
}

/// Import tasks from a canonical-schema CSV file.
///
/// The delimiter is auto-detected (comma, semicolon, tab). The `Start` and
/// `End` headers are required; everything else falls back to construction
/// defaults. Unusable rows and rows whose `Status` is "Reviewed" are
/// skipped, not fatal. Returns `(tasks, skipped_count)`.
pub fn import_csv(path: &Path) -> Result<(Vec<Task>, usize)> {
    if !path.exists() {
        return Err(GanttError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;

    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = Columns::locate(&headers)?;

    let mut tasks: Vec<Task> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let line = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("skipping CSV row {}: {}", line, e);
                skipped += 1;
                continue;
            }
        };

        if columns.cell(columns.status, &record) == Some(REVIEWED_STATUS) {
            skipped += 1;
            continue;
        }

        match parse_row(&columns, &record, line, tasks.len()) {
            Ok(task) => tasks.push(task),
            Err(e) => {
                log::warn!("skipping CSV row {}: {}", line, e);
                skipped += 1;
            }
        }
    }

    Ok((tasks, skipped))
}
