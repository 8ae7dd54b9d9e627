//! Pure timeline layout: turns a task sequence into drawable geometry.
//!
//! Horizontal positions are expressed in days from the axis minimum,
//! vertical positions in row units. The drawing collaborator multiplies by
//! its own pixel scale and paints; nothing here touches a canvas.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::task::PROGRESS_COLOR;
use crate::model::Task;

/// Bar thickness in row units; rows are one unit apart, leaving a fixed
/// half-height gap above and below each bar.
const BAR_HEIGHT: f32 = 0.8;
const BAR_HALF_HEIGHT: f32 = BAR_HEIGHT / 2.0;

/// Knobs for tick generation and date label text.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Days between axis tick labels.
    pub tick_interval_days: i64,
    /// strftime-style format for tick and bar date labels.
    pub date_format: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            tick_interval_days: 5,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

/// An axis-aligned rectangle in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Date span covered by the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisDomain {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

/// One labeled tick on the horizontal axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    /// Days from the axis minimum.
    pub offset_days: f32,
    pub label: String,
}

/// Geometry for one task row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskBar {
    /// 0-based position in the task sequence; row 0 is topmost.
    pub row: usize,
    /// Bar rectangle. `x` is days from the axis minimum, `y` the bottom
    /// edge in row units.
    pub bar: Rect,
    /// Hex color for the bar fill.
    pub color: String,
    /// Progress overlay inset over the bar; absent at 0% progress.
    pub progress: Option<Rect>,
    /// Row label, "owner-artifact_id".
    pub label: String,
    /// The task's description, drawn inside the bar at its left edge.
    pub description: String,
    /// Date text anchored at the bar's left edge.
    pub start_label: String,
    /// Date text anchored at the bar's right edge.
    pub end_label: String,
}

/// Full geometry for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub axis: AxisDomain,
    pub ticks: Vec<Tick>,
    pub bars: Vec<TaskBar>,
    /// Hex fill for every progress overlay rectangle.
    pub progress_color: String,
}

/// Compute drawable geometry for a task sequence.
///
/// Stateless and deterministic: the same tasks yield identical geometry on
/// every call. Returns `None` for an empty sequence, which renders as a
/// no-op.
pub fn layout(tasks: &[Task], options: &LayoutOptions) -> Option<ChartLayout> {
    let min = tasks.iter().map(Task::start).min()?;
    let max = tasks.iter().map(Task::end).max()?;

    let count = tasks.len();
    let bars = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            // First-inserted task sits at the top of the chart.
            let y_center = (count - i) as f32;
            let x = (task.start() - min).num_days() as f32;
            let width = task.duration() as f32;

            let bar = Rect {
                x,
                y: y_center - BAR_HALF_HEIGHT,
                width,
                height: BAR_HEIGHT,
            };
            let progress = (task.progress() > 0.0).then(|| Rect {
                width: width * task.progress() / 100.0,
                ..bar
            });

            TaskBar {
                row: i,
                bar,
                color: task.color.clone(),
                progress,
                label: format!("{}-{}", task.owner, task.artifact_id),
                description: task.description.clone(),
                start_label: task.start().format(&options.date_format).to_string(),
                end_label: task.end().format(&options.date_format).to_string(),
            }
        })
        .collect();

    let mut ticks = Vec::new();
    let mut offset = 0i64;
    let span = (max - min).num_days();
    while offset <= span {
        let date = min + chrono::Duration::days(offset);
        ticks.push(Tick {
            offset_days: offset as f32,
            label: date.format(&options.date_format).to_string(),
        });
        offset += options.tick_interval_days.max(1);
    }

    Some(ChartLayout {
        axis: AxisDomain { min, max },
        ticks,
        bars,
        progress_color: PROGRESS_COLOR.to_string(),
    })
}
