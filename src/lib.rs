//! Core of a Gantt chart tool: the task/chart data model, tabular
//! import/export, heuristic spreadsheet column mapping, and the pure layout
//! that turns dates and percentages into drawable geometry.
//!
//! Drawing itself is a collaborator's job: [`layout::layout`] produces
//! rectangles, labels and an axis domain in day/row units, and whatever
//! paints pixels consumes that record together with a [`config::FontConfig`].

pub mod config;
pub mod error;
pub mod io;
pub mod layout;
pub mod model;

pub use error::{GanttError, Result};
pub use model::{Chart, Task};
