pub mod chart;
pub mod task;

pub use chart::Chart;
pub use task::Task;
