pub mod calendar_grid;
pub mod chart_series;
pub mod color;
pub mod reading;
