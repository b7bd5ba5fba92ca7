mod calendar;
mod config;
mod error;
mod transform;
mod types;
mod utils;
mod views;
mod weather_data;

pub use calendar::*;
pub use config::*;
pub use error::CalendarError;

pub use types::calendar_grid::*;
pub use types::chart_series::ChartSeries;
pub use types::color::*;
pub use types::reading::*;

pub use transform::units::{round_tenth, to_celsius, to_fahrenheit};
pub use views::chart::chart_series;
pub use views::grid::{date_label, days_in_month, presentation_grid};

pub use weather_data::aggregator::{merge_months, YearAggregator};
pub use weather_data::error::{FetchError, StorageError};
pub use weather_data::parser::{
    country_from_heading, leading_number, parse_month_page, MonthPage, PageError,
    UnparseablePolicy,
};
pub use weather_data::record_cache::RecordCache;
pub use weather_data::record_loader::RecordLoader;
pub use weather_data::source::{MonthlySource, WundergroundSource};
