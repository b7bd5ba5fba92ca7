//! Entry point for loading a station's yearly highs and lows and turning them
//! into chart series and a color-graded calendar.

use crate::config::CalendarConfig;
use crate::error::CalendarError;
use crate::types::calendar_grid::CalendarGrid;
use crate::types::chart_series::ChartSeries;
use crate::types::color::ColorScale;
use crate::types::reading::YearRecord;
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use crate::views::chart::chart_series;
use crate::views::grid::presentation_grid;
use crate::weather_data::aggregator::YearAggregator;
use crate::weather_data::record_loader::RecordLoader;
use crate::weather_data::source::{MonthlySource, WundergroundSource};
use bon::bon;
use chrono::{Datelike, Local};
use serde::Serialize;
use std::path::PathBuf;

/// Everything a station page shows: the primary year as a chart and a
/// calendar, plus a comparison year as a second chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub station: String,
    /// Location reported by the station for the primary year.
    pub country: String,
    pub year: i32,
    pub comparison_year: i32,
    pub primary: ChartSeries,
    pub comparison: ChartSeries,
    pub grid: CalendarGrid,
}

/// The main client.
///
/// Year records are cached on disk under the cache folder and only fetched
/// from the source on a miss or when a refresh is requested.
///
/// # Examples
///
/// ```rust,no_run
/// # use pws_calendar::{CalendarError, StationCalendar};
/// # async fn run() -> Result<(), CalendarError> {
/// let client = StationCalendar::new().await?;
/// let series = client
///     .chart_series()
///     .station("ILAZIOCA17")
///     .year(2023)
///     .call()
///     .await?;
/// println!("{} points", series.len());
/// # Ok(())
/// # }
/// ```
pub struct StationCalendar<S = WundergroundSource> {
    loader: RecordLoader<S>,
    color_scale: ColorScale,
}

impl StationCalendar<WundergroundSource> {
    /// Creates a client using the default cache directory
    /// (`<system cache dir>/pws_calendar_cache`) and default settings.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::CacheDirResolution`] if the system cache
    /// directory cannot be determined, or [`CalendarError::CacheDirCreation`]
    /// if it cannot be created.
    pub async fn new() -> Result<Self, CalendarError> {
        let cache_folder = get_cache_dir().map_err(CalendarError::CacheDirResolution)?;
        Self::with_cache_folder(cache_folder).await
    }

    /// Creates a client with default settings that caches under `cache_folder`.
    pub async fn with_cache_folder(cache_folder: PathBuf) -> Result<Self, CalendarError> {
        Self::with_config(cache_folder, CalendarConfig::default()).await
    }

    /// Creates a client that fetches from the configured base URL.
    pub async fn with_config(
        cache_folder: PathBuf,
        config: CalendarConfig,
    ) -> Result<Self, CalendarError> {
        let source = WundergroundSource::new(
            config.base_url.clone(),
            config.request_timeout,
            config.unparseable_policy,
        )
        .map_err(CalendarError::HttpClient)?;
        Self::with_source(cache_folder, source, config).await
    }
}

#[bon]
impl<S: MonthlySource> StationCalendar<S> {
    /// Creates a client backed by an arbitrary [`MonthlySource`].
    ///
    /// Only the concurrency limit and color scale of `config` apply here; the
    /// HTTP settings belong to the source.
    pub async fn with_source(
        cache_folder: PathBuf,
        source: S,
        config: CalendarConfig,
    ) -> Result<Self, CalendarError> {
        ensure_cache_dir_exists(&cache_folder)
            .await
            .map_err(|e| CalendarError::CacheDirCreation(cache_folder.clone(), e))?;
        let aggregator = YearAggregator::new(source).with_concurrency(config.max_concurrent_fetches);
        Ok(Self {
            loader: RecordLoader::new(&cache_folder, aggregator),
            color_scale: config.color_scale,
        })
    }

    pub fn color_scale(&self) -> &ColorScale {
        &self.color_scale
    }

    /// Loads the record for a station and year.
    ///
    /// Served from the cache when present. With `.force_refresh(true)` the
    /// cached record is deleted and rebuilt from the source first.
    #[builder]
    pub async fn year_record(
        &self,
        station: &str,
        year: i32,
        #[builder(default)] force_refresh: bool,
    ) -> Result<YearRecord, CalendarError> {
        if force_refresh {
            self.loader.refresh(station, year).await
        } else {
            self.loader.load(station, year).await
        }
    }

    /// Loads a year and flattens it into a Celsius chart series.
    #[builder]
    pub async fn chart_series(
        &self,
        station: &str,
        year: i32,
        #[builder(default)] force_refresh: bool,
    ) -> Result<ChartSeries, CalendarError> {
        let record = self
            .year_record()
            .station(station)
            .year(year)
            .force_refresh(force_refresh)
            .call()
            .await?;
        Ok(chart_series(&record, year))
    }

    /// Loads a year and lays it out as a 31 × 12 color-graded calendar.
    #[builder]
    pub async fn calendar_grid(
        &self,
        station: &str,
        year: i32,
        #[builder(default)] force_refresh: bool,
    ) -> Result<CalendarGrid, CalendarError> {
        let record = self
            .year_record()
            .station(station)
            .year(year)
            .force_refresh(force_refresh)
            .call()
            .await?;
        Ok(presentation_grid(&record, year, &self.color_scale))
    }

    /// Builds the full station view.
    ///
    /// * `.year(i32)`: Optional. Defaults to the current local year.
    /// * `.comparison_year(i32)`: Optional. Defaults to `year - 1` (saturating).
    /// * `.force_refresh(bool)`: Optional. Rebuilds the primary year only.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use pws_calendar::{CalendarError, StationCalendar};
    /// # async fn run() -> Result<(), CalendarError> {
    /// let client = StationCalendar::new().await?;
    /// let dashboard = client
    ///     .dashboard()
    ///     .station("ILAZIOCA17")
    ///     .year(2024)
    ///     .force_refresh(true)
    ///     .call()
    ///     .await?;
    /// assert_eq!(dashboard.comparison_year, 2023);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn dashboard(
        &self,
        station: &str,
        year: Option<i32>,
        comparison_year: Option<i32>,
        #[builder(default)] force_refresh: bool,
    ) -> Result<Dashboard, CalendarError> {
        let year = year.unwrap_or_else(|| Local::now().year());
        let comparison_year = comparison_year.unwrap_or_else(|| year.saturating_sub(1));

        let primary = self
            .year_record()
            .station(station)
            .year(year)
            .force_refresh(force_refresh)
            .call()
            .await?;
        let comparison = self
            .year_record()
            .station(station)
            .year(comparison_year)
            .call()
            .await?;

        Ok(Dashboard {
            station: station.to_string(),
            grid: presentation_grid(&primary, year, &self.color_scale),
            primary: chart_series(&primary, year),
            comparison: chart_series(&comparison, comparison_year),
            country: primary.country,
            year,
            comparison_year,
        })
    }

    /// Deletes the cached record for a station and year. Returns whether one existed.
    pub async fn invalidate(&self, station: &str, year: i32) -> Result<bool, CalendarError> {
        self.loader.invalidate(station, year).await
    }

    /// Stores `record` as the cached record for a station and year.
    pub async fn save(
        &self,
        station: &str,
        year: i32,
        record: &YearRecord,
    ) -> Result<(), CalendarError> {
        self.loader.save(station, year, record).await
    }
}
