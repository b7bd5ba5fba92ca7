use crate::types::reading::YearRecord;
use crate::weather_data::error::FetchError;
use crate::weather_data::parser::MonthPage;
use crate::weather_data::source::MonthlySource;
use futures_util::{stream, StreamExt, TryStreamExt};
use log::{debug, info, warn};

const MONTHS_PER_YEAR: u32 = 12;

/// Collects the twelve monthly pages of a year into one [`YearRecord`].
pub struct YearAggregator<S> {
    source: S,
    max_concurrent_fetches: usize,
}

impl<S: MonthlySource> YearAggregator<S> {
    /// Creates an aggregator that fetches months one after another.
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_concurrent_fetches: 1,
        }
    }

    /// Allows up to `limit` monthly fetches in flight at once (clamped to 1..=12).
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.clamp(1, MONTHS_PER_YEAR as usize);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches every month of `year` and merges the results.
    ///
    /// The record is built entirely in memory; if any month fails the whole
    /// build fails and nothing partial is returned. Pages are merged in month
    /// order whatever order they complete in.
    pub async fn build(&self, station: &str, year: i32) -> Result<YearRecord, FetchError> {
        let pages: Vec<MonthPage> = stream::iter(1..=MONTHS_PER_YEAR)
            .map(|month| self.source.fetch_month(station, year, month))
            .buffered(self.max_concurrent_fetches)
            .try_collect()
            .await?;

        let record = merge_months((1..=MONTHS_PER_YEAR).zip(pages));
        info!(
            "Aggregated {} readings over {} dates for station {} in {}",
            record.reading_count(),
            record.data.len(),
            station,
            year
        );
        Ok(record)
    }
}

/// Merges `(month, page)` pairs into a record, in iteration order.
///
/// Each reading lands in `data[date][month]`. The record's country is the last
/// non-empty page country; differing non-empty countries are logged.
pub fn merge_months(pages: impl IntoIterator<Item = (u32, MonthPage)>) -> YearRecord {
    let mut record = YearRecord::default();
    for (month, page) in pages {
        debug!("Month {} contributed {} readings", month, page.readings.len());
        if !page.country.is_empty() {
            if !record.country.is_empty() && record.country != page.country {
                warn!(
                    "Station location changed from '{}' to '{}' in month {}",
                    record.country, page.country, month
                );
            }
            record.country = page.country;
        }
        for (date, reading) in page.readings {
            record.insert(date, month, reading);
        }
    }
    record
}
