use crate::types::reading::Reading;
use crate::weather_data::error::FetchError;
use crate::weather_data::parser::{MonthPage, PageError};
use crate::weather_data::source::MonthlySource;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory [`MonthlySource`] that counts calls. Months without a page are empty.
#[derive(Default)]
pub struct StubSource {
    pages: HashMap<u32, MonthPage>,
    failing_month: Option<u32>,
    staggered: bool,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_month(mut self, month: u32, country: &str, rows: &[(&str, f64, f64)]) -> Self {
        let page = self.pages.entry(month).or_default();
        page.country = country.to_string();
        for (date, high, low) in rows {
            page.readings.insert(date.to_string(), Reading::new(*high, *low));
        }
        self
    }

    pub fn failing_on(mut self, month: u32) -> Self {
        self.failing_month = Some(month);
        self
    }

    /// Makes earlier months answer more slowly than later ones.
    pub fn staggered(mut self) -> Self {
        self.staggered = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl MonthlySource for StubSource {
    async fn fetch_month(
        &self,
        station: &str,
        year: i32,
        month: u32,
    ) -> Result<MonthPage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if self.staggered {
            tokio::time::sleep(Duration::from_millis(u64::from(13 - month) * 5)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_month == Some(month) {
            return Err(FetchError::Page {
                station: station.to_string(),
                year,
                month,
                source: PageError::MissingTable,
            });
        }
        Ok(self.pages.get(&month).cloned().unwrap_or_default())
    }
}
