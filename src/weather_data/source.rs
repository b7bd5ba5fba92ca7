use crate::weather_data::error::FetchError;
use crate::weather_data::parser::{parse_month_page, MonthPage, UnparseablePolicy};
use log::{info, warn};
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Something that can produce one month of readings for a station.
///
/// [`WundergroundSource`] is the production implementation; tests substitute
/// in-memory stubs.
pub trait MonthlySource {
    fn fetch_month(
        &self,
        station: &str,
        year: i32,
        month: u32,
    ) -> impl Future<Output = Result<MonthPage, FetchError>> + Send;
}

impl<T: MonthlySource> MonthlySource for Arc<T> {
    fn fetch_month(
        &self,
        station: &str,
        year: i32,
        month: u32,
    ) -> impl Future<Output = Result<MonthPage, FetchError>> + Send {
        (**self).fetch_month(station, year, month)
    }
}

/// Fetches the public monthly table page of a personal weather station.
#[derive(Debug, Clone)]
pub struct WundergroundSource {
    client: Client,
    base_url: String,
    policy: UnparseablePolicy,
}

impl WundergroundSource {
    /// Builds a source with its own HTTP client. Every request is bounded by `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        policy: UnparseablePolicy,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            policy,
        })
    }

    pub fn month_url(&self, station: &str, year: i32, month: u32) -> String {
        format!(
            "{}/dashboard/pws/{station}/table/{year}-{month}-1/{year}-{month}-1/monthly",
            self.base_url.trim_end_matches('/')
        )
    }

    async fn download(&self, url: &str) -> Result<String, FetchError> {
        info!("Downloading data from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e, FetchError::NetworkRequest))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(match e.status() {
                    Some(status) => FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    },
                    None => FetchError::NetworkRequest(url.to_string(), e),
                });
            }
        };

        response
            .text()
            .await
            .map_err(|e| classify(url, e, FetchError::Body))
    }
}

fn classify(
    url: &str,
    error: reqwest::Error,
    otherwise: fn(String, reqwest::Error) -> FetchError,
) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(url.to_string(), error)
    } else {
        otherwise(url.to_string(), error)
    }
}

impl MonthlySource for WundergroundSource {
    async fn fetch_month(
        &self,
        station: &str,
        year: i32,
        month: u32,
    ) -> Result<MonthPage, FetchError> {
        let url = self.month_url(station, year, month);
        let document = self.download(&url).await?;
        parse_month_page(&document, self.policy).map_err(|source| FetchError::Page {
            station: station.to_string(),
            year,
            month,
            source,
        })
    }
}
