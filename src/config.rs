//! Client configuration.

use crate::types::color::ColorScale;
use crate::weather_data::parser::UnparseablePolicy;
use bon::Builder;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.wunderground.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for a [`crate::StationCalendar`].
///
/// # Examples
///
/// ```
/// use pws_calendar::{CalendarConfig, UnparseablePolicy};
/// use std::time::Duration;
///
/// let config = CalendarConfig::builder()
///     .request_timeout(Duration::from_secs(10))
///     .max_concurrent_fetches(4)
///     .unparseable_policy(UnparseablePolicy::ZeroFill)
///     .build();
/// assert_eq!(config.base_url, "https://www.wunderground.com");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct CalendarConfig {
    /// Scheme and host of the monthly table pages.
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,

    /// Upper bound for each monthly page request.
    #[builder(default = DEFAULT_REQUEST_TIMEOUT)]
    pub request_timeout: Duration,

    /// How many of the twelve monthly pages may be in flight at once.
    /// 1 fetches strictly one after another. Clamped to 1..=12.
    #[builder(default = 1)]
    pub max_concurrent_fetches: usize,

    #[builder(default)]
    pub unparseable_policy: UnparseablePolicy,

    /// Gradient used to shade calendar cells.
    #[builder(default)]
    pub color_scale: ColorScale,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
