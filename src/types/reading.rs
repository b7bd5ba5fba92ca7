//! Defines the normalized year record produced by aggregation and stored in the cache.
//!
//! The serialized form of [`YearRecord`] is also the on-disk cache format:
//!
//! ```json
//! {"country": "Rome", "data": {"2/1/2023": {"2": {"high": 50.0, "low": 32.0}}}}
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

/// A single day's temperature extremes, in degrees Fahrenheit as published by the source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub high: f64,
    pub low: f64,
}

impl Reading {
    pub fn new(high: f64, low: f64) -> Self {
        Self { high, low }
    }
}

/// Readings for one date label, keyed by the month whose page reported them.
pub type MonthReadings = BTreeMap<u32, Reading>;

/// One station's readings for a whole year.
///
/// `data` keeps dates in the order they were merged; months inside a date are
/// ascending. A date maps to at most one [`Reading`] per month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    #[serde(default)]
    pub country: String,
    #[serde(default, deserialize_with = "deserialize_data")]
    pub data: IndexMap<String, MonthReadings>,
}

impl YearRecord {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            data: IndexMap::new(),
        }
    }

    /// Stores `reading` under `date`/`month`, replacing any earlier reading for that slot.
    pub fn insert(&mut self, date: impl Into<String>, month: u32, reading: Reading) {
        self.data
            .entry(date.into())
            .or_default()
            .insert(month, reading);
    }

    pub fn reading(&self, date: &str, month: u32) -> Option<&Reading> {
        self.data.get(date).and_then(|months| months.get(&month))
    }

    /// Total number of (date, month) readings.
    pub fn reading_count(&self) -> usize {
        self.data.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.data.values().all(BTreeMap::is_empty)
    }

    /// Iterates `(date, month, reading)` in record order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32, &Reading)> {
        self.data.iter().flat_map(|(date, months)| {
            months
                .iter()
                .map(move |(month, reading)| (date.as_str(), *month, reading))
        })
    }
}

// Older cache files encode an empty `data` object as `[]`.
fn deserialize_data<'de, D>(deserializer: D) -> Result<IndexMap<String, MonthReadings>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DataRepr {
        Map(IndexMap<String, MonthReadings>),
        EmptyList([(); 0]),
    }

    Ok(match DataRepr::deserialize(deserializer)? {
        DataRepr::Map(map) => map,
        DataRepr::EmptyList(_) => IndexMap::new(),
    })
}

/// Cache address: one record per station and year.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationYear {
    pub station: String,
    pub year: i32,
}

impl StationYear {
    pub fn new(station: impl Into<String>, year: i32) -> Self {
        Self {
            station: station.into(),
            year,
        }
    }
}

impl Display for StationYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:04}", self.station, self.year)
    }
}
