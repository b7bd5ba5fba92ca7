//! Extracts one month of daily readings from a station's monthly table page.
//!
//! The page is expected to contain a `div.heading h1` whose text starts with
//! the station's location (`"Rome - ILAZIOCA17"`), and a table whose
//! `tr.ng-star-inserted` rows hold the date in cell 0, the high in cell 1 and
//! the low in cell 3. Cell 2 (the average) is ignored.

use crate::types::reading::Reading;
use indexmap::IndexMap;
use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use thiserror::Error;

static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.heading h1").expect("valid heading selector"));
static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid table selector"));
static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr.ng-star-inserted").expect("valid row selector"));
static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("valid cell selector"));

const DATE_CELL: usize = 0;
const HIGH_CELL: usize = 1;
const LOW_CELL: usize = 3;
const COUNTRY_SEPARATOR: &str = " - ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Station heading element not found")]
    MissingHeading,

    #[error("Readings table not found")]
    MissingTable,
}

/// What to do with a row whose high or low cell holds no number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnparseablePolicy {
    /// Drop the row and log a warning.
    #[default]
    Skip,
    /// Keep the row and read the missing value as 0.0 °F.
    ZeroFill,
}

/// The readings found on one monthly page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthPage {
    pub country: String,
    pub readings: IndexMap<String, Reading>,
}

/// Parses a monthly table page.
///
/// Rows with a blank date, high or low cell, or with fewer than four cells,
/// are ignored. Rows repeating a date overwrite the earlier one. A page with a
/// table but no matching rows yields an empty [`MonthPage`].
pub fn parse_month_page(document: &str, policy: UnparseablePolicy) -> Result<MonthPage, PageError> {
    let html = Html::parse_document(document);

    let heading = html
        .select(&HEADING)
        .next()
        .ok_or(PageError::MissingHeading)?;
    let country = country_from_heading(&heading.text().collect::<String>());

    if html.select(&TABLE).next().is_none() {
        return Err(PageError::MissingTable);
    }

    let mut readings = IndexMap::new();
    for row in html.select(&ROW) {
        let cells: Vec<String> = row.select(&CELL).map(element_text).collect();
        let (Some(date), Some(high), Some(low)) =
            (cells.get(DATE_CELL), cells.get(HIGH_CELL), cells.get(LOW_CELL))
        else {
            continue;
        };
        if date.is_empty() || high.is_empty() || low.is_empty() {
            continue;
        }

        let reading = match (leading_number(high), leading_number(low), policy) {
            (Some(high), Some(low), _) => Reading::new(high, low),
            (high, low, UnparseablePolicy::ZeroFill) => {
                Reading::new(high.unwrap_or(0.0), low.unwrap_or(0.0))
            }
            (_, _, UnparseablePolicy::Skip) => {
                warn!(
                    "Skipping row for {} with unreadable temperatures (high '{}', low '{}')",
                    date, high, low
                );
                continue;
            }
        };
        if reading.high < reading.low {
            debug!("Reading for {} has high below low: {:?}", date, reading);
        }
        readings.insert(date.clone(), reading);
    }

    debug!("Parsed {} readings for '{}'", readings.len(), country);
    Ok(MonthPage { country, readings })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// The heading text before the first `" - "`, or the whole heading, trimmed.
///
/// The separator is looked up in the raw text, so surrounding whitespace can
/// complete it: `"Rome - "` gives `"Rome"`.
pub fn country_from_heading(heading: &str) -> String {
    match heading.find(COUNTRY_SEPARATOR) {
        Some(pos) => heading[..pos].trim().to_string(),
        None => heading.trim().to_string(),
    }
}

/// Reads the longest numeric prefix of `text`, e.g. `"45.3 °F"` gives 45.3.
///
/// Returns `None` when the text does not start with a number.
pub fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
            + start
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_end = digits_from(end);
    let mut mantissa_digits = integer_end - end;
    end = integer_end;

    if bytes.get(end) == Some(&b'.') {
        let fraction_end = digits_from(end + 1);
        mantissa_digits += fraction_end - (end + 1);
        end = fraction_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_start = end + 1;
        if matches!(bytes.get(exponent_start), Some(b'+' | b'-')) {
            exponent_start += 1;
        }
        let exponent_end = digits_from(exponent_start);
        if exponent_end > exponent_start {
            end = exponent_end;
        }
    }

    text[..end].parse().ok()
}
