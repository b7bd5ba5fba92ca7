//! Defines the day × month grid handed to the rendering layer.

use crate::types::color::HexColor;
use serde::Serialize;

/// A rounded Celsius value paired with the background color computed for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadedValue {
    pub celsius: f64,
    pub color: HexColor,
}

/// The content of one (day, month) slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridCell {
    /// The day does not exist in this month (e.g. February 30th).
    Blank,
    /// A valid calendar day with no reading in the record.
    NoData,
    Temperatures { high: ShadedValue, low: ShadedValue },
}

/// Header information for one month column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthColumn {
    pub month: u32,
    pub name: &'static str,
    pub days: u32,
}

/// One grid row: a day number and its twelve month cells, January first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub day: u32,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarGrid {
    pub year: i32,
    pub columns: Vec<MonthColumn>,
    pub rows: Vec<GridRow>,
}

impl CalendarGrid {
    /// Looks up a cell by 1-based day and month.
    pub fn cell(&self, day: u32, month: u32) -> Option<&GridCell> {
        let row = self.rows.get(day.checked_sub(1)? as usize)?;
        row.cells.get(month.checked_sub(1)? as usize)
    }
}
