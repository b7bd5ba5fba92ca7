use crate::transform::units::{round_tenth, to_celsius};
use crate::types::calendar_grid::{CalendarGrid, GridCell, GridRow, MonthColumn, ShadedValue};
use crate::types::color::ColorScale;
use crate::types::reading::{Reading, YearRecord};
use chrono::{Datelike, Month, NaiveDate};

const MAX_DAYS: u32 = 31;
const MONTHS: u32 = 12;

/// Builds the label used as a record key: `month/day/year`, no zero padding.
pub fn date_label(year: i32, month: u32, day: u32) -> String {
    format!("{month}/{day}/{year}")
}

/// Number of days in a Gregorian month, or 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = match month {
        12 => year.checked_add(1).map(|next_year| (next_year, 1)),
        _ => month.checked_add(1).map(|next| (year, next)),
    };
    next_month
        .and_then(|(next_year, next)| NaiveDate::from_ymd_opt(next_year, next, 1))
        .and_then(|first_of_next| first_of_next.pred_opt())
        .filter(|last| last.month() == month)
        .map(|last| last.day())
        .unwrap_or(0)
}

fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("")
}

/// Builds the 31 × 12 presentation grid for `year`.
///
/// Cells for days past the end of the month are [`GridCell::Blank`]; valid
/// days without a reading are [`GridCell::NoData`]. Colors are computed from
/// the unrounded Celsius values, high and low independently.
pub fn presentation_grid(record: &YearRecord, year: i32, scale: &ColorScale) -> CalendarGrid {
    let columns: Vec<MonthColumn> = (1..=MONTHS)
        .map(|month| MonthColumn {
            month,
            name: month_name(month),
            days: days_in_month(year, month),
        })
        .collect();

    let rows = (1..=MAX_DAYS)
        .map(|day| GridRow {
            day,
            cells: columns
                .iter()
                .map(|column| {
                    if day > column.days {
                        return GridCell::Blank;
                    }
                    let label = date_label(year, column.month, day);
                    match record.reading(&label, column.month) {
                        Some(reading) => shade(reading, scale),
                        None => GridCell::NoData,
                    }
                })
                .collect(),
        })
        .collect();

    CalendarGrid {
        year,
        columns,
        rows,
    }
}

fn shade(reading: &Reading, scale: &ColorScale) -> GridCell {
    let shaded = |fahrenheit: f64| {
        let celsius = to_celsius(fahrenheit);
        ShadedValue {
            celsius: round_tenth(celsius),
            color: scale.color_for(celsius),
        }
    };
    GridCell::Temperatures {
        high: shaded(reading.high),
        low: shaded(reading.low),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_label_is_not_padded() {
        assert_eq!(date_label(2023, 2, 1), "2/1/2023");
        assert_eq!(date_label(2024, 12, 31), "12/31/2024");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
        assert_eq!(days_in_month(2023, 13), 0);
        assert_eq!(days_in_month(2023, 0), 0);
        assert_eq!(days_in_month(2023, u32::MAX), 0);
    }

    #[test]
    fn test_years_outside_the_calendar_are_blank() {
        assert_eq!(days_in_month(i32::MAX, 12), 0);
        assert_eq!(days_in_month(i32::MIN, 1), 0);

        let grid = presentation_grid(&YearRecord::default(), i32::MAX, &ColorScale::default());
        assert!(grid.columns.iter().all(|column| column.days == 0));
        assert!(grid
            .rows
            .iter()
            .all(|row| row.cells.iter().all(|cell| *cell == GridCell::Blank)));
    }

    #[test]
    fn test_leap_day_bounding() {
        let scale = ColorScale::default();
        let leap = presentation_grid(&YearRecord::default(), 2024, &scale);
        let common = presentation_grid(&YearRecord::default(), 2023, &scale);

        assert_eq!(leap.cell(29, 2), Some(&GridCell::NoData));
        assert_eq!(common.cell(29, 2), Some(&GridCell::Blank));
        assert_eq!(common.cell(30, 2), Some(&GridCell::Blank));
        assert_eq!(common.cell(31, 4), Some(&GridCell::Blank));
        assert_eq!(common.cell(31, 12), Some(&GridCell::NoData));
    }

    #[test]
    fn test_grid_shape_and_headers() {
        let grid = presentation_grid(&YearRecord::default(), 2023, &ColorScale::default());
        assert_eq!(grid.rows.len(), 31);
        assert!(grid.rows.iter().all(|row| row.cells.len() == 12));
        assert_eq!(grid.columns[0].name, "January");
        assert_eq!(grid.columns[1].days, 28);
        assert_eq!(grid.columns[11].name, "December");
        assert_eq!(grid.cell(0, 1), None);
        assert_eq!(grid.cell(1, 13), None);
    }

    #[test]
    fn test_reading_cells_are_shaded_independently() {
        let mut record = YearRecord::new("Rome");
        record.insert("7/14/2023", 7, Reading::new(104.0, 50.0));

        let grid = presentation_grid(&record, 2023, &ColorScale::default());

        let expected = GridCell::Temperatures {
            high: ShadedValue {
                celsius: 40.0,
                color: ColorScale::default().color_for(40.0),
            },
            low: ShadedValue {
                celsius: 10.0,
                color: ColorScale::default().color_for(10.0),
            },
        };
        assert_eq!(grid.cell(14, 7), Some(&expected));
        assert_eq!(grid.cell(15, 7), Some(&GridCell::NoData));
    }

    #[test]
    fn test_reading_under_another_month_is_not_shown() {
        // The page for March may list a date from April; the grid only
        // shows readings filed under the date's own month.
        let mut record = YearRecord::default();
        record.insert("4/1/2023", 3, Reading::new(60.0, 40.0));

        let grid = presentation_grid(&record, 2023, &ColorScale::default());
        assert_eq!(grid.cell(1, 4), Some(&GridCell::NoData));
    }

    #[test]
    fn test_color_uses_unrounded_value() {
        // 49.99 °F is 9.994 °C: rounds to 10.0 but is still inside the -5..10 bracket.
        let mut record = YearRecord::default();
        record.insert("1/5/2023", 1, Reading::new(49.99, 49.99));
        let scale = ColorScale::default();

        let grid = presentation_grid(&record, 2023, &scale);

        match grid.cell(5, 1) {
            Some(GridCell::Temperatures { high, .. }) => {
                assert_eq!(high.celsius, 10.0);
                assert_eq!(high.color, scale.color_for(to_celsius(49.99)));
                assert_ne!(high.color, scale.color_for(10.0));
            }
            other => panic!("unexpected cell {other:?}"),
        }
    }
}
