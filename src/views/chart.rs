use crate::transform::units::{round_tenth, to_celsius};
use crate::types::chart_series::ChartSeries;
use crate::types::reading::YearRecord;

/// Flattens a record into a chart series.
///
/// Emits one point per (date, month) reading actually present, in record
/// order, so a year with gaps produces fewer than 365 points.
pub fn chart_series(record: &YearRecord, year: i32) -> ChartSeries {
    let mut series = ChartSeries::new(year);
    for (date, _month, reading) in record.iter() {
        series.push(
            date,
            round_tenth(to_celsius(reading.high)),
            round_tenth(to_celsius(reading.low)),
        );
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::reading::Reading;

    #[test]
    fn test_one_point_per_reading() {
        let mut record = YearRecord::new("Rome");
        record.insert("1/1/2023", 1, Reading::new(50.0, 32.0));
        record.insert("1/2/2023", 1, Reading::new(59.0, 41.0));
        record.insert("2/1/2023", 2, Reading::new(45.0, 33.0));

        let series = chart_series(&record, 2023);

        assert_eq!(series.year, 2023);
        assert_eq!(series.labels, ["1/1/2023", "1/2/2023", "2/1/2023"]);
        assert_eq!(series.temp_max, [10.0, 15.0, 7.2]);
        assert_eq!(series.temp_min, [0.0, 5.0, 0.6]);
    }

    #[test]
    fn test_date_reported_by_two_months_yields_two_points() {
        let mut record = YearRecord::default();
        record.insert("3/31/2023", 4, Reading::new(68.0, 50.0));
        record.insert("3/31/2023", 3, Reading::new(50.0, 32.0));

        let series = chart_series(&record, 2023);

        assert_eq!(series.len(), 2);
        // Months are ascending within a date regardless of insertion order.
        let points: Vec<_> = series.points().collect();
        assert_eq!(points, [("3/31/2023", 10.0, 0.0), ("3/31/2023", 20.0, 10.0)]);
    }

    #[test]
    fn test_empty_record() {
        let series = chart_series(&YearRecord::default(), 2020);
        assert!(series.is_empty());
        assert_eq!(series.year, 2020);
    }
}
