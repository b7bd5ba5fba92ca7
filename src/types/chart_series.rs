use serde::Serialize;

/// Chart-ready temperature series for one year, in degrees Celsius rounded to one decimal.
///
/// The three vectors are parallel: point `i` is `(labels[i], temp_max[i], temp_min[i])`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub temp_max: Vec<f64>,
    pub temp_min: Vec<f64>,
    pub year: i32,
}

impl ChartSeries {
    pub fn new(year: i32) -> Self {
        Self {
            labels: Vec::new(),
            temp_max: Vec::new(),
            temp_min: Vec::new(),
            year,
        }
    }

    pub fn push(&mut self, label: impl Into<String>, max: f64, min: f64) {
        self.labels.push(label.into());
        self.temp_max.push(max);
        self.temp_min.push(min);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, f64, f64)> {
        self.labels
            .iter()
            .zip(&self.temp_max)
            .zip(&self.temp_min)
            .map(|((label, max), min)| (label.as_str(), *max, *min))
    }
}
