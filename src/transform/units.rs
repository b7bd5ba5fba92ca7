/// Converts degrees Fahrenheit to degrees Celsius without rounding.
pub fn to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Inverse of [`to_celsius`].
pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Rounds to one decimal place, halves away from zero. Presentation only.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
