//! Unit conversion and temperature shading.

pub mod color;
pub mod units;
