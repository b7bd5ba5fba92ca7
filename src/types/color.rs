//! Color types used to shade calendar cells by temperature.
//!
//! The interpolation itself lives in [`crate::transform::color`].

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub fn to_hex(self) -> HexColor {
        HexColor(format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2))
    }
}

/// A lowercase `#rrggbb` color string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for HexColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for HexColor {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A gradient anchor: temperatures equal to `threshold` (°C) get exactly `color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub threshold: f64,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(threshold: f64, color: Rgb) -> Self {
        Self { threshold, color }
    }
}

const DEFAULT_STOPS: [ColorStop; 6] = [
    ColorStop::new(-5.0, Rgb(0, 0, 255)),
    ColorStop::new(10.0, Rgb(135, 206, 235)),
    ColorStop::new(15.0, Rgb(255, 255, 0)),
    ColorStop::new(20.0, Rgb(255, 165, 0)),
    ColorStop::new(30.0, Rgb(255, 69, 0)),
    ColorStop::new(40.0, Rgb(255, 0, 0)),
];

#[derive(Debug, Error, PartialEq)]
pub enum ColorScaleError {
    #[error("A color scale needs at least two stops, got {0}")]
    TooFewStops(usize),

    #[error("Color stop thresholds must be strictly ascending ({previous} is followed by {next})")]
    NotAscending { previous: f64, next: f64 },
}

/// A piecewise-linear temperature gradient.
///
/// Values outside the first and last threshold map to `fallback`.
/// [`ColorScale::default`] runs from blue at -5 °C through sky blue, yellow and
/// orange to red at 40 °C, with white as fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    stops: Vec<ColorStop>,
    fallback: Rgb,
}

impl ColorScale {
    pub fn new(stops: Vec<ColorStop>, fallback: Rgb) -> Result<Self, ColorScaleError> {
        if stops.len() < 2 {
            return Err(ColorScaleError::TooFewStops(stops.len()));
        }
        for pair in stops.windows(2) {
            if pair[0].threshold.partial_cmp(&pair[1].threshold) != Some(Ordering::Less) {
                return Err(ColorScaleError::NotAscending {
                    previous: pair[0].threshold,
                    next: pair[1].threshold,
                });
            }
        }
        Ok(Self { stops, fallback })
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn fallback(&self) -> Rgb {
        self.fallback
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            stops: DEFAULT_STOPS.to_vec(),
            fallback: Rgb::WHITE,
        }
    }
}
