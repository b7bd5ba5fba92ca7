//! Presentation views derived from a [`crate::YearRecord`].

pub mod chart;
pub mod grid;
