use thiserror::Error;

use crate::{core::direction::Direction, quantity::time::Hours};

/// Invalid run settings, fatal before any measure is processed.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("at least one of `max_co2` and `max_cost` must be enabled")]
    NoMetric,

    #[error("year {0} is not supported: no time series or yearly averages are available")]
    UnsupportedYear(i32),
}

/// Implausible measure parameters. The measure gets skipped, other measures are still calculated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeasureError {
    #[error("the measure defines neither load reduction nor load increase")]
    NoDirection,

    #[error("load {direction}: retrieval duration must be positive, got {duration}")]
    NonPositiveDuration { direction: Direction, duration: Hours },

    #[error("load {direction}: retrieval frequency must not be negative, got {frequency}")]
    NegativeFrequency { direction: Direction, frequency: i64 },

    #[error("load {direction}: activation duration and catch-up time must be non-negative numbers")]
    NegativeOverhead { direction: Direction },

    #[error(
        "load {direction}: retrieval duration of {n_slots} quarter-hours exceeds the year of {n_year_slots}"
    )]
    DurationExceedsYear { direction: Direction, n_slots: usize, n_year_slots: usize },

    #[error(
        "load {direction}: retrieval cycle of {n_slots} quarter-hours exceeds the year of {n_year_slots}"
    )]
    CycleExceedsYear { direction: Direction, n_slots: usize, n_year_slots: usize },
}

/// The time series does not cover the year slot by slot.
#[derive(Debug, Error)]
#[error("the time series of {year} has {actual} quarter-hours, expected {expected}")]
pub struct DataShapeError {
    pub year: i32,
    pub expected: usize,
    pub actual: usize,
}
