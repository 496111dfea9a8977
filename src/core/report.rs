use std::fmt::{Display, Formatter};

use comfy_table::Color;

use crate::core::{
    direction::Direction, error::MeasureError, metric::Metric, savings::Savings, variant::Variant,
};

/// Which load change schedule a result belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadChange {
    Reduction,
    Increase,

    /// Reduction and increase scheduled together.
    Combination,
}

impl From<Direction> for LoadChange {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Reduction => Self::Reduction,
            Direction::Increase => Self::Increase,
        }
    }
}

impl Display for LoadChange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reduction => write!(f, "reduction"),
            Self::Increase => write!(f, "increase"),
            Self::Combination => write!(f, "combination"),
        }
    }
}

impl LoadChange {
    pub const fn color(self) -> Color {
        match self {
            Self::Reduction => Direction::Reduction.color(),
            Self::Increase => Direction::Increase.color(),
            Self::Combination => Color::DarkYellow,
        }
    }
}

/// Annual potential of one measure and load change, optimized for one metric.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub measure: String,
    pub name: String,
    pub variant: Variant,
    pub load_change: LoadChange,

    /// Metric the activations were selected by.
    pub metric: Metric,

    /// Savings of the selected activations, including the associated metric.
    pub savings: Savings,

    pub n_activations: usize,
}

/// Measure that could not be calculated.
#[must_use]
#[derive(Debug)]
pub struct Skipped {
    pub measure: String,
    pub variant: Variant,
    pub error: MeasureError,
}

#[must_use]
#[derive(Debug, Default)]
pub struct Report {
    pub records: Vec<Record>,
    pub skipped: Vec<Skipped>,
}

impl Report {
    /// Total savings over all records for the given load change and metric.
    pub fn total(&self, load_change: LoadChange, metric: Metric) -> Savings {
        self.records
            .iter()
            .filter(|record| record.load_change == load_change && record.metric == metric)
            .map(|record| record.savings)
            .sum()
    }
}
