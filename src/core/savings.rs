use ordered_float::OrderedFloat;

use crate::{
    core::metric::Metric,
    quantity::{cost::Euros, emission::Kilograms},
};

/// CO₂ and cost savings of one or more retrievals.
///
/// Both channels are always carried together: a schedule optimized for one metric
/// also reports the savings it happens to achieve in the other one.
#[must_use]
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::Sum,
)]
pub struct Savings {
    pub emission: Kilograms,
    pub cost: Euros,
}

impl Savings {
    /// Get the value which ranks the savings for the specified metric.
    #[must_use]
    pub const fn score(self, metric: Metric) -> OrderedFloat<f64> {
        match metric {
            Metric::Co2 => OrderedFloat(self.emission.0),
            Metric::Cost => OrderedFloat(self.cost.0),
        }
    }

    #[must_use]
    pub fn is_positive(self, metric: Metric) -> bool {
        self.score(metric) > OrderedFloat(0.0)
    }
}
