use bon::Builder;
use enumset::EnumSet;

use crate::{
    core::{direction::Direction, error::MeasureError, series::SLOT_DURATION, variant::Variant},
    prelude::*,
    quantity::{power::Kilowatts, time::Hours},
};

/// Flexibility measure as defined in the catalog.
#[must_use]
#[derive(Clone, Debug, Builder)]
pub struct Measure {
    #[builder(into)]
    pub id: String,

    #[builder(into, default)]
    pub name: String,

    /// Scope and maximization case, rows of different cases form different measures.
    #[builder(default)]
    pub variant: Variant,

    pub reduction: Option<RetrievalParameters>,
    pub increase: Option<RetrievalParameters>,

    /// Whether the load reduction and increase may be scheduled together within the same year.
    #[builder(default)]
    pub combinable: bool,
}

impl Measure {
    /// Iterate over the defined load directions, reduction first.
    pub fn directions(&self) -> impl Iterator<Item = (Direction, &RetrievalParameters)> {
        [(Direction::Reduction, &self.reduction), (Direction::Increase, &self.increase)]
            .into_iter()
            .filter_map(|(direction, parameters)| parameters.as_ref().map(|it| (direction, it)))
    }

    #[must_use]
    pub fn capability(&self) -> EnumSet<Direction> {
        self.directions().map(|(direction, _)| direction).collect()
    }

    pub const fn parameters_mut(&mut self, direction: Direction) -> &mut Option<RetrievalParameters> {
        match direction {
            Direction::Reduction => &mut self.reduction,
            Direction::Increase => &mut self.increase,
        }
    }
}

/// Raw retrieval parameters of one load direction, in hours.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct RetrievalParameters {
    /// Flexible power.
    pub power: Kilowatts,

    /// How long the load is changed during one retrieval.
    pub duration: Hours,

    /// Lead time before the load change takes effect.
    #[builder(default)]
    pub activation: Hours,

    /// Time needed to make up for the shifted consumption after a retrieval.
    #[builder(default)]
    pub catch_up: Hours,

    /// Maximum number of retrievals per year.
    pub frequency: i64,
}

/// Retrieval parameters quantized onto the slot grid.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Retrieval {
    /// Flexible power, rescaled to keep the energy of one retrieval.
    pub power: Kilowatts,

    /// Retrieval duration in slots.
    pub duration: usize,

    /// Length of the whole retrieval cycle in slots, including the activation and catch-up.
    pub cycle: usize,

    /// Maximum number of retrievals per year.
    pub frequency: usize,
}

impl Retrieval {
    /// Check the raw parameters for plausibility and fit them onto the slot grid of the year.
    ///
    /// Every duration is rounded up to a whole number of slots, and the power is rescaled
    /// accordingly. The frequency gets capped by the number of cycles that fit into the year.
    pub fn try_adapt(
        parameters: &RetrievalParameters,
        direction: Direction,
        n_year_slots: usize,
    ) -> Result<Self, MeasureError> {
        let RetrievalParameters { power, duration, activation, catch_up, frequency } = *parameters;

        if !(duration.is_positive() && duration.0.is_finite()) {
            return Err(MeasureError::NonPositiveDuration { direction, duration });
        }
        let Ok(frequency) = usize::try_from(frequency) else {
            return Err(MeasureError::NegativeFrequency { direction, frequency });
        };
        if !(activation.0 >= 0.0 && catch_up.0 >= 0.0) {
            return Err(MeasureError::NegativeOverhead { direction });
        }

        let (n_slots, n_cycle_slots) = if duration + activation + catch_up <= SLOT_DURATION {
            // The whole cycle fits into a single slot:
            (1, 1)
        } else {
            // Overheads beyond any realistic year saturate instead of wrapping around:
            let n_slots = to_slots(duration);
            (n_slots, n_slots.saturating_add(to_slots(activation)).saturating_add(to_slots(catch_up)))
        };
        if n_slots > n_year_slots {
            return Err(MeasureError::DurationExceedsYear { direction, n_slots, n_year_slots });
        }
        if n_cycle_slots > n_year_slots {
            return Err(MeasureError::CycleExceedsYear {
                direction,
                n_slots: n_cycle_slots,
                n_year_slots,
            });
        }

        #[expect(clippy::cast_precision_loss)]
        let power = (power * duration) / (SLOT_DURATION * n_slots as f64);

        let max_frequency = n_year_slots / n_cycle_slots;
        if frequency > max_frequency {
            warn!(
                %direction,
                frequency,
                max_frequency,
                "the retrieval cycles do not fit into the year, capping the frequency",
            );
        }

        Ok(Self {
            power,
            duration: n_slots,
            cycle: n_cycle_slots,
            frequency: frequency.min(max_frequency),
        })
    }
}

/// Round the duration up to whole slots, saturating at `usize::MAX`.
fn to_slots(duration: Hours) -> usize {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n_slots = (duration.0 / SLOT_DURATION.0).ceil() as usize;
    n_slots
}
