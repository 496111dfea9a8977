use std::ops::Index;

use crate::{
    core::{
        direction::Direction,
        measure::Retrieval,
        savings::Savings,
        series::{SLOT_DURATION, Signal},
    },
    prelude::*,
};

/// Savings of a single activation window per valid start slot.
#[must_use]
pub struct ScoredSeries(Vec<Savings>);

impl ScoredSeries {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<usize> for ScoredSeries {
    type Output = Savings;

    fn index(&self, start: usize) -> &Self::Output {
        &self.0[start]
    }
}

/// Score every window of `retrieval.duration` consecutive slots against the yearly averages.
///
/// A reduction saves whenever the signal exceeds the average, an increase whenever it stays below.
/// Windows never wrap around the end of the series.
///
/// Each window is summed on its own from the first slot to the last, so that windows over equal
/// signals score bit-for-bit equal wherever they are in the year and ties fall to the earlier one.
#[instrument(skip_all, fields(%direction, n_slots = retrieval.duration))]
pub fn score(
    slots: &[Signal],
    averages: Signal,
    direction: Direction,
    retrieval: &Retrieval,
) -> ScoredSeries {
    let slot_energy = retrieval.power * SLOT_DURATION * direction.sign();
    let n_slots = retrieval.duration;

    let savings: Vec<Savings> = if n_slots == 0 {
        Vec::new()
    } else {
        slots
            .windows(n_slots)
            .map(|window| {
                let excess = window
                    .iter()
                    .fold(Signal::default(), |sum, slot| sum + (*slot - averages));
                Savings {
                    emission: slot_energy * excess.emission_factor,
                    cost: slot_energy * excess.price,
                }
            })
            .collect()
    };
    debug!(n_windows = savings.len(), "scored");
    ScoredSeries(savings)
}
