use std::cmp::Reverse;

use crate::{
    core::{measure::Retrieval, metric::Metric, savings::Savings, scorer::ScoredSeries},
    ops::Span,
    prelude::*,
};

/// One retrieval cycle tile of the year, reduced to its best activation window.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Sequential number of the block within the year.
    pub index: usize,

    /// Slots occupied by the whole retrieval cycle.
    pub span: Span,

    /// First slot of the representative activation window.
    pub start: usize,

    /// Savings of the representative activation window.
    pub savings: Savings,
}

/// Tile the series into non-overlapping retrieval cycles, starting from the first slot.
///
/// Each block is represented by the window with the highest score for the metric,
/// the earliest window wins ties. Trailing slots that do not make up a full cycle are dropped.
#[instrument(skip_all, fields(%metric, n_cycle_slots = retrieval.cycle))]
pub fn segment(
    scored: &ScoredSeries,
    n_series_slots: usize,
    retrieval: &Retrieval,
    metric: Metric,
) -> Vec<Block> {
    let (n_slots, n_cycle_slots) = (retrieval.duration, retrieval.cycle);
    if n_slots == 0 || n_cycle_slots < n_slots || scored.is_empty() {
        return Vec::new();
    }
    debug_assert_eq!(scored.len() + n_slots, n_series_slots + 1);

    (0..n_series_slots / n_cycle_slots)
        .filter_map(|index| {
            let span = Span::new(index * n_cycle_slots, (index + 1) * n_cycle_slots);
            let start = (span.start..=(span.end - n_slots))
                .min_by_key(|start| Reverse(scored[*start].score(metric)))?;
            Some(Block { index, span, start, savings: scored[start] })
        })
        .collect()
}
