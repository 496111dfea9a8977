use std::cmp::Ordering;

use crate::{
    core::{block::Block, direction::Direction, metric::Metric, savings::Savings},
    prelude::*,
};

/// Ranked candidate blocks of one load direction along with its activation cap.
#[must_use]
pub struct Lane {
    /// Strictly positive blocks, best first.
    pub candidates: Vec<Block>,

    /// Maximum number of activations.
    pub capacity: usize,
}

/// Reduction and increase blocks retained together, without any shared slot.
#[must_use]
#[derive(Clone, Debug)]
pub struct Combination {
    pub reduction: Vec<Block>,
    pub increase: Vec<Block>,
}

impl Combination {
    pub fn total(&self) -> Savings {
        self.reduction.iter().chain(&self.increase).map(|block| block.savings).sum()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.reduction.len() + self.increase.len()
    }
}

/// Retained blocks of one direction and the cursor over its remaining candidates.
struct Retained<'a> {
    lane: &'a Lane,
    blocks: Vec<Block>,
    cursor: usize,
}

impl<'a> Retained<'a> {
    fn new(lane: &'a Lane) -> Self {
        let cursor = lane.capacity.min(lane.candidates.len());
        Self { lane, blocks: lane.candidates[..cursor].to_vec(), cursor }
    }

    /// Retain the next best candidate which does not conflict with the other direction.
    fn promote(&mut self, other: &[Block]) -> Option<Block> {
        while let Some(candidate) = self.lane.candidates.get(self.cursor).copied() {
            self.cursor += 1;
            if !other.iter().any(|block| block.span.overlaps(candidate.span)) {
                self.blocks.push(candidate);
                return Some(candidate);
            }
        }
        None
    }
}

/// Find the first reduction block, in rank order, that shares a slot with a retained increase block.
fn find_conflict(reduction: &[Block], increase: &[Block]) -> Option<(usize, usize)> {
    reduction.iter().enumerate().find_map(|(i, lhs)| {
        increase.iter().position(|rhs| lhs.span.overlaps(rhs.span)).map(|j| (i, j))
    })
}

/// Merge both directions of one device so that no slot is allocated twice.
///
/// Of two conflicting blocks, the lower-scoring one is dropped for good and its direction
/// gets a chance to promote the next best candidate that fits. On a tie, the later block
/// loses, and then the increase loses.
#[instrument(skip_all, fields(%metric))]
pub fn combine(reduction: &Lane, increase: &Lane, metric: Metric) -> Combination {
    let mut reduction = Retained::new(reduction);
    let mut increase = Retained::new(increase);
    let mut n_conflicts = 0_usize;

    while let Some((i, j)) = find_conflict(&reduction.blocks, &increase.blocks) {
        n_conflicts += 1;
        let (lhs, rhs) = (reduction.blocks[i], increase.blocks[j]);
        let loser = match lhs.savings.score(metric).cmp(&rhs.savings.score(metric)) {
            Ordering::Greater => Direction::Increase,
            Ordering::Less => Direction::Reduction,
            Ordering::Equal if lhs.span.start > rhs.span.start => Direction::Reduction,
            Ordering::Equal => Direction::Increase,
        };
        match loser {
            Direction::Reduction => {
                let dropped = reduction.blocks.remove(i);
                let promoted = reduction.promote(&increase.blocks);
                trace_promotion(loser, dropped, promoted);
            }
            Direction::Increase => {
                let dropped = increase.blocks.remove(j);
                let promoted = increase.promote(&reduction.blocks);
                trace_promotion(loser, dropped, promoted);
            }
        }
    }

    debug!(
        n_conflicts,
        n_reduction = reduction.blocks.len(),
        n_increase = increase.blocks.len(),
        "combined",
    );
    Combination { reduction: reduction.blocks, increase: increase.blocks }
}

fn trace_promotion(direction: Direction, dropped: Block, promoted: Option<Block>) {
    debug!(
        %direction,
        dropped = dropped.index,
        promoted = ?promoted.map(|block| block.index),
        "resolved a conflict",
    );
}
