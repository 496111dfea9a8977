use std::cmp::Ordering;

use itertools::Itertools;

use crate::{
    core::{block::Block, metric::Metric, savings::Savings},
    prelude::*,
};

/// Order blocks by descending score, earlier blocks first on ties.
pub fn by_rank(metric: Metric) -> impl Fn(&Block, &Block) -> Ordering + Copy {
    move |lhs: &Block, rhs: &Block| {
        rhs.savings.score(metric).cmp(&lhs.savings.score(metric)).then(lhs.index.cmp(&rhs.index))
    }
}

/// All blocks with strictly positive savings, best first.
pub fn rank(blocks: &[Block], metric: Metric) -> Vec<Block> {
    blocks
        .iter()
        .filter(|block| block.savings.is_positive(metric))
        .copied()
        .sorted_unstable_by(by_rank(metric))
        .collect()
}

/// Blocks chosen for activation, best first.
#[must_use]
#[derive(Clone, Debug)]
pub struct Selection {
    pub blocks: Vec<Block>,
}

impl Selection {
    /// Pick at most `k` best blocks, never activating a block which does not save anything.
    #[instrument(skip_all, fields(%metric, n_blocks = blocks.len(), k = k))]
    pub fn top(blocks: &[Block], k: usize, metric: Metric) -> Self {
        let blocks = blocks
            .iter()
            .copied()
            .k_smallest_by(k, by_rank(metric))
            .take_while(|block| block.savings.is_positive(metric))
            .collect_vec();
        debug!(n_selected = blocks.len(), "selected");
        Self { blocks }
    }

    pub fn total(&self) -> Savings {
        self.blocks.iter().map(|block| block.savings).sum()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.blocks.len()
    }
}
