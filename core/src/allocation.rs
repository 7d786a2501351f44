//! Stat allocation rules
//!
//! Both the setup screen and the level-up screen hand out a fixed pool of
//! points. The same checks gate the +/- buttons, run before a submission
//! and run again when the server confirms a level-up.

use crate::error::{AllocationFault, ClientResult};
use crate::state::{LEVEL_UP_STAT_POINTS, SETUP_STAT_POINTS};
use crate::types::{Stat, StatBlock};

/// How many points an allocation may spend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Up to `n` points (creature setup)
    AtMost(i32),
    /// Exactly `n` points (level-up)
    Exactly(i32),
}

impl Budget {
    pub fn points(&self) -> i32 {
        match self {
            Budget::AtMost(n) | Budget::Exactly(n) => *n,
        }
    }
}

/// Check an allocation against a budget without applying it.
pub fn verify_allocation(allocation: &StatBlock, budget: Budget) -> Result<(), AllocationFault> {
    if let Some((stat, value)) = allocation.iter().find(|(_, value)| *value < 0) {
        return Err(AllocationFault::Negative { stat, value });
    }

    let total = allocation.total();
    match budget {
        Budget::AtMost(points) if total > points => Err(AllocationFault::OverBudget {
            budget: points,
            total,
        }),
        Budget::Exactly(points) if total != points => Err(AllocationFault::WrongTotal {
            budget: points,
            total,
        }),
        _ => Ok(()),
    }
}

/// Apply a level-up allocation to the confirmed baseline.
///
/// The allocation must be non-negative and spend exactly
/// [`LEVEL_UP_STAT_POINTS`]; the result is the pointwise sum, so no stat
/// ever drops below the baseline.
pub fn apply_level_up(stats: &StatBlock, allocation: &StatBlock) -> ClientResult<StatBlock> {
    verify_allocation(allocation, Budget::Exactly(LEVEL_UP_STAT_POINTS))?;
    Ok(stats.plus(allocation))
}

/// Check the server's confirmation of a level-up against what we asked for.
///
/// Returns the confirmed stats. A confirmation without `updated_stats` is
/// accepted as-is and yields the locally computed result.
pub fn verify_confirmation(
    baseline: &StatBlock,
    allocation: &StatBlock,
    confirmed: Option<&StatBlock>,
) -> ClientResult<StatBlock> {
    let expected = apply_level_up(baseline, allocation)?;
    match confirmed {
        Some(confirmed) if *confirmed != expected => {
            Err(AllocationFault::ConfirmationMismatch {
                expected,
                confirmed: *confirmed,
            }
            .into())
        }
        Some(confirmed) => Ok(*confirmed),
        None => Ok(expected),
    }
}

/// An allocation being built with +/- buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatDraft {
    allocation: StatBlock,
    budget: Budget,
}

impl StatDraft {
    pub fn new(budget: Budget) -> Self {
        Self {
            allocation: StatBlock::default(),
            budget,
        }
    }

    /// Draft for a new creature (up to 6 points)
    pub fn setup() -> Self {
        Self::new(Budget::AtMost(SETUP_STAT_POINTS))
    }

    /// Draft for a level-up step (exactly 3 points)
    pub fn level_up() -> Self {
        Self::new(Budget::Exactly(LEVEL_UP_STAT_POINTS))
    }

    pub fn allocation(&self) -> &StatBlock {
        &self.allocation
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    pub fn remaining(&self) -> i32 {
        self.budget.points() - self.allocation.total()
    }

    /// Move one stat by `delta`. Returns false, leaving the draft unchanged,
    /// if the stat would go negative or the pool would be overspent.
    pub fn adjust(&mut self, stat: Stat, delta: i32) -> bool {
        let Some(next) = self.allocation.get(stat).checked_add(delta) else {
            return false;
        };
        if next < 0 {
            return false;
        }
        if delta > 0 && delta > self.remaining() {
            return false;
        }
        self.allocation.set(stat, next);
        true
    }

    /// Whether the draft may be sent as-is
    pub fn is_submittable(&self) -> bool {
        verify_allocation(&self.allocation, self.budget).is_ok()
    }

    pub fn clear(&mut self) {
        self.allocation = StatBlock::default();
    }
}
