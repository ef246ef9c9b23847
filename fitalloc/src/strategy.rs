//! Identifier of the most recently invoked placement policy.

use core::sync::atomic::{AtomicU8, Ordering};

/// The five placement policies.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Strategy {
    FirstFit = 1,
    NextFit = 2,
    BestFit = 3,
    WorstFit = 4,
    Buddy = 5,
}

impl Strategy {
    /// Stable human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::FirstFit => "first-fit",
            Strategy::NextFit => "next-fit",
            Strategy::BestFit => "best-fit",
            Strategy::WorstFit => "worst-fit",
            Strategy::Buddy => "buddy",
        }
    }

    /// Unset or out-of-range values decode to first-fit.
    fn from_raw(raw: u8) -> Self {
        match raw {
            2 => Strategy::NextFit,
            3 => Strategy::BestFit,
            4 => Strategy::WorstFit,
            5 => Strategy::Buddy,
            _ => Strategy::FirstFit,
        }
    }
}

/// Stable human-readable name of a policy.
pub fn strategy_name(strategy: Strategy) -> &'static str {
    strategy.name()
}

static LAST_STRATEGY: AtomicU8 = AtomicU8::new(0);

/// Updated on every allocation entry, whether or not the allocation succeeds.
pub(crate) fn record(strategy: Strategy) {
    LAST_STRATEGY.store(strategy as u8, Ordering::Relaxed);
}

/// The policy of the most recent allocation attempt.
pub fn current_strategy() -> Strategy {
    Strategy::from_raw(LAST_STRATEGY.load(Ordering::Relaxed))
}
