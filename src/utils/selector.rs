//! Random proxy and User-Agent selection.
//!
//! Every fetch task owns its own [`Selector`], seeded independently from the
//! operating system, so concurrent tasks never share a generator.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::config::USER_AGENTS;

/// Per-task source of random proxy and User-Agent choices.
pub(crate) struct Selector {
    rng: StdRng,
}

impl Selector {
    /// Creates a selector seeded from the operating system.
    pub(crate) fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a deterministic selector (tests only).
    #[cfg(test)]
    pub(crate) fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks a proxy uniformly at random, or `None` for an empty pool.
    pub(crate) fn proxy<'a>(&mut self, pool: &'a [String]) -> Option<&'a str> {
        pool.choose(&mut self.rng).map(String::as_str)
    }

    /// Picks a User-Agent uniformly at random from the rotation set.
    pub(crate) fn user_agent(&mut self) -> &'static str {
        USER_AGENTS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(USER_AGENTS[0])
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}
