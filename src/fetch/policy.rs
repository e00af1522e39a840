//! Backoff and pacing policy
//!
//! The whole retry policy is expressed as pure functions from `(outcome,
//! attempt)` to an action with a wait *range*; random sampling happens at the
//! call site. That keeps the policy testable without a network, a clock, or a
//! controlled RNG: tests assert on the ranges themselves.

use crate::fetch::FetchOutcome;
use rand::prelude::*;
use std::time::Duration;

/// Multiplier applied to the courtesy delay for each failed attempt
const GROWTH_FACTOR: f64 = 1.8;

/// Exponent cap for the courtesy-delay growth
const GROWTH_CAP: u32 = 4;

/// Pool size used when sustained blocking forces a regeneration
pub const REGENERATED_POOL_SIZE: usize = 10;

/// An inclusive range of seconds to wait, sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaitRange {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl WaitRange {
    pub const fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    /// Scales both bounds by `factor`
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            min_secs: self.min_secs * factor,
            max_secs: self.max_secs * factor,
        }
    }

    /// Expected wait in seconds (used to reason about escalation)
    pub fn expected_secs(&self) -> f64 {
        (self.min_secs + self.max_secs) / 2.0
    }

    /// Draws a concrete wait from the range
    pub fn sample(&self, rng: &mut impl Rng) -> Duration {
        Duration::from_secs_f64(rng.random_range(self.min_secs..=self.max_secs))
    }
}

/// Action derived from one attempt's outcome
#[derive(Debug, PartialEq)]
pub enum Reaction {
    /// Parse the body and return the document - terminal
    Deliver,

    /// Terminal failure, never retried (404)
    Abandon,

    /// Try again; `wait` of `None` means retry immediately
    Retry {
        wait: Option<WaitRange>,
        regenerate_pool: bool,
    },
}

/// Maps one attempt's outcome to the next action
///
/// `attempt` is 0-indexed. The escalation schedule per outcome:
///
/// | Outcome | Wait |
/// |---------|------|
/// | Blocked (403/429) | `uniform(30,60)*(n+1)` for n<3, else `uniform(90,180)*(n-2)`; regenerate the pool for n>4 |
/// | Service unavailable (503) | `uniform(60,120)*(n+1)` |
/// | Unresolved redirect | none, retry immediately |
/// | Timeout | `uniform(15,30)*(n+1)` |
/// | Connection error | `uniform(20,40)*(n+1)` |
/// | Other | `uniform(10,30)*(n+1)` |
pub fn react(outcome: &FetchOutcome, attempt: u32) -> Reaction {
    let n = attempt as f64;
    match outcome {
        FetchOutcome::Success(_) => Reaction::Deliver,

        FetchOutcome::NotFound => Reaction::Abandon,

        FetchOutcome::Blocked(_) => {
            let wait = if attempt < 3 {
                WaitRange::new(30.0, 60.0).scaled(n + 1.0)
            } else {
                WaitRange::new(90.0, 180.0).scaled(n - 2.0)
            };
            Reaction::Retry {
                wait: Some(wait),
                regenerate_pool: attempt > 4,
            }
        }

        FetchOutcome::ServiceUnavailable => Reaction::Retry {
            wait: Some(WaitRange::new(60.0, 120.0).scaled(n + 1.0)),
            regenerate_pool: false,
        },

        FetchOutcome::Redirect => Reaction::Retry {
            wait: None,
            regenerate_pool: false,
        },

        FetchOutcome::Timeout => Reaction::Retry {
            wait: Some(WaitRange::new(15.0, 30.0).scaled(n + 1.0)),
            regenerate_pool: false,
        },

        FetchOutcome::ConnectionError => Reaction::Retry {
            wait: Some(WaitRange::new(20.0, 40.0).scaled(n + 1.0)),
            regenerate_pool: false,
        },

        FetchOutcome::Other(_) => Reaction::Retry {
            wait: Some(WaitRange::new(10.0, 30.0).scaled(n + 1.0)),
            regenerate_pool: false,
        },
    }
}

/// Pre-request courtesy delay for attempt `n`
///
/// Not a failure backoff: this is the pacing applied before every request.
/// `base = uniform(4,10)`, grown by `1.8^min(n,4)` for retries, with ±50%
/// jitter and a 1 second floor.
pub fn courtesy_delay(attempt: u32, rng: &mut impl Rng) -> Duration {
    let mut base = rng.random_range(4.0..=10.0);
    if attempt > 0 {
        base *= GROWTH_FACTOR.powi(attempt.min(GROWTH_CAP) as i32);
    }
    let jitter = rng.random_range(-0.5..=0.5) * base;
    Duration::from_secs_f64((base + jitter).max(1.0))
}

/// Bounds of the courtesy delay in seconds for attempt `n`
pub fn courtesy_delay_bounds(attempt: u32) -> (f64, f64) {
    let growth = if attempt > 0 {
        GROWTH_FACTOR.powi(attempt.min(GROWTH_CAP) as i32)
    } else {
        1.0
    };
    let min = (4.0 * growth * 0.5).max(1.0);
    let max = 10.0 * growth * 1.5;
    (min, max)
}

/// Extra cooling delay inserted before late attempts (n>3) to suppress
/// high-frequency retry bursts
pub fn cooling_delay(attempt: u32) -> Option<WaitRange> {
    (attempt > 3).then(|| WaitRange::new(10.0, 25.0))
}

/// Randomized per-request timeout in [45,75] seconds
pub fn request_timeout(rng: &mut impl Rng) -> Duration {
    Duration::from_secs(rng.random_range(45..=75))
}
