//! Simulated client identities and their rotation pool
//!
//! This module owns the only shared mutable state of the fetch subsystem:
//! - Randomized client identities (headers, user agent, locale, referrer)
//! - Round-robin issuance with probabilistic in-place header drift
//! - Wholesale pool regeneration after sustained blocking

mod pool;
mod profile;

pub use pool::IdentityPool;
pub use profile::{Identity, REFERRERS, USER_AGENTS};
