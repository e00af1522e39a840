//! Round-robin identity pool
//!
//! The pool is the only shared mutable state in the fetch path. All access
//! goes through a mutex: `acquire` hands out identities in rotation and
//! `regenerate` swaps the whole pool for freshly randomized identities after
//! sustained blocking.

use crate::identity::Identity;
use rand::prelude::*;
use std::sync::Mutex;

/// Probability that an acquired identity gets an in-place user-agent and
/// referrer refresh before being issued
const DRIFT_PROBABILITY: f64 = 0.2;

/// A mutex-guarded pool of rotating client identities
pub struct IdentityPool {
    inner: Mutex<Inner>,
}

struct Inner {
    identities: Vec<Identity>,
    cursor: usize,
}

impl IdentityPool {
    /// Creates a pool of `size` freshly randomized identities
    pub fn new(size: usize) -> Result<Self, reqwest::Error> {
        let identities = build_identities(size)?;
        Ok(Self {
            inner: Mutex::new(Inner {
                identities,
                cursor: 0,
            }),
        })
    }

    /// Returns the next identity in round-robin order
    ///
    /// With a small probability the stored identity's user agent and referrer
    /// are refreshed in place first; the cookie-carrying client is never
    /// replaced by drift. The caller receives a clone, so no identity is
    /// shared across concurrent in-flight requests.
    pub fn acquire(&self) -> Identity {
        let mut inner = self.inner.lock().unwrap();

        let index = inner.cursor;
        inner.cursor = (inner.cursor + 1) % inner.identities.len();

        if rand::rng().random_bool(DRIFT_PROBABILITY) {
            inner.identities[index].drift();
        }

        inner.identities[index].clone()
    }

    /// Discards the pool and rebuilds it with `size` fresh identities
    ///
    /// Invoked by the fetcher after sustained blocking; all session state of
    /// the previous identities is dropped.
    pub fn regenerate(&self, size: usize) -> Result<(), reqwest::Error> {
        let identities = build_identities(size)?;
        let mut inner = self.inner.lock().unwrap();
        inner.identities = identities;
        inner.cursor = 0;
        Ok(())
    }

    /// Number of identities currently in the pool
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> usize {
        self.inner.lock().unwrap().cursor
    }
}

fn build_identities(size: usize) -> Result<Vec<Identity>, reqwest::Error> {
    // At least one identity, even if a caller passes 0
    let size = size.max(1);
    let mut identities = Vec::with_capacity(size);
    for _ in 0..size {
        identities.push(Identity::generate()?);
    }
    Ok(identities)
}
