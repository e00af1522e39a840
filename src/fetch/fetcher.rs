//! Per-URL fetch loop
//!
//! Drives the retrying request loop for a single URL: identity acquisition,
//! courtesy delay, request dispatch, outcome classification, and the policy
//! reaction. A URL only ever leaves this loop through a terminal result -
//! a fetched page, a 404, or exhausted retries. Ordinary network and HTTP
//! conditions never surface as errors to the caller.

use crate::fetch::policy::{
    cooling_delay, courtesy_delay, react, request_timeout, Reaction, REGENERATED_POOL_SIZE,
};
use crate::fetch::FetchOutcome;
use crate::identity::IdentityPool;
use crate::{Result, WindwardError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Sleeping abstraction so the retry loop is testable without real delays
pub trait Sleep: Send + Sync {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Production sleeper backed by the tokio timer
#[derive(Debug, Default, Clone)]
pub struct TokioSleep;

impl Sleep for TokioSleep {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// A successfully fetched page
#[derive(Debug)]
pub struct Page {
    /// The URL this page was requested as (the record's origin)
    pub url: String,
    /// Raw response body
    pub body: String,
}

/// Terminal result of fetching one URL
#[derive(Debug)]
pub enum FetchCompletion {
    /// Got a usable document
    Fetched(Page),
    /// The catalog says the listing is gone - skipped, never retried
    NotFound,
    /// All attempts used up - the URL is skipped, not fatal to the run
    RetriesExhausted,
}

/// Per-URL mutable fetch counters
///
/// Created when fetching a URL starts and discarded at its terminal outcome.
#[derive(Debug, Default)]
pub struct FetchState {
    pub attempt: u32,
    pub total_wait: Duration,
    pub pool_regenerated: bool,
}

/// The retrying fetch engine
pub struct Fetcher<S: Sleep = TokioSleep> {
    pool: Arc<IdentityPool>,
    max_attempts: u32,
    sleeper: S,
}

impl Fetcher<TokioSleep> {
    pub fn new(pool: Arc<IdentityPool>, max_attempts: u32) -> Self {
        Self::with_sleeper(pool, max_attempts, TokioSleep)
    }
}

impl<S: Sleep> Fetcher<S> {
    /// Builds a fetcher with a custom sleeper (tests use a recording one)
    pub fn with_sleeper(pool: Arc<IdentityPool>, max_attempts: u32, sleeper: S) -> Self {
        Self {
            pool,
            max_attempts: max_attempts.max(1),
            sleeper,
        }
    }

    /// Fetches one URL to a terminal result
    ///
    /// Per attempt `n`: acquire an identity, sleep the courtesy delay (plus
    /// one cooling delay for n>3), issue the request with a randomized
    /// timeout, classify the outcome, and apply the policy reaction. The only
    /// error path is a failed identity-pool regeneration; every network or
    /// HTTP condition is absorbed by the retry policy.
    pub async fn fetch(&self, url: &str) -> Result<FetchCompletion> {
        let mut state = FetchState::default();

        for attempt in 0..self.max_attempts {
            state.attempt = attempt;

            let identity = self.pool.acquire();

            let delay = courtesy_delay(attempt, &mut rand::rng());
            if attempt > 0 {
                tracing::debug!(
                    "fetching {url} (attempt {}/{}), waiting {:.1}s",
                    attempt + 1,
                    self.max_attempts,
                    delay.as_secs_f64()
                );
            }
            self.wait(&mut state, delay).await;

            if let Some(range) = cooling_delay(attempt) {
                let extra = range.sample(&mut rand::rng());
                tracing::debug!("extra cooling period: {:.1}s", extra.as_secs_f64());
                self.wait(&mut state, extra).await;
            }

            let timeout = request_timeout(&mut rand::rng());
            let result = identity
                .client()
                .get(url)
                .headers(identity.header_map())
                .timeout(timeout)
                .send()
                .await;

            let outcome = FetchOutcome::classify(result).await;

            match react(&outcome, attempt) {
                Reaction::Deliver => {
                    if let FetchOutcome::Success(body) = outcome {
                        tracing::debug!(
                            "fetched {url} on attempt {} ({} bytes)",
                            attempt + 1,
                            body.len()
                        );
                        return Ok(FetchCompletion::Fetched(Page {
                            url: url.to_string(),
                            body,
                        }));
                    }
                }

                Reaction::Abandon => {
                    tracing::info!("listing gone (404): {url}");
                    return Ok(FetchCompletion::NotFound);
                }

                Reaction::Retry {
                    wait,
                    regenerate_pool,
                } => {
                    if regenerate_pool {
                        tracing::warn!("persistent blocking, regenerating identity pool");
                        self.pool
                            .regenerate(REGENERATED_POOL_SIZE)
                            .map_err(WindwardError::ClientBuild)?;
                        state.pool_regenerated = true;
                    }

                    if let Some(range) = wait {
                        let backoff = range.sample(&mut rand::rng());
                        tracing::warn!(
                            "{outcome} for {url}, backing off {:.1}s",
                            backoff.as_secs_f64()
                        );
                        self.wait(&mut state, backoff).await;
                    } else {
                        tracing::debug!("{outcome} for {url}, retrying immediately");
                    }
                }
            }
        }

        tracing::warn!(
            "giving up on {url} after {} attempts ({:.0}s spent waiting)",
            self.max_attempts,
            state.total_wait.as_secs_f64()
        );
        Ok(FetchCompletion::RetriesExhausted)
    }

    async fn wait(&self, state: &mut FetchState, duration: Duration) {
        state.total_wait += duration;
        self.sleeper.sleep(duration).await;
    }
}
