//! Fetch subsystem: resilient retrieval against anti-automation defenses
//!
//! This module contains the hard half of the fetch problem:
//! - Outcome classification for every attempt (HTTP codes, transport errors)
//! - A pure, testable backoff policy with outcome-specific escalation
//! - The per-URL retry loop with identity rotation and pool regeneration

mod fetcher;
mod outcome;
pub mod policy;

pub use fetcher::{FetchCompletion, FetchState, Fetcher, Page, Sleep, TokioSleep};
pub use outcome::FetchOutcome;
pub use policy::{react, Reaction, WaitRange};
