//! Run orchestration
//!
//! The runner drives the whole pipeline over the input URL list as a single
//! sequential worker: resume offset, then for each remaining URL fetch,
//! extract, and append. Per-URL failures are contained and counted; only
//! setup faults (input source, output table, identity pool) abort the run.

use crate::config::Config;
use crate::extract::{ExtractOutcome, Extractor};
use crate::fetch::{FetchCompletion, Fetcher, Sleep, TokioSleep};
use crate::identity::IdentityPool;
use crate::input::read_url_list;
use crate::output::{compute_start_offset, RecordSink};
use crate::Result;
use rand::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Counters for one run
#[derive(Debug, Default)]
pub struct RunStats {
    /// URLs taken from the list this run
    pub processed: usize,
    /// Records durably appended
    pub appended: usize,
    /// Pages filtered out by the extractor
    pub skipped: usize,
    /// URLs lost to 404 or exhausted retries
    pub failed: usize,
}

impl RunStats {
    /// Fraction of processed URLs that produced a record
    pub fn success_rate(&self) -> f64 {
        if self.processed == 0 {
            return 0.0;
        }
        self.appended as f64 / self.processed as f64
    }
}

/// Sequential pipeline runner
pub struct Runner<S: Sleep + Clone = TokioSleep> {
    config: Config,
    sleeper: S,
}

impl Runner<TokioSleep> {
    pub fn new(config: Config) -> Self {
        Self::with_sleeper(config, TokioSleep)
    }
}

impl<S: Sleep + Clone> Runner<S> {
    /// Builds a runner with a custom sleeper (tests use a recording one)
    pub fn with_sleeper(config: Config, sleeper: S) -> Self {
        Self { config, sleeper }
    }

    /// Processes the URL list to completion
    ///
    /// With `fresh` the output table is truncated and the run starts at the
    /// beginning; otherwise the start offset comes from the last row already
    /// in the table. A start offset of 0 always means a newly-created table
    /// with a fresh header, so the output stays a single well-formed CSV.
    pub async fn run(&self, fresh: bool) -> Result<RunStats> {
        let urls = read_url_list(Path::new(&self.config.input.url_list_path))?;
        let output_path = Path::new(&self.config.output.table_path);

        let offset = if fresh {
            0
        } else {
            compute_start_offset(&urls, output_path)
        };
        let mut sink = RecordSink::open(output_path, offset == 0)?;

        let pool = Arc::new(IdentityPool::new(self.config.fetch.pool_size)?);
        let fetcher = Fetcher::with_sleeper(
            Arc::clone(&pool),
            self.config.fetch.max_attempts,
            self.sleeper.clone(),
        );
        let extractor = Extractor::new()?;

        tracing::info!(
            "processing {} of {} URLs (offset {offset}, pool of {})",
            urls.len() - offset,
            urls.len(),
            pool.len()
        );

        let mut stats = RunStats::default();
        let started = Instant::now();

        for url in &urls[offset..] {
            stats.processed += 1;

            match fetcher.fetch(url).await? {
                FetchCompletion::Fetched(page) => {
                    match extractor.extract(&page.body, &page.url) {
                        ExtractOutcome::Complete(record) => {
                            sink.append(&record)?;
                            stats.appended += 1;

                            if stats.appended % 5 == 0 {
                                tracing::info!(
                                    "progress: {} appended, {} skipped, {} failed ({:.1}% success)",
                                    stats.appended,
                                    stats.skipped,
                                    stats.failed,
                                    stats.success_rate() * 100.0
                                );
                            }

                            self.pace(&stats).await;
                        }
                        ExtractOutcome::Skip(reason) => {
                            tracing::info!("skipping {url}: {reason}");
                            stats.skipped += 1;
                        }
                    }
                }
                FetchCompletion::NotFound | FetchCompletion::RetriesExhausted => {
                    stats.failed += 1;
                }
            }
        }

        tracing::info!(
            "run complete: {} appended, {} skipped, {} failed in {:.0?}",
            stats.appended,
            stats.skipped,
            stats.failed,
            started.elapsed()
        );

        Ok(stats)
    }

    /// Inter-record pacing after a successful append
    ///
    /// Slows down when failures outnumber successes so a struggling run backs
    /// further away from the catalog's defenses.
    async fn pace(&self, stats: &RunStats) {
        let base = if stats.failed + stats.skipped > stats.appended {
            8.0
        } else {
            5.0
        };
        let delay = rand::rng().random_range(base..=base + 5.0);
        self.sleeper.sleep(Duration::from_secs_f64(delay)).await;
    }
}

/// Runs a complete harvest with the production sleeper
pub async fn run(config: Config, fresh: bool) -> Result<RunStats> {
    Runner::new(config).run(fresh).await
}
