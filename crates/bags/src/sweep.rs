//! Expiry sweep.
//!
//! Re-evaluates a shop's bags against the clock and pushes the terminal
//! `isActive=false`/`isAvailable=false` transition back to storage for any
//! bag that expired while its flags were still set. The transition is
//! one-way and idempotent, so overlapping sweeps (reload-on-mount plus the
//! interval timer) converge without locking.

use crate::lifecycle::{classify, BagStatus};
use crate::Bag;
use chrono::{Local, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Default period between sweep passes while a shop session is active.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Flag update pushed to the persistence collaborator for an expired bag.
#[derive(Debug, Clone, Serialize)]
pub struct BagFlagUpdate {
    /// Bag row id
    pub id: i64,
    /// Always `false`; the sweep never reactivates a bag
    #[serde(rename = "isActive")]
    pub is_active: bool,
    /// Always `false`
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
    /// ISO-8601 timestamp of the transition
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl BagFlagUpdate {
    /// Build the deactivation update for a bag, stamped now.
    pub fn deactivate(id: i64) -> Self {
        Self {
            id,
            is_active: false,
            is_available: false,
            updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Persistence seam for the sweep.
///
/// Constructed at the composition root and injected; the sweep never talks
/// to a global client instance.
pub trait BagStore {
    /// Error type surfaced by the backing store
    type Error: std::fmt::Display + Send;

    /// Load the bags belonging to a shop.
    fn list_shop_bags(
        &self,
        shop_id: &str,
    ) -> impl Future<Output = Result<Vec<Bag>, Self::Error>> + Send;

    /// Apply a flag update to a single bag.
    fn deactivate(
        &self,
        update: &BagFlagUpdate,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Outcome of one sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Bags examined
    pub examined: usize,
    /// Bags transitioned to inactive/unavailable
    pub transitioned: usize,
    /// Bags whose flag update failed (retried next pass)
    pub failed: usize,
}

/// Sweep a bag list against the current wall clock.
///
/// See [`sweep_at`] for the semantics; this entry point supplies `now`.
pub async fn sweep_and_reconcile<S: BagStore>(store: &S, bags: &mut [Bag]) -> SweepReport {
    sweep_at(store, bags, Local::now().naive_local()).await
}

/// Sweep a bag list against an explicit instant.
///
/// Every bag classified `Expired` whose flags are not both already cleared
/// gets one `deactivate` call. On success the flags are mirrored onto the
/// in-memory bag, so a second pass over the same list issues no further
/// calls. A failed update is logged, counted, and skipped; the rest of the
/// batch still runs.
pub async fn sweep_at<S: BagStore>(
    store: &S,
    bags: &mut [Bag],
    now: NaiveDateTime,
) -> SweepReport {
    let mut report = SweepReport::default();

    for bag in bags.iter_mut() {
        report.examined += 1;

        if classify(bag, now) != BagStatus::Expired {
            continue;
        }
        if !bag.is_active && !bag.is_available {
            // Already terminal
            continue;
        }

        let update = BagFlagUpdate::deactivate(bag.id);
        match store.deactivate(&update).await {
            Ok(()) => {
                bag.is_active = false;
                bag.is_available = false;
                bag.updated_at = Some(update.updated_at);
                report.transitioned += 1;
                debug!(bag_id = bag.id, "Expired bag deactivated");
            }
            Err(e) => {
                report.failed += 1;
                warn!(
                    bag_id = bag.id,
                    error = %e,
                    "Flag update failed; bag will be retried on the next sweep"
                );
            }
        }
    }

    report
}

/// Interval-driven sweeper for an active shop session.
///
/// Runs one pass immediately on spawn (the reload-on-mount path), then one
/// per interval. Dropping the handle leaves the task running; call
/// [`SweepHandle::stop`] when the session ends.
pub struct SweepService<S> {
    store: S,
    shop_id: String,
    interval: Duration,
}

impl<S> SweepService<S>
where
    S: BagStore + Send + Sync + 'static,
{
    /// Create a sweeper for a shop with the default 5-minute period.
    pub fn new(store: S, shop_id: impl Into<String>) -> Self {
        Self {
            store,
            shop_id: shop_id.into(),
            interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    /// Override the sweep period.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Spawn the sweep loop onto the current tokio runtime.
    pub fn spawn(self) -> SweepHandle {
        let task = tokio::spawn(self.run());
        SweepHandle { task }
    }

    async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            // First tick completes immediately: sweep once on load
            ticker.tick().await;

            match self.store.list_shop_bags(&self.shop_id).await {
                Ok(mut bags) => {
                    let report = sweep_and_reconcile(&self.store, &mut bags).await;
                    if report.transitioned > 0 || report.failed > 0 {
                        debug!(
                            shop_id = %self.shop_id,
                            examined = report.examined,
                            transitioned = report.transitioned,
                            failed = report.failed,
                            "Sweep pass finished"
                        );
                    }
                }
                Err(e) => {
                    warn!(
                        shop_id = %self.shop_id,
                        error = %e,
                        "Could not load bags for sweep; retrying next interval"
                    );
                }
            }
        }
    }
}

/// Handle to a running sweep loop.
pub struct SweepHandle {
    task: JoinHandle<()>,
}

impl SweepHandle {
    /// Cancel the sweep loop. No partial sweep state persists.
    pub fn stop(self) {
        self.task.abort();
    }

    /// Whether the underlying task has finished (aborted or panicked).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
