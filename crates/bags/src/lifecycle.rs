//! Bag lifecycle classification.
//!
//! A bag's state is derived on every read from its collection window and
//! availability flags; nothing is stored. Expiration wins over the flags:
//! once the pickup window has passed, a bag is expired even if the shop
//! never touched it. Before the deadline, a cleared flag means the shop
//! cancelled it.

use crate::Bag;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::warn;

/// Derived lifecycle state. Exactly one holds for a bag at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BagStatus {
    /// Before the deadline, active and purchasable
    Live,
    /// The pickup window end has passed
    Expired,
    /// Deactivated by the shop before its natural deadline
    Cancelled,
}

/// The instant a bag expires: collection date plus window end, local
/// wall-clock, seconds zeroed.
///
/// Returns `None` when the stored date or time does not parse; the caller
/// then treats the bag as not expired (failing toward keeping it visible)
/// rather than aborting the listing computation.
pub fn expires_at(bag: &Bag) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(&bag.collection_date, "%Y-%m-%d");
    let end = parse_window_end(&bag.collection_end);

    match (date, end) {
        (Ok(date), Some(end)) => Some(date.and_time(end)),
        _ => {
            warn!(
                bag_id = bag.id,
                collection_date = %bag.collection_date,
                collection_end = %bag.collection_end,
                "Unparseable collection window; treating bag as not expired"
            );
            None
        }
    }
}

/// Classify a bag against the given instant.
///
/// Pure function of `(collection_date, collection_end, is_active,
/// is_available, now)`. Expired is checked first and short-circuits the
/// flag checks, which makes the three states mutually exclusive and
/// collectively exhaustive.
pub fn classify(bag: &Bag, now: NaiveDateTime) -> BagStatus {
    if let Some(expires) = expires_at(bag) {
        if now > expires {
            return BagStatus::Expired;
        }
    }

    if !bag.is_active || !bag.is_available {
        BagStatus::Cancelled
    } else {
        BagStatus::Live
    }
}

/// A shop's bags split by lifecycle state.
#[derive(Debug, Default)]
pub struct PartitionedBags<'a> {
    /// Purchasable bags
    pub live: Vec<&'a Bag>,
    /// Bags past their pickup window
    pub expired: Vec<&'a Bag>,
    /// Bags the shop deactivated early
    pub cancelled: Vec<&'a Bag>,
}

/// Partition a shop's bag list by lifecycle state at `now`.
pub fn partition(bags: &[Bag], now: NaiveDateTime) -> PartitionedBags<'_> {
    let mut partitioned = PartitionedBags::default();
    for bag in bags {
        match classify(bag, now) {
            BagStatus::Live => partitioned.live.push(bag),
            BagStatus::Expired => partitioned.expired.push(bag),
            BagStatus::Cancelled => partitioned.cancelled.push(bag),
        }
    }
    partitioned
}

/// Bags currently live at `now`.
pub fn live_bags(bags: &[Bag], now: NaiveDateTime) -> Vec<&Bag> {
    bags.iter().filter(|b| classify(b, now) == BagStatus::Live).collect()
}

/// Bags expired at `now`.
pub fn expired_bags(bags: &[Bag], now: NaiveDateTime) -> Vec<&Bag> {
    bags.iter().filter(|b| classify(b, now) == BagStatus::Expired).collect()
}

/// Bags cancelled at `now`.
pub fn cancelled_bags(bags: &[Bag], now: NaiveDateTime) -> Vec<&Bag> {
    bags.iter().filter(|b| classify(b, now) == BagStatus::Cancelled).collect()
}

/// Parse a window end as HH:MM, accepting HH:MM:SS with the seconds zeroed.
fn parse_window_end(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()?
        .with_second(0)?
        .with_nanosecond(0)
}
