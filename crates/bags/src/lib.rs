//! Surprise-bag listings for the Surplus marketplace.
//!
//! This crate owns the bag row model and the two pieces of logic built on
//! it:
//!
//! - **Lifecycle classification**: a bag is `Live`, `Expired`, or
//!   `Cancelled`, derived on every read from its pickup window and
//!   availability flags — never stored.
//! - **Expiry sweep**: a periodic pass that pushes the terminal
//!   inactive/unavailable transition to storage for bags that expired with
//!   stale flags.
//!
//! # Example
//!
//! ```
//! use chrono::Local;
//! use surplus_bags::{classify, BagStatus};
//! # use serde_json::json;
//! # let bag = surplus_bags::Bag {
//! #     id: 1, shop_id: "s".into(), title: "t".into(), description: None,
//! #     location: json!(null), collection_date: "2999-01-01".into(),
//! #     collection_start: "17:00".into(), collection_end: "20:00".into(),
//! #     is_active: true, is_available: true, remaining_quantity: 1,
//! #     total_quantity: 1, price: None, currency: None, created_at: None,
//! #     updated_at: None, distance: None,
//! # };
//!
//! let status = classify(&bag, Local::now().naive_local());
//! assert_eq!(status, BagStatus::Live);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod lifecycle;
pub mod model;
pub mod sweep;

pub use lifecycle::{
    cancelled_bags, classify, expired_bags, expires_at, live_bags, partition, BagStatus,
    PartitionedBags,
};
pub use model::{attach_distances, Bag};
pub use sweep::{
    sweep_and_reconcile, sweep_at, BagFlagUpdate, BagStore, SweepHandle, SweepReport,
    SweepService, DEFAULT_SWEEP_INTERVAL,
};
