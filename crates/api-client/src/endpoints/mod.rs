//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a specific set of backend
//! endpoints.
//!
//! ## Mapping to the Surplus backend
//!
//! | Module | Backend Function | Description |
//! |--------|-----------------|-------------|
//! | `bags` | `api-v1-bags` | Surprise-bag listings CRUD + flag updates |
//! | `health` | `health` | Health check endpoints |

pub mod bags;
pub mod health;

pub use bags::BagsApi;
pub use health::HealthApi;
