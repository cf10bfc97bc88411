//! Centralized API client for the Surplus hosted backend
//!
//! This crate provides a unified, resilient HTTP client for interacting
//! with the Surplus backend (Supabase Edge Functions).
//!
//! # Features
//!
//! - **Environment-based configuration**: Load URLs and keys from environment variables
//! - **Retry with exponential backoff**: Automatic retry for transient failures
//! - **Circuit breaker**: Prevent cascading failures during outages
//! - **Rate limiting**: Avoid hitting API throttling limits
//! - **Request correlation**: Track requests with unique IDs for debugging
//!
//! The [`endpoints::BagsApi`] surface implements
//! [`surplus_bags::BagStore`], so the expiry sweep in `surplus-bags` can be
//! pointed straight at the real backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use surplus_api_client::{ClientConfig, SurplusClient};
//! use surplus_bags::SweepService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client with environment configuration
//!     let client = SurplusClient::new()?;
//!
//!     // Check health
//!     let health = client.health().check().await?;
//!     println!("Service status: {}", health.status);
//!
//!     // Start the expiry sweep for the signed-in shop
//!     let sweeper = SweepService::new(client.bags(), "shop-uuid").spawn();
//!
//!     // ... shop session ...
//!     sweeper.stop();
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;

pub use client::SurplusClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::SurplusClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{BagsApi, HealthApi};
    pub use crate::error::{ApiError, ApiResult};
    pub use surplus_core::rate_limit::{RateLimitConfig, RateLimiter};
    pub use surplus_core::retry::{CircuitBreaker, CircuitBreakerConfig, CircuitState, RetryConfig};
}
