//! Core utilities shared across the Surplus crates
//!
//! This crate provides the cross-cutting pieces the marketplace crates
//! build on:
//!
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Retry**: exponential backoff and a circuit breaker for backend calls
//! - **Rate limiting**: token bucket limiter keyed per endpoint
//! - **Validation**: fluent checks for shop-submitted listing payloads
//!
//! # Example
//!
//! ```rust,no_run
//! use surplus_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("title", "Bakery surprise bag")
//!     .calendar_date("collectionDate", "2026-08-07")
//!     .time_of_day("collectionEnd", "20:00")
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod rate_limit;
pub mod retry;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Error, ErrorCode, Result, ResultExt};
    pub use crate::rate_limit::{RateLimitConfig, RateLimiter};
    pub use crate::retry::{retry, CircuitBreaker, CircuitBreakerConfig, RetryConfig};
    pub use crate::validation::{ValidationResult, Validator};
}
