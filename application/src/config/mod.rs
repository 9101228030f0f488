//! Application-level configuration.
//!
//! - [`FallbackPolicy`]: time and token budgets for the fallback chain

pub mod fallback_policy;

pub use fallback_policy::FallbackPolicy;
