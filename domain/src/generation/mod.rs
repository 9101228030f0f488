//! Single-provider generation: requests and the provider fallback chain.
//!
//! A [`GenerationRequest`] is immutable once built. The [`FallbackChain`]
//! lists the strategies the fallback generator tries, in order, until one
//! produces text. When every step fails the caller receives a locally built
//! [`placeholder_content`] instead of an error.

pub mod fallback;
pub mod request;

pub use fallback::{FallbackChain, FallbackStep, ServedBy, placeholder_content};
pub use request::GenerationRequest;
