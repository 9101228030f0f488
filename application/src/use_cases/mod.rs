//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod dispatch;
pub mod generate_with_fallback;
pub mod run_consensus;
pub mod run_reasoning;

#[cfg(test)]
pub(crate) mod test_support;
