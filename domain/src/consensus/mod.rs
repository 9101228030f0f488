//! Multi-provider consensus domain
//!
//! Several providers answer the same query independently. Each answer is
//! scored for quality, weak answers are dropped, and the survivors are
//! compared with one another to estimate how far the providers agree.
//!
//! # Flow
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌──────────┐
//! │Provider A│   │Provider B│   │Provider C│   concurrent, settle-all
//! └────┬─────┘   └────┬─────┘   └────┬─────┘
//!      └──────────────┼──────────────┘
//!                     ▼
//!          quality_score() ≥ threshold?      drop the rest
//!                     ▼
//!       0 → "no quality responses" message
//!       1 → returned verbatim
//!      2+ → synthesis provider reconciles
//!                     ▼
//!     consensus_score() + shares_query_keyword() → ConfidenceLevel
//! ```

pub mod confidence;
pub mod config;
pub mod response;
pub mod result;
pub mod scoring;

pub use confidence::ConfidenceLevel;
pub use config::ProviderConfig;
pub use response::ModelResponse;
pub use result::ConsensusResult;
pub use scoring::{consensus_score, keyword_overlap, quality_score, shares_query_keyword};
