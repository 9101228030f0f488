//! Research / reasoning domain
//!
//! Pure building blocks for the iterative research loop:
//!
//! - [`pattern::ResearchPattern`]: context-type classification and the
//!   ordered follow-up aspects each pattern still has to cover
//! - [`entities::extract_entities`]: named-entity heuristics used to phrase
//!   follow-up queries
//! - [`path::CompletenessTracker`]: append-only record of research paths and
//!   the running completeness score
//! - [`synthesis::synthesize`]: structured markdown synthesis of a session
//!
//! The loop itself (I/O, time budget) lives in the application layer.

pub mod entities;
pub mod path;
pub mod pattern;
pub mod synthesis;

pub use entities::extract_entities;
pub use path::{
    CompletenessTracker, FOLLOW_UP_CONTRIBUTION, FOLLOW_UP_RELEVANCE, INITIAL_CONTRIBUTION,
    INITIAL_RELEVANCE, ReasoningConfig, ReasoningResult, ResearchPath, ResearchResponse,
};
pub use pattern::ResearchPattern;
pub use synthesis::synthesize;
