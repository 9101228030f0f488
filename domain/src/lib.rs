//! Domain layer for chorus
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Fallback generation
//!
//! A request is served by the first provider in a [`FallbackChain`] that
//! answers. The chain ends with a simplified retry of the primary provider
//! and, if that fails too, a local placeholder.
//!
//! ## Reasoning
//!
//! The research loop classifies the request into a [`ResearchPattern`] and
//! issues follow-up queries until the [`CompletenessTracker`] reaches its
//! target or the budget runs out.
//!
//! ## Consensus
//!
//! Several providers answer the same query. Responses are scored with
//! [`quality_score`], filtered, compared with [`consensus_score`] and merged.
//!
//! ## Routing
//!
//! [`Router`] picks a provider, a model and whether to reason first.

pub mod config;
pub mod consensus;
pub mod core;
pub mod generation;
pub mod prompt;
pub mod research;
pub mod routing;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use consensus::{
    ConfidenceLevel, ConsensusResult, ModelResponse, ProviderConfig, consensus_score,
    keyword_overlap, quality_score, shares_query_keyword,
};
pub use core::{error::DomainError, model::Model, provider::Provider};
pub use generation::{FallbackChain, FallbackStep, GenerationRequest, ServedBy, placeholder_content};
pub use prompt::PromptTemplate;
pub use research::{
    CompletenessTracker, ReasoningConfig, ReasoningResult, ResearchPath, ResearchPattern,
    ResearchResponse, extract_entities, synthesize,
};
pub use routing::{RouteCategory, RouteDecision, RouteOverrides, Router};
