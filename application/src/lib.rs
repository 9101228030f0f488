//! Application layer for chorus
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::FallbackPolicy;
pub use ports::{
    event_logger::{EventLogger, LogEvent, NoEventLogger},
    progress::{ConsensusPhase, NoProgress, ProgressNotifier},
    provider_gateway::{Completion, CompletionRequest, ProviderError, ProviderGateway},
    research::{ResearchError, ResearchProvider},
};
pub use use_cases::dispatch::{
    DispatchError, DispatchInput, DispatchMode, DispatchOutput, DispatchRequestUseCase,
    DispatchResult,
};
pub use use_cases::generate_with_fallback::{
    AttemptRecord, FallbackRequest, GenerateWithFallbackUseCase, GenerationOutcome,
};
pub use use_cases::run_consensus::{ConsensusError, ConsensusInput, RunConsensusUseCase};
pub use use_cases::run_reasoning::{ReasoningError, ReasoningInput, RunReasoningUseCase};
