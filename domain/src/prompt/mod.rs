//! Prompt domain
//!
//! Templates for grounding system prompts with research and for
//! reconciling several provider answers into one.

mod template;

pub use template::{
    NO_QUALITY_RESPONSES, PromptTemplate, RESEARCH_CONTEXT_END, RESEARCH_CONTEXT_START,
};
