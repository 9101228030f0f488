//! Research service adapters

pub mod perplexity;

pub use perplexity::PerplexityResearch;
