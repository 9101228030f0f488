//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::Provider`]: the fixed set of text-generation providers
//! - [`model::Model`]: model identifiers and their provider family
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod provider;
pub mod string;
