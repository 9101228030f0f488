//! Generation request value object

use crate::core::provider::Provider;
use serde::{Deserialize, Serialize};

/// Temperature bounds accepted by every supported provider.
pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Temperature used when the caller does not supply one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A single logical request for generated text (Value Object)
///
/// Immutable per call. The temperature is clamped into `[0, 2]` at
/// construction so adapters never see an out-of-range value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    query: String,
    system_instruction: String,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider_hint: Option<Provider>,
}

impl GenerationRequest {
    pub fn new(query: impl Into<String>, system_instruction: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            system_instruction: system_instruction.into(),
            temperature: DEFAULT_TEMPERATURE,
            provider_hint: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = if temperature.is_nan() {
            DEFAULT_TEMPERATURE
        } else {
            temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
        };
        self
    }

    pub fn with_provider_hint(mut self, provider: Provider) -> Self {
        self.provider_hint = Some(provider);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn provider_hint(&self) -> Option<Provider> {
        self.provider_hint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = GenerationRequest::new("Write a tagline", "You are a copywriter.");
        assert_eq!(request.query(), "Write a tagline");
        assert_eq!(request.temperature(), DEFAULT_TEMPERATURE);
        assert!(request.provider_hint().is_none());
    }

    #[test]
    fn test_temperature_is_clamped() {
        let hot = GenerationRequest::new("q", "s").with_temperature(3.5);
        assert_eq!(hot.temperature(), MAX_TEMPERATURE);

        let cold = GenerationRequest::new("q", "s").with_temperature(-1.0);
        assert_eq!(cold.temperature(), MIN_TEMPERATURE);

        let nan = GenerationRequest::new("q", "s").with_temperature(f32::NAN);
        assert_eq!(nan.temperature(), DEFAULT_TEMPERATURE);
    }
}
