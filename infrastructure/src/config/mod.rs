//! Configuration file loading for chorus
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CHORUS_*` environment variables (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./chorus.toml` or `./.chorus.toml`
//! 4. Global: `~/.config/chorus/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAnthropicConfig, FileConfig, FileConsensusConfig, FileFallbackConfig, FileGeminiConfig,
    FileOpenAiConfig, FileOutputConfig, FileProvidersConfig, FileResearchConfig,
};
pub use loader::{ConfigError, ConfigLoader};
