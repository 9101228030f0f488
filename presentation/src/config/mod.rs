//! Presentation-level configuration
//!
//! Resolves how results are displayed from CLI flags and the `[output]`
//! config section.

use crate::cli::commands::OutputFormat as CliOutputFormat;
use chorus_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// The CLI flag wins over the config file, which wins over the default.
    pub fn resolve(
        cli_format: Option<CliOutputFormat>,
        file_format: Option<OutputFormat>,
        color: bool,
        quiet: bool,
    ) -> Self {
        let format = cli_format
            .map(OutputFormat::from)
            .or(file_format)
            .unwrap_or_default();
        Self {
            format,
            color,
            // JSON goes to stdout for machines; keep the terminal quiet
            show_progress: !quiet && format != OutputFormat::Json,
        }
    }

    /// Apply the color setting to all `colored` output in this process.
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}
