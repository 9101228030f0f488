//! Output formatter trait

use chorus_domain::OutputFormat;

/// Trait for formatting one kind of command result
pub trait OutputFormatter<T: ?Sized> {
    /// Format the complete result
    fn format(&self, result: &T) -> String;

    /// Format as JSON
    fn format_json(&self, result: &T) -> String;

    /// Format the answer only (concise output)
    fn format_synthesis_only(&self, result: &T) -> String;

    /// Format in the requested output format
    fn render(&self, result: &T, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(result),
            OutputFormat::Synthesis => self.format_synthesis_only(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}
