//! Console output formatter for chorus results

use crate::output::formatter::OutputFormatter;
use chorus_application::{DispatchOutput, DispatchResult, GenerationOutcome};
use chorus_domain::{ConfidenceLevel, ConsensusResult, ReasoningResult, RouteDecision};
use colored::Colorize;
use serde::Serialize;

/// Formats command results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    fn to_json<T: Serialize + ?Sized>(result: &T) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    fn notice(message: &Option<String>) -> String {
        match message {
            Some(m) => format!("{} {}\n", "Note:".yellow().bold(), m),
            None => String::new(),
        }
    }

    fn confidence(level: ConfidenceLevel) -> String {
        match level {
            ConfidenceLevel::High => level.as_str().green().bold().to_string(),
            ConfidenceLevel::Medium => level.as_str().yellow().bold().to_string(),
            ConfidenceLevel::Low => level.as_str().red().bold().to_string(),
        }
    }

    fn generation_body(outcome: &GenerationOutcome) -> String {
        let mut output = String::new();

        let served = match &outcome.model_id {
            Some(model) => format!("{} ({})", outcome.provider, model),
            None => outcome.provider.clone(),
        };
        let served = if outcome.is_placeholder() {
            served.red().bold()
        } else if outcome.fallback {
            served.yellow().bold()
        } else {
            served.green().bold()
        };
        output.push_str(&format!("{} {}\n", "Served by:".cyan().bold(), served));

        if !outcome.attempts.is_empty() {
            output.push_str(&Self::section_header("Failed Attempts"));
            for attempt in &outcome.attempts {
                output.push_str(&format!(
                    "  {} {} after {} ms: {}\n",
                    "x".red(),
                    attempt.step,
                    attempt.elapsed_ms,
                    attempt.error
                ));
            }
        }

        output.push_str(&Self::notice(&outcome.message));
        output.push_str(&Self::section_header("Response"));
        output.push_str(&format!("\n{}\n", outcome.content));
        output
    }

    fn reasoning_body(result: &ReasoningResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} queries, completeness {:.2}, {} ms\n",
            "Research:".cyan().bold(),
            result.query_count,
            result.completeness_score,
            result.elapsed_ms
        ));

        output.push_str(&Self::section_header("Research Paths"));
        for path in &result.paths {
            output.push_str(&format!(
                "\n{}\n  {} {}\n  relevance {:.2}, contribution {:.2}, {} citations\n",
                format!("── [{}] {} ──", path.iteration, path.rationale)
                    .yellow()
                    .bold(),
                "Query:".dimmed(),
                path.query,
                path.relevance_score,
                path.completeness_contribution,
                path.citations.len()
            ));
        }

        output.push_str(&Self::section_header("Synthesized Findings"));
        output.push_str(&format!("\n{}\n", result.synthesized_text));
        output
    }

    fn consensus_body(result: &ConsensusResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} (score {:.2}, {} of the enabled providers passed, {} ms)\n",
            "Confidence:".cyan().bold(),
            Self::confidence(result.confidence_level),
            result.consensus_score,
            result.survivor_count(),
            result.elapsed_ms
        ));
        if let Some(provider) = result.synthesis_provider {
            output.push_str(&format!("{} {}\n", "Synthesizer:".cyan().bold(), provider));
        }
        output.push_str(&Self::notice(&result.message));

        if !result.responses.is_empty() {
            output.push_str(&Self::section_header("Provider Responses"));
            for response in &result.responses {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!(
                        "── {} ({}) quality {:.2}, {} ms ──",
                        response.provider,
                        response.model_id,
                        response.quality_score,
                        response.latency_ms
                    )
                    .yellow()
                    .bold(),
                    response.text
                ));
            }
        }

        output.push_str(&Self::section_header("Consensus"));
        output.push_str(&format!("\n{}\n", result.synthesized_text));
        output
    }

    fn route_body(decision: &RouteDecision) -> String {
        format!(
            "{} {}\n{} {}\n{} {}\n{} {}\n{} {}\n",
            "Category:".cyan().bold(),
            decision.category,
            "Provider:".cyan().bold(),
            decision.provider.to_string().green().bold(),
            "Model:".cyan().bold(),
            decision.model,
            "Reasoning:".cyan().bold(),
            if decision.use_reasoning { "yes" } else { "no" },
            "Rationale:".cyan().bold(),
            decision.rationale
        )
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter<GenerationOutcome> for ConsoleFormatter {
    fn format(&self, outcome: &GenerationOutcome) -> String {
        let mut output = Self::header("Generation");
        output.push('\n');
        output.push_str(&Self::generation_body(outcome));
        output.push_str(&Self::footer());
        output
    }

    fn format_json(&self, outcome: &GenerationOutcome) -> String {
        Self::to_json(outcome)
    }

    fn format_synthesis_only(&self, outcome: &GenerationOutcome) -> String {
        format!("{}\n", outcome.content)
    }
}

impl OutputFormatter<ReasoningResult> for ConsoleFormatter {
    fn format(&self, result: &ReasoningResult) -> String {
        let mut output = Self::header("Research");
        output.push('\n');
        output.push_str(&Self::reasoning_body(result));
        output.push_str(&Self::footer());
        output
    }

    fn format_json(&self, result: &ReasoningResult) -> String {
        Self::to_json(result)
    }

    fn format_synthesis_only(&self, result: &ReasoningResult) -> String {
        format!("{}\n", result.synthesized_text)
    }
}

impl OutputFormatter<ConsensusResult> for ConsoleFormatter {
    fn format(&self, result: &ConsensusResult) -> String {
        let mut output = Self::header("Consensus Results");
        output.push('\n');
        output.push_str(&Self::consensus_body(result));
        output.push_str(&Self::footer());
        output
    }

    fn format_json(&self, result: &ConsensusResult) -> String {
        Self::to_json(result)
    }

    fn format_synthesis_only(&self, result: &ConsensusResult) -> String {
        format!(
            "{}\n\n{} {}\n",
            result.synthesized_text,
            "Confidence:".dimmed(),
            Self::confidence(result.confidence_level)
        )
    }
}

impl OutputFormatter<RouteDecision> for ConsoleFormatter {
    fn format(&self, decision: &RouteDecision) -> String {
        let mut output = Self::header("Routing Decision");
        output.push('\n');
        output.push_str(&Self::route_body(decision));
        output.push_str(&Self::footer());
        output
    }

    fn format_json(&self, decision: &RouteDecision) -> String {
        Self::to_json(decision)
    }

    fn format_synthesis_only(&self, decision: &RouteDecision) -> String {
        Self::route_body(decision)
    }
}

impl OutputFormatter<DispatchOutput> for ConsoleFormatter {
    fn format(&self, output: &DispatchOutput) -> String {
        let mut text = Self::header("Chorus");
        text.push('\n');
        text.push_str(&Self::section_header("Routing"));
        text.push_str(&Self::route_body(&output.decision));

        match &output.result {
            DispatchResult::Single { grounding, outcome } => {
                if let Some(grounding) = grounding {
                    text.push_str(&Self::section_header("Grounding"));
                    text.push_str(&Self::indent(&Self::reasoning_body(grounding), "  "));
                    text.push('\n');
                }
                text.push_str(&Self::section_header("Generation"));
                text.push_str(&Self::generation_body(outcome));
            }
            DispatchResult::Consensus(result) => {
                text.push_str(&Self::section_header("Consensus"));
                text.push_str(&Self::consensus_body(result));
            }
        }

        text.push_str(&Self::footer());
        text
    }

    fn format_json(&self, output: &DispatchOutput) -> String {
        Self::to_json(output)
    }

    fn format_synthesis_only(&self, output: &DispatchOutput) -> String {
        match &output.result {
            DispatchResult::Single { outcome, .. } => {
                OutputFormatter::<GenerationOutcome>::format_synthesis_only(self, outcome)
            }
            DispatchResult::Consensus(result) => {
                OutputFormatter::<ConsensusResult>::format_synthesis_only(self, result)
            }
        }
    }
}
