//! CLI command definitions

use chorus_domain::{Model, Provider};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Answer plus per-provider responses, scores and research paths
    Full,
    /// Only the final answer
    Synthesis,
    /// JSON output
    Json,
}

impl From<OutputFormat> for chorus_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => chorus_domain::OutputFormat::Full,
            OutputFormat::Synthesis => chorus_domain::OutputFormat::Synthesis,
            OutputFormat::Json => chorus_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for chorus
#[derive(Parser, Debug)]
#[command(name = "chorus")]
#[command(author, version, about = "Multi-provider LLM orchestration with research grounding")]
#[command(long_about = r#"
Chorus sends a request to one or more LLM providers (Anthropic, OpenAI, Gemini).

  generate   One provider with automatic fallback to the others
  research   Iterative web research that stops once the topic is covered
  consensus  Every enabled provider in parallel, then one synthesized answer
  route      Show which provider a request would be routed to
  ask        Route the request, ground it if needed, and answer it

Configuration files are loaded from (in priority order):
1. CHORUS_* environment variables
2. --config <path>     Explicit config file
3. ./chorus.toml       Project-level config
4. ~/.config/chorus/config.toml   Global config

Example:
  chorus ask --context "competitive analysis" "Analyze competitor pricing for wireless earbuds"
  chorus consensus -p anthropic -p gemini "Summarize the state of solid-state batteries"
  chorus generate --model gpt-4o "Write a tagline for a running shoe"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (defaults to the config file's, else synthesis)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Append structured JSONL events to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub event_log: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate text from one provider, falling back to the others on failure
    Generate(GenerateArgs),
    /// Run the iterative research loop
    Research(ResearchArgs),
    /// Query every enabled provider and synthesize a consensus answer
    Consensus(ConsensusArgs),
    /// Show the routing decision for a request without calling any provider
    Route(RouteArgs),
    /// Route, optionally ground, and answer a request
    Ask(AskArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// The prompt to send
    pub prompt: String,

    /// Requested model; its family picks the primary provider
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<Model>,

    /// Primary provider (overrides the model's family)
    #[arg(long, value_name = "PROVIDER")]
    pub provider: Option<Provider>,

    /// System instruction
    #[arg(short, long, value_name = "TEXT")]
    pub system: Option<String>,

    /// Sampling temperature
    #[arg(short, long)]
    pub temperature: Option<f32>,
}

#[derive(Args, Debug)]
pub struct ResearchArgs {
    /// The research question
    pub query: String,

    /// Business context that selects the research pattern
    #[arg(short, long, default_value = "")]
    pub context: String,

    /// Maximum follow-up queries
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<usize>,

    /// Completeness score at which research stops
    #[arg(long, value_name = "X")]
    pub threshold: Option<f64>,

    /// Time budget in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ConsensusArgs {
    /// The question to answer
    pub query: String,

    /// Research context for grounding
    #[arg(short, long, default_value = "")]
    pub context: String,

    /// System instruction
    #[arg(short, long, value_name = "TEXT")]
    pub system: Option<String>,

    /// Providers to query (can be specified multiple times)
    #[arg(short, long = "provider", value_name = "PROVIDER")]
    pub providers: Vec<Provider>,

    /// Provider that reconciles the surviving responses
    #[arg(long, value_name = "PROVIDER")]
    pub synthesizer: Option<Provider>,

    /// Minimum quality score for a response to count
    #[arg(long, value_name = "X")]
    pub quality_threshold: Option<f64>,

    /// Ground with the full research loop instead of a single query
    #[arg(long)]
    pub reasoning: bool,
}

/// Routing arguments shared by `route` and `ask`
#[derive(Args, Debug)]
pub struct RoutingArgs {
    /// Business context used for classification
    #[arg(short, long, default_value = "")]
    pub context: String,

    /// Send to this provider regardless of classification
    #[arg(long, value_name = "PROVIDER")]
    pub provider: Option<Provider>,

    /// Send to this model (its family overrides classification)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<Model>,

    /// Ground with research even when a manual override is used
    #[arg(long)]
    pub force_reasoning: bool,
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// The request to classify
    pub query: String,

    #[command(flatten)]
    pub routing: RoutingArgs,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The request to answer
    pub query: String,

    #[command(flatten)]
    pub routing: RoutingArgs,

    /// System instruction
    #[arg(short, long, value_name = "TEXT")]
    pub system: Option<String>,

    /// Answer with every provider and a synthesized consensus
    #[arg(long)]
    pub consensus: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_consensus_providers() {
        let cli = Cli::try_parse_from([
            "chorus",
            "consensus",
            "-p",
            "anthropic",
            "-p",
            "gemini",
            "--synthesizer",
            "gemini",
            "What changed?",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Consensus(args)) => {
                assert_eq!(args.providers, vec![Provider::Anthropic, Provider::Gemini]);
                assert_eq!(args.synthesizer, Some(Provider::Gemini));
                assert_eq!(args.query, "What changed?");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["chorus", "route", "hello", "-vv", "-o", "json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let result = Cli::try_parse_from(["chorus", "ask", "--provider", "mistral", "hi"]);
        assert!(result.is_err());
    }
}
