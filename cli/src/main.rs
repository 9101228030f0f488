//! CLI entrypoint for chorus
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use chorus_application::{
    ConsensusInput, DispatchInput, DispatchMode, DispatchRequestUseCase, EventLogger,
    FallbackRequest, GenerateWithFallbackUseCase, NoEventLogger, NoProgress, ProgressNotifier,
    ProviderGateway, ReasoningInput, ResearchProvider, RunConsensusUseCase, RunReasoningUseCase,
};
use chorus_domain::{GenerationRequest, ProviderConfig, RouteOverrides, Router, Severity};
use chorus_infrastructure::{
    ConfigLoader, FileConfig, JsonlEventLogger, PerplexityResearch, RoutingGateway,
};
use chorus_presentation::{
    AskArgs, Cli, Command, ConsensusArgs, ConsoleFormatter, GenerateArgs, OutputConfig,
    OutputFormatter, ProgressReporter, ResearchArgs, RoutingArgs,
};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };
    check_config(&config)?;

    let Some(command) = cli.command else {
        bail!("No command given. Run `chorus --help` for usage.");
    };

    info!("Starting chorus");

    let output = OutputConfig::resolve(
        cli.output,
        config.output.format,
        config.output.color,
        cli.quiet,
    );
    output.apply_color();

    // === Dependency Injection ===
    let gateway: Arc<dyn ProviderGateway> =
        Arc::new(RoutingGateway::from_config(&config.providers));
    let research: Arc<dyn ResearchProvider> = Arc::new(PerplexityResearch::new(&config.research));
    let event_logger: Arc<dyn EventLogger> = match &cli.event_log {
        Some(path) => Arc::new(
            JsonlEventLogger::open(path)
                .with_context(|| format!("Could not open event log {}", path.display()))?,
        ),
        None => Arc::new(NoEventLogger),
    };
    let progress: Box<dyn ProgressNotifier> = if output.show_progress {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(NoProgress)
    };

    let app = App {
        config: &config,
        gateway,
        research,
        event_logger,
        progress: progress.as_ref(),
        output,
    };

    let rendered = match command {
        Command::Generate(args) => app.generate(args).await,
        Command::Research(args) => app.research(args).await?,
        Command::Consensus(args) => app.consensus(args).await?,
        Command::Route(args) => {
            let overrides = overrides(&args.routing);
            let decision = Router::classify(&args.query, &args.routing.context, &overrides);
            ConsoleFormatter.render(&decision, output.format)
        }
        Command::Ask(args) => app.ask(args).await?,
    };

    println!("{}", rendered);

    Ok(())
}

/// Route tracing output to stderr, or to `log_file` through a non-blocking writer.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Could not create log directory {}", directory.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

/// Print configuration issues; errors abort the run.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("{}", issue),
            Severity::Warning => warn!("{}", issue),
        }
    }
    if issues.iter().any(|issue| issue.is_error()) {
        bail!("Invalid configuration");
    }
    Ok(())
}

fn overrides(args: &RoutingArgs) -> RouteOverrides {
    let mut overrides = RouteOverrides::none().with_force_reasoning(args.force_reasoning);
    if let Some(provider) = args.provider {
        overrides = overrides.with_provider(provider);
    }
    if let Some(model) = &args.model {
        overrides = overrides.with_model(model.clone());
    }
    overrides
}

/// Wired dependencies shared by every command
struct App<'a> {
    config: &'a FileConfig,
    gateway: Arc<dyn ProviderGateway>,
    research: Arc<dyn ResearchProvider>,
    event_logger: Arc<dyn EventLogger>,
    progress: &'a dyn ProgressNotifier,
    output: OutputConfig,
}

impl App<'_> {
    fn consensus_config(&self) -> ProviderConfig {
        self.config.consensus.to_provider_config().0
    }

    async fn generate(&self, args: GenerateArgs) -> String {
        let provider = args.provider.unwrap_or_default();
        let model = args
            .model
            .unwrap_or_else(|| self.config.providers.model(provider));

        let mut request = GenerationRequest::new(args.prompt, args.system.unwrap_or_default());
        if let Some(provider) = args.provider {
            request = request.with_provider_hint(provider);
        }
        if let Some(temperature) = args.temperature {
            request = request.with_temperature(temperature);
        }

        let use_case = GenerateWithFallbackUseCase::new(Arc::clone(&self.gateway))
            .with_policy(self.config.fallback.to_policy())
            .with_event_logger(Arc::clone(&self.event_logger));
        let outcome = use_case
            .execute_with_progress(FallbackRequest::new(model, request), self.progress)
            .await;

        ConsoleFormatter.render(&outcome, self.output.format)
    }

    async fn research(&self, args: ResearchArgs) -> Result<String> {
        let mut config = self.config.reasoning;
        if let Some(max) = args.max_iterations {
            config = config.with_max_iterations(max);
        }
        if let Some(threshold) = args.threshold {
            config = config.with_completeness_threshold(threshold);
        }
        if let Some(timeout_ms) = args.timeout_ms {
            config = config.with_timeout_ms(timeout_ms);
        }

        let use_case = RunReasoningUseCase::new(Arc::clone(&self.research))
            .with_event_logger(Arc::clone(&self.event_logger));
        let result = use_case
            .execute_with_progress(
                ReasoningInput::new(args.query, args.context).with_config(config),
                self.progress,
            )
            .await?;

        Ok(ConsoleFormatter.render(&result, self.output.format))
    }

    async fn consensus(&self, args: ConsensusArgs) -> Result<String> {
        let base = self.consensus_config();
        let mut config = if args.providers.is_empty() {
            base.clone()
        } else {
            ProviderConfig::new(args.providers)
                .with_synthesis_provider(base.synthesis_provider)
                .with_quality_threshold(base.quality_threshold)
                .with_reasoning(base.use_reasoning)
        };
        if let Some(provider) = args.synthesizer {
            config = config.with_synthesis_provider(provider);
        }
        if let Some(threshold) = args.quality_threshold {
            config = config.with_quality_threshold(threshold);
        }
        if args.reasoning {
            config = config.with_reasoning(true);
        }

        let use_case =
            RunConsensusUseCase::new(Arc::clone(&self.gateway), Arc::clone(&self.research))
                .with_reasoning_config(self.config.reasoning)
                .with_query_timeout(self.config.fallback.to_policy().fallback_timeout)
                .with_event_logger(Arc::clone(&self.event_logger));
        let input = ConsensusInput::new(args.query, config)
            .with_research_context(args.context)
            .with_system_prompt(args.system.unwrap_or_default());
        let result = use_case.execute_with_progress(input, self.progress).await?;

        Ok(ConsoleFormatter.render(&result, self.output.format))
    }

    async fn ask(&self, args: AskArgs) -> Result<String> {
        let mode = if args.consensus {
            DispatchMode::Consensus
        } else {
            DispatchMode::Single
        };
        let input = DispatchInput::new(args.query)
            .with_context(args.routing.context.clone())
            .with_system_prompt(args.system.unwrap_or_default())
            .with_overrides(overrides(&args.routing))
            .with_mode(mode);

        let use_case =
            DispatchRequestUseCase::new(Arc::clone(&self.gateway), Arc::clone(&self.research))
                .with_fallback_policy(self.config.fallback.to_policy())
                .with_reasoning_config(self.config.reasoning)
                .with_consensus_config(self.consensus_config())
                .with_event_logger(Arc::clone(&self.event_logger));
        let output = use_case.execute_with_progress(input, self.progress).await?;

        Ok(ConsoleFormatter.render(&output, self.output.format))
    }
}
