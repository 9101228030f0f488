//! Progress reporting for research, fallback and consensus runs

use chorus_application::{ConsensusPhase, ProgressNotifier};
use chorus_domain::{FallbackStep, Provider};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with indicatif bars and spinners
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
    research_spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
            research_spinner: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn phase_display_name(phase: ConsensusPhase) -> &'static str {
        match phase {
            ConsensusPhase::Grounding => "Grounding",
            ConsensusPhase::Query => "Querying providers",
            ConsensusPhase::Synthesis => "Synthesizing",
        }
    }

    fn finish_research(&self) {
        if let Ok(mut spinner) = self.research_spinner.lock()
            && let Some(pb) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: ConsensusPhase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_display_name(phase));
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.phase_bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_task_complete(&self, _phase: ConsensusPhase, provider: Provider, success: bool) {
        if let Ok(bar) = self.phase_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), provider)
            } else {
                format!("{} {}", "x".red(), provider)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: ConsensusPhase) {
        if phase == ConsensusPhase::Grounding {
            self.finish_research();
        }
        if let Ok(mut bar) = self.phase_bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!("{} complete!", phase.as_str().green()));
        }
    }

    fn on_research_query(&self, iteration: usize, query: &str) {
        let Ok(mut spinner) = self.research_spinner.lock() else {
            return;
        };
        let pb = spinner.get_or_insert_with(|| {
            let pb = self.multi.add(ProgressBar::new_spinner());
            pb.set_style(Self::spinner_style());
            pb.set_prefix("Research");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        let label = if iteration == 0 {
            "initial".to_string()
        } else {
            format!("follow-up {}", iteration)
        };
        pb.set_message(format!("{}: {}", label.cyan(), query));
    }

    fn on_fallback_attempt(&self, step: &FallbackStep, success: bool) {
        let line = if success {
            format!("{} {}", "v".green(), step)
        } else {
            format!("{} {} failed, trying next", "x".red(), step)
        };
        let _ = self.multi.println(line);
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: ConsensusPhase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            ProgressReporter::phase_display_name(phase).bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _phase: ConsensusPhase, provider: Provider, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), provider);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), provider);
        }
    }

    fn on_phase_complete(&self, _phase: ConsensusPhase) {
        eprintln!();
    }

    fn on_research_query(&self, iteration: usize, query: &str) {
        eprintln!("  {} [{}] {}", "?".cyan(), iteration, query);
    }

    fn on_fallback_attempt(&self, step: &FallbackStep, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), step);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), step);
        }
    }
}
