// Wed Jan 21 2026 - Alex

use super::args::{Args, Command, HooksArgs, ResolveArgs};
use crate::config::Config;
use crate::detect::ValuePolicy;
use crate::hook::{FeatureStatusTracker, HookRole, RecordingSubstrate};
use crate::notify::{EventNotifier, LogSink, ObservationSession, ThreadDelayScheduler};
use crate::pipeline::{Pipeline, PipelineReport};
use crate::query::InMemoryIndex;
use crate::utils::{format_duration, measure_time, LoggingUtils};
use anyhow::Context;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::RwLock;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub struct CommandHandler {
    quiet: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    pub fn execute(mut self, args: Args) -> anyhow::Result<()> {
        self.quiet = args.quiet;
        LoggingUtils::init(LoggingUtils::level_from_str(&args.log_level));

        let config = match args.config {
            Some(ref path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => Config::default(),
        };
        config.validate().map_err(|e| anyhow::anyhow!(e))?;

        match args.command {
            Command::Resolve(resolve_args) => self.handle_resolve(resolve_args, config),
            Command::Hooks(hooks_args) => self.handle_hooks(hooks_args, config),
        }
    }

    fn handle_resolve(&self, args: ResolveArgs, config: Config) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let (report, elapsed) = self.run(&args.index, config)?;
        self.print_resolution(&report);

        if let Some(ref output) = args.output {
            let json = serde_json::to_string_pretty(&report)?;
            fs::write(output, json).with_context(|| format!("writing {}", output.display()))?;
            println!("{} Report saved to: {}", "[+]".green(), output.display());
        }

        println!("{} Done in {}", "[+]".green(), format_duration(elapsed));
        Ok(())
    }

    fn handle_hooks(&self, args: HooksArgs, config: Config) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let config = if args.log_both {
            config.with_value_policy(ValuePolicy::LogBoth)
        } else {
            config
        };

        let (report, elapsed) = self.run(&args.index, config)?;
        self.print_hooks(&report);

        println!("{} Done in {}", "[+]".green(), format_duration(elapsed));
        Ok(())
    }

    /// Loads the index and runs the start-up pass against a substrate that
    /// only records what would have been hooked.
    fn run(&self, index_path: &Path, config: Config) -> anyhow::Result<(PipelineReport, Duration)> {
        let spinner = self.spinner(&format!("Loading {}", index_path.display()));
        let index = InMemoryIndex::load(index_path).with_context(|| format!("loading {}", index_path.display()))?;
        spinner.finish_and_clear();

        println!("{} Indexed {} methods", "[*]".blue(), index.len());

        let notifier = EventNotifier::new(
            Arc::new(ObservationSession::new()),
            Arc::new(LogSink),
            Arc::new(ThreadDelayScheduler),
            Arc::new(RwLock::new(config.features)),
        )
        .with_clear_delay(Duration::from_millis(config.notify.clear_delay_ms))
        .with_value_policy(config.detector.value_policy);

        let pipeline = Pipeline::new(
            config,
            Arc::new(RecordingSubstrate::new()),
            Arc::new(notifier),
            Arc::new(FeatureStatusTracker::new()),
        );

        Ok(measure_time(|| pipeline.run(&index)))
    }

    fn spinner(&self, message: &str) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    fn print_resolution(&self, report: &PipelineReport) {
        println!();
        println!("{}", "Follow status".cyan().bold());
        println!("{}", "-".repeat(40).cyan());

        match report.follow {
            Some(ref result) => {
                let confidence = format!("{:.0}%", result.confidence * 100.0);
                let confidence = if result.is_high_confidence() {
                    confidence.green()
                } else {
                    confidence.yellow()
                };
                println!("  Strategy:  {} [{}]", result.strategy.to_string().cyan(), confidence);
                println!("  Primary:   {}", result.primary.to_string().green());
                match result.companion {
                    Some(ref companion) => println!("  Companion: {}", companion.to_string().green()),
                    None => println!("  Companion: {}", "-".dimmed()),
                }
                println!(
                    "  Identity:  {}",
                    report.identifier_type.as_deref().unwrap_or("-")
                );
            }
            None => {
                let attempted: Vec<String> = report.attempted.iter().map(|t| t.to_string()).collect();
                println!("  {} (tried {})", "Not found".red(), attempted.join(", "));
            }
        }

        println!();
        println!("{}", "Story signals".cyan().bold());
        println!("{}", "-".repeat(40).cyan());

        if report.signals.is_empty() {
            println!("  {}", "None".dimmed());
        }
        for signal in &report.signals {
            println!(
                "  {} {} ({:?})",
                signal.method.key().cyan(),
                serde_json::to_string(&signal.kind).unwrap_or_default().dimmed(),
                signal.source
            );
        }
        println!();
    }

    fn print_hooks(&self, report: &PipelineReport) {
        println!();
        println!("{}", "Hook points".cyan().bold());
        println!("{}", "-".repeat(40).cyan());

        let installed = report.follow_hooks.installed.iter().chain(&report.signal_hooks.installed);
        for point in installed {
            let role = match point.role {
                HookRole::Primary => "primary".green(),
                HookRole::Companion => "companion".green(),
                HookRole::IdentifierAccessor => "identifier".blue(),
                HookRole::Signal(_) => "signal".yellow(),
            };
            println!("  [{}] {}.{}", role, point.type_name, point.method_name);
        }

        let failures = report.follow_hooks.failures.iter().chain(&report.signal_hooks.failures);
        for failure in failures.chain(report.follow_error.iter()) {
            println!("  {} {}", "[!]".red(), failure);
        }

        println!();
        println!("{}", "Features".cyan().bold());
        println!("{}", "-".repeat(40).cyan());
        if report.status.is_empty() {
            println!("  {}", "Nothing hooked".red());
        }
        for (feature, count) in &report.status {
            println!("  {}: {} hook(s)", feature, count.to_string().green());
        }
        println!();
        println!(
            "{} {} hooks planned, {} failures",
            "[+]".green(),
            report.hook_count(),
            report.failure_count()
        );
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
