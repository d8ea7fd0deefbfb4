//! Colorful console output for evolution runs.
//!
//! Provides a custom `tracing` layer that formats engine events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (run start/end, abort requested)
//! - **DEBUG**: Per-generation statistics and abort resets

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "evoforge_engine=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. The
/// `RUST_LOG` environment variable overrides the default filter.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(
                DEFAULT_DIRECTIVE
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            )
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(EvolutionConsoleLayer)
            .try_init();
    });
}

fn elapsed_secs() -> f64 {
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// A tracing layer that formats evolution events with colors.
pub struct EvolutionConsoleLayer;

impl<S: Subscriber> Layer<S> for EvolutionConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("evoforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    generation: Option<u64>,
    generations: Option<u64>,
    conditions: Option<u64>,
    duration_ms: Option<u64>,
    best_fitness: Option<f64>,
    mean_fitness: Option<f64>,
    natural_fitness: Option<bool>,
    satisfied: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "message" => self.message = Some(s),
            "satisfied" => self.satisfied = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "generation" => self.generation = Some(value),
            "generations" => self.generations = Some(value),
            "conditions" => self.conditions = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "best_fitness" => self.best_fitness = Some(value),
            "mean_fitness" => self.mean_fitness = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "natural_fitness" {
            self.natural_fitness = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            "satisfied" => self.satisfied = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "evolve_start" => format_evolve_start(v),
        "evolve_end" => format_evolve_end(v),
        "progress" => format_generation(v, "⚡"),
        "generation" if level == Level::DEBUG => format_generation(v, "·"),
        "abort_requested" => format!(
            "{} {} Abort requested",
            format_elapsed(),
            "✖".bright_red().bold()
        ),
        "abort_reset" => format!(
            "{} {} Abort control re-armed",
            format_elapsed(),
            "↺".bright_black()
        ),
        "" if level <= Level::WARN => format_message(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs()).bright_black().to_string()
}

fn format_evolve_start(v: &EventVisitor) -> String {
    let conditions = v.conditions.unwrap_or(0);
    let direction = if v.natural_fitness.unwrap_or(true) {
        "maximizing"
    } else {
        "minimizing"
    };

    format!(
        "{} {} Evolving │ {} termination conditions │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        conditions.to_formatted_string(&Locale::en).bright_yellow(),
        direction.bright_magenta()
    )
}

fn format_evolve_end(v: &EventVisitor) -> String {
    let generations = v.generations.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);
    let satisfied = v.satisfied.as_deref().unwrap_or("unknown");
    let aborted = satisfied.split(", ").any(|name| name == "UserAbort");

    let status = if aborted {
        "ABORTED".bright_red().bold().to_string()
    } else {
        "COMPLETE".bright_green().bold().to_string()
    };

    format!(
        "{} {} Evolution {} │ {} generations │ {} │ best {} │ stopped by {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        status,
        generations.to_formatted_string(&Locale::en).white(),
        format_duration_ms(duration).yellow(),
        format_fitness(v.best_fitness),
        satisfied.white().bold()
    )
}

fn format_generation(v: &EventVisitor, marker: &str) -> String {
    let generation = v.generation.unwrap_or(0);

    format!(
        "{} {} gen {:>8} │ best {} │ mean {}",
        format_elapsed(),
        marker.bright_cyan(),
        generation.to_formatted_string(&Locale::en).white(),
        format_fitness(v.best_fitness),
        format_fitness(v.mean_fitness)
    )
}

fn format_message(v: &EventVisitor, level: Level) -> String {
    let message = v.message.as_deref().unwrap_or("");
    let tag = if level == Level::ERROR {
        "ERROR".bright_red().bold().to_string()
    } else {
        "WARN".yellow().bold().to_string()
    };
    format!("{} {} {}", format_elapsed(), tag, message)
}

fn format_fitness(fitness: Option<f64>) -> String {
    match fitness {
        Some(f) => format!("{:.4}", f).bright_green().to_string(),
        None => "N/A".bright_black().to_string(),
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1_000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1_000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1_000)
    }
}
