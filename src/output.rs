//! Colored messages, section headers, spinners and report rendering.

use crate::constants::PROGRESS_TICK_MS;
use crate::doctor::{Check, CheckStatus};
use crate::setup::SetupSummary;
use colored::Colorize;
use dialoguer::console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::debug;

pub fn success(msg: &str) {
    println!("{} {}", "✔".green().bold(), msg.green());
}

pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow().bold(), msg.yellow());
}

pub fn error(msg: &str) {
    println!("{} {}", "✘".red().bold(), msg.red());
}

pub fn info(msg: &str) {
    println!("{} {}", "ℹ".cyan().bold(), msg.cyan());
}

pub fn header(title: &str) {
    let line = "=".repeat(40).magenta();
    println!("{}\n {}\n{}", line, title.cyan().bold(), line);
}

pub fn clear_screen() {
    if let Err(e) = Term::stdout().clear_screen() {
        debug!(error = %e, "could not clear terminal");
    }
}

/// A spinner shown while a blocking network call runs.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.cyan} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
        Self { bar }
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

/// Renders one Doctor check and its hints.
pub fn print_check(check: &Check) {
    let line = format!("{}: {}", check.name, check.message);
    match check.status {
        CheckStatus::Success => success(&line),
        CheckStatus::Warning => warn(&line),
        CheckStatus::Error => error(&line),
    }
    for hint in &check.hints {
        info(hint);
    }
}

pub fn print_checks(checks: &[Check]) {
    header("Git Genius Doctor");
    for check in checks {
        print_check(check);
    }
    success("Doctor check completed");
}

pub fn print_setup_summary(summary: &SetupSummary) {
    header("Setup Summary");
    success(&format!("Project Dir : {}", summary.workdir.display()));
    match &summary.repo_url {
        Some(url) => success(&format!("Repository  : {url}")),
        None => warn("Repository  : not configured"),
    }
    success(&format!("Remote      : {}", summary.remote));
    success(&format!("Branch      : {}", summary.branch));
    success("Setup completed successfully");
}
