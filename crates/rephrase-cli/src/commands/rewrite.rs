use super::{BrowserArgs, block_on, write_output};
use crate::OutputFormat;
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rephrase_core::{Mode, Outcome};
use std::path::Path;
use std::time::Duration;

/// Run `text` through the tool for `mode` and print the result
pub fn execute(
    text: &str,
    mode: Mode,
    browser: &BrowserArgs,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let config = browser.session_config();
    let words = rephrase_core::chunk::word_count(text);
    tracing::info!("Running {} words through {}", words, mode);

    let progress = (format == OutputFormat::Pretty).then(|| spinner(mode));
    let outcome = block_on(rephrase_browser::process(config, text, mode))?;

    if let Some(progress) = &progress {
        progress.finish_and_clear();
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Pretty => output_pretty(&outcome, mode),
    }

    match (&outcome.text, output) {
        (Some(result), Some(path)) if outcome.success => {
            write_output(path, result)?;
            eprintln!("{} {}", style("Result written to").dim(), path.display());
        }
        _ => {}
    }

    if !outcome.success {
        anyhow::bail!(
            "{} failed: {}",
            mode.name(),
            outcome.error.as_deref().unwrap_or("unknown error")
        );
    }

    Ok(())
}

fn spinner(mode: Mode) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan}  {msg} {elapsed:.dim}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Running {} in Chrome", mode));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn output_pretty(outcome: &Outcome, mode: Mode) {
    if let Some(text) = &outcome.text {
        println!("{}", text);
    }

    let failed = outcome.failed_segments();
    let total = outcome.segments.len();

    if outcome.success && failed == 0 {
        eprintln!(
            "\n{} {} ({} segment{})",
            style("✓").green().bold(),
            style(mode).bold(),
            total,
            if total == 1 { "" } else { "s" }
        );
    } else if outcome.success {
        eprintln!(
            "\n{} {} segment{} of {} failed and {} left out of the result",
            style("!").yellow().bold(),
            failed,
            if failed == 1 { "" } else { "s" },
            total,
            if failed == 1 { "was" } else { "were" }
        );
    }

    for report in outcome.segments.iter().filter(|r| r.is_failed()) {
        eprintln!(
            "  {} segment {} ({} words): {}",
            style("-").dim(),
            report.index,
            report.words,
            report.failure.as_deref().unwrap_or_default()
        );
    }
}
