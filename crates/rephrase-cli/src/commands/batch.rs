use super::{BrowserArgs, block_on};
use crate::OutputFormat;
use anyhow::{Context, Result};
use console::style;
use rephrase_browser::SessionConfig;
use rephrase_core::record::{Record, RecordReader, RecordWriter};
use rephrase_core::{Mode, Outcome};
use std::path::Path;

const MISSING_TEXT: &str = "No text provided (expected one of: text, body, content, message)";

/// Rewrite every record in `file`, one browser session per record
pub fn execute(
    file: &Path,
    output: Option<&Path>,
    default_mode: Mode,
    browser: &BrowserArgs,
    format: OutputFormat,
) -> Result<()> {
    let mut records = RecordReader::from_file(file)
        .with_context(|| format!("Failed to load records from {}", file.display()))?;
    tracing::info!("Loaded {} record(s) from {}", records.len(), file.display());

    let config = browser.session_config();
    block_on(process_all(&mut records, &config, default_mode))?;

    match output {
        Some(path) => {
            RecordWriter::to_file(&records, path)?;
            if format == OutputFormat::Pretty {
                print_summary(&records);
                println!("{} {}", style("Records written to").dim(), path.display());
            }
        }
        None => println!("{}", RecordWriter::to_string(&records)?),
    }

    Ok(())
}

async fn process_all(records: &mut [Record], config: &SessionConfig, default_mode: Mode) {
    let total = records.len();

    for (i, record) in records.iter_mut().enumerate() {
        record.begin();

        let mode = match record.mode(default_mode) {
            Ok(mode) => mode,
            Err(e) => {
                tracing::warn!("Record {}/{}: {}", i + 1, total, e);
                record.annotate(&Outcome::failure(e.to_string()), None);
                continue;
            }
        };

        let Some(text) = record.text() else {
            tracing::warn!("Record {}/{} has no text, skipping", i + 1, total);
            record.annotate(&Outcome::failure(MISSING_TEXT), None);
            continue;
        };

        tracing::info!("Record {}/{}: {}", i + 1, total, mode);
        let outcome = rephrase_browser::process(config.clone(), &text, mode).await;
        record.annotate(&outcome, Some(&text));
    }
}

fn print_summary(records: &[Record]) {
    let succeeded = records
        .iter()
        .filter(|r| r.fields().get("success").and_then(|v| v.as_bool()) == Some(true))
        .count();
    let failed = records.len() - succeeded;

    println!("\n{}", style("Batch Summary").bold().cyan());
    println!("  Records:   {}", records.len());
    println!("  Succeeded: {}", style(succeeded).green());
    if failed > 0 {
        println!("  Failed:    {}", style(failed).red());
    }
}
