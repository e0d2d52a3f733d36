use crate::OutputFormat;
use anyhow::Result;
use console::style;
use rephrase_core::chunk::{self, Segment};

/// Print the segments `text` would be submitted as
pub fn execute(text: &str, limit: usize, format: OutputFormat) -> Result<()> {
    let segments = chunk::segments(text, limit);
    tracing::debug!("{} segment(s) at a limit of {} words", segments.len(), limit);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&segments)?),
        OutputFormat::Pretty => output_pretty(&segments, limit),
    }

    Ok(())
}

fn output_pretty(segments: &[Segment], limit: usize) {
    let words: usize = segments.iter().map(|s| s.words).sum();

    println!(
        "{} {} words, {} segment(s), limit {}",
        style("Segments:").bold().cyan(),
        words,
        segments.len(),
        limit
    );

    for segment in segments {
        let header = format!("[{}] {} words", segment.index, segment.words);
        if segment.words > limit {
            println!("\n{} {}", style(header).bold(), style("(single oversized sentence)").yellow());
        } else {
            println!("\n{}", style(header).bold());
        }
        println!("{}", segment.text);
    }
}
