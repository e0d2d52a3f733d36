use super::types::Record;
use crate::Result;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub struct RecordWriter;

impl RecordWriter {
    /// Write records to a file as a pretty JSON array
    pub fn to_file(records: &[Record], path: &Path) -> Result<()> {
        tracing::debug!("Writing records to: {}", path.display());

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, records)?;

        tracing::info!("Wrote {} records to {}", records.len(), path.display());

        Ok(())
    }

    /// Convert records to a pretty JSON string
    pub fn to_string(records: &[Record]) -> Result<String> {
        Ok(serde_json::to_string_pretty(records)?)
    }
}
