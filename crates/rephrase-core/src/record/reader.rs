use super::types::Record;
use crate::{Error, Result};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct RecordReader;

impl RecordReader {
    /// Read records from a JSON file holding an array of items or one object
    pub fn from_file(path: &Path) -> Result<Vec<Record>> {
        tracing::debug!("Reading records from: {}", path.display());

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let value: Value = serde_json::from_reader(reader)?;
        let records = Self::from_value(value)?;

        tracing::info!("Read {} records from {}", records.len(), path.display());

        Ok(records)
    }

    /// Parse records from a JSON string
    pub fn from_str(content: &str) -> Result<Vec<Record>> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Vec<Record>> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| {
                    Record::from_value(item).map_err(|e| match e {
                        Error::InvalidRecord(reason) => {
                            Error::InvalidRecord(format!("item {}: {}", idx, reason))
                        }
                        other => other,
                    })
                })
                .collect(),
            object @ Value::Object(_) => Ok(vec![Record::from_value(object)?]),
            _ => Err(Error::InvalidRecord(
                "expected an array of records or a single record object".to_string(),
            )),
        }
    }
}
