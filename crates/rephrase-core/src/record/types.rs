use crate::request::Mode;
use crate::{Error, Outcome, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields checked for input text, in order of preference
const TEXT_FIELDS: [&str; 4] = ["text", "body", "content", "message"];

/// One item handed over by an automation host.
///
/// Records are either plain JSON objects or n8n-style items that carry their
/// payload under a `json` key. Unknown fields pass through untouched; the
/// outcome is written back into the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Record {
    payload: Map<String, Value>,
    /// Top-level fields around an n8n `json` payload
    envelope: Option<Map<String, Value>>,
}

impl Record {
    pub fn from_value(value: Value) -> Result<Self> {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Err(Error::InvalidRecord(format!(
                    "expected an object, found {}",
                    type_name(&other)
                )));
            }
        };

        match map.remove("json") {
            Some(Value::Object(payload)) => Ok(Self {
                payload,
                envelope: Some(map),
            }),
            Some(other) => Err(Error::InvalidRecord(format!(
                "'json' field must be an object, found {}",
                type_name(&other)
            ))),
            None => Ok(Self {
                payload: map,
                envelope: None,
            }),
        }
    }

    pub fn into_value(self) -> Value {
        match self.envelope {
            Some(mut envelope) => {
                envelope.insert("json".to_string(), Value::Object(self.payload));
                Value::Object(envelope)
            }
            None => Value::Object(self.payload),
        }
    }

    /// Payload fields, inside the n8n envelope when there is one
    pub fn fields(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn fields_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.payload
    }

    /// Input text of the record, if any non-blank text is present
    pub fn text(&self) -> Option<String> {
        let fields = self.fields();

        TEXT_FIELDS.iter().find_map(|name| {
            let text = match fields.get(*name)? {
                Value::String(s) => s.as_str(),
                Value::Object(body) if *name == "body" => body.get("text")?.as_str()?,
                _ => return None,
            };
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
    }

    /// Mode requested by the record, falling back to `default`
    pub fn mode(&self, default: Mode) -> Result<Mode> {
        let fields = self.fields();
        let sub = fields.get("humanize_mode").and_then(Value::as_str);

        match fields.get("mode").and_then(Value::as_str) {
            Some(name) => Mode::parse(name, sub),
            None => match (default, sub) {
                (Mode::Humanize(_), Some(_)) => Mode::parse("humanize", sub),
                _ => Ok(default),
            },
        }
    }

    /// Reset the result fields before processing
    pub fn begin(&mut self) {
        let fields = self.fields_mut();
        fields.insert("success".to_string(), Value::Bool(false));
        fields.insert("result".to_string(), Value::Null);
        fields.insert("error".to_string(), Value::Null);
    }

    /// Write an outcome into the record
    pub fn annotate(&mut self, outcome: &Outcome, original_text: Option<&str>) {
        let fields = self.fields_mut();
        fields.insert("success".to_string(), Value::Bool(outcome.success));
        fields.insert(
            "result".to_string(),
            outcome.text.clone().map(Value::String).unwrap_or(Value::Null),
        );
        fields.insert(
            "error".to_string(),
            outcome.error.clone().map(Value::String).unwrap_or(Value::Null),
        );
        if let Some(text) = original_text {
            fields.insert("original_text".to_string(), Value::String(text.to_string()));
        }
        if !outcome.segments.is_empty() {
            let failed = outcome.failed_segments();
            fields.insert("segments".to_string(), Value::from(outcome.segments.len()));
            fields.insert("segments_failed".to_string(), Value::from(failed));
        }
        fields.insert(
            "processed_at".to_string(),
            Value::String(chrono::Utc::now().to_rfc3339()),
        );
    }
}

impl TryFrom<Value> for Record {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Record::from_value(value)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
