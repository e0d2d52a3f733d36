use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sub-mode of the AI humanizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HumanizeMode {
    #[default]
    Basic,
    /// Gated behind a signed-in account on the site
    Advanced,
}

impl HumanizeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HumanizeMode::Basic => "basic",
            HumanizeMode::Advanced => "advanced",
        }
    }
}

impl FromStr for HumanizeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(HumanizeMode::Basic),
            "advanced" => Ok(HumanizeMode::Advanced),
            other => Err(Error::Validation(format!(
                "Unknown humanize mode '{}' (expected basic or advanced)",
                other
            ))),
        }
    }
}

/// Which rewriting tool a request goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Paraphrase,
    Humanize(HumanizeMode),
}

impl Mode {
    /// Build a mode from its record/CLI name and an optional humanize sub-mode
    pub fn parse(name: &str, humanize_mode: Option<&str>) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "paraphrase" => Ok(Mode::Paraphrase),
            "humanize" => {
                let sub = humanize_mode
                    .map(HumanizeMode::from_str)
                    .transpose()?
                    .unwrap_or_default();
                Ok(Mode::Humanize(sub))
            }
            other => Err(Error::Validation(format!(
                "Unknown mode '{}' (expected paraphrase or humanize)",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Paraphrase => "paraphrase",
            Mode::Humanize(_) => "humanize",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Paraphrase => write!(f, "paraphrase"),
            Mode::Humanize(sub) => write!(f, "humanize ({})", sub.as_str()),
        }
    }
}

/// A validated rewrite request. The text is never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    text: String,
    mode: Mode,
}

impl Request {
    pub fn new(text: impl Into<String>, mode: Mode) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::Validation("No text provided".to_string()));
        }

        Ok(Self { text, mode })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}
