//! Page model of the QuillBot rewriting tools.
//!
//! Both tools share one editor layout; they differ in the page path, the
//! label on the action button and, for the humanizer, a row of mode tabs.

use crate::driver::Locator;
use crate::{Error, Result};
use rephrase_core::{HumanizeMode, Mode};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://quillbot.com";

const INPUT_ID: &str = "paraphraser-input-box";
const OUTPUT_ID: &str = "paraphraser-output-box";
const SIGN_UP_TEXT: &str = "Sign up to use Advanced Humanize";

/// One of the two rewriting tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Paraphraser,
    Humanizer,
}

impl Tool {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Paraphrase => Tool::Paraphraser,
            Mode::Humanize(_) => Tool::Humanizer,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Tool::Paraphraser => "/paraphrasing-tool",
            Tool::Humanizer => "/ai-humanizer",
        }
    }

    /// Text on the button that submits the input
    pub fn action_label(&self) -> &'static str {
        match self {
            Tool::Paraphraser => "Paraphrase",
            Tool::Humanizer => "Humanize",
        }
    }

    /// Page URL under `base`
    pub fn url(&self, base: &str) -> Result<Url> {
        Url::parse(base)
            .and_then(|base| base.join(self.path()))
            .map_err(|e| Error::Browser(format!("Invalid base URL '{}': {}", base, e)))
    }

    /// Ways to find the action button, most specific first
    pub fn action_strategies(&self) -> Vec<Locator> {
        let label = self.action_label();
        let mut strategies = vec![Locator::css("button").containing(label)];

        if *self == Tool::Paraphraser {
            strategies.push(Locator::css("button.MuiButton-containedPrimary").containing(label));
        }

        strategies
    }
}

pub fn input_box() -> Locator {
    Locator::id(INPUT_ID)
}

pub fn output_box() -> Locator {
    Locator::id(OUTPUT_ID)
}

/// Editable node inside the output box that some layouts render text into
pub fn output_editor() -> Locator {
    Locator::css(format!("#{} div[contenteditable='true']", OUTPUT_ID))
}

pub fn mode_tab(mode: HumanizeMode) -> Locator {
    match mode {
        HumanizeMode::Basic => Locator::id("Paraphraser-mode-tab-0"),
        HumanizeMode::Advanced => Locator::id("Paraphraser-mode-tab-1"),
    }
}

/// Interstitial shown when Advanced humanize needs a signed-in account
pub fn sign_up_gate() -> Locator {
    Locator::css("body *").containing(SIGN_UP_TEXT)
}
