use clap::ValueEnum;
use rephrase_core::{HumanizeMode, Mode};

pub mod commands;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// Rewriting tool selectable on the command line
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ToolArg {
    Paraphrase,
    Humanize,
}

/// Humanizer sub-mode selectable on the command line
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum HumanizeArg {
    Basic,
    /// Requires a signed-in QuillBot account in the Chrome profile
    Advanced,
}

impl From<HumanizeArg> for HumanizeMode {
    fn from(arg: HumanizeArg) -> Self {
        match arg {
            HumanizeArg::Basic => HumanizeMode::Basic,
            HumanizeArg::Advanced => HumanizeMode::Advanced,
        }
    }
}

impl ToolArg {
    pub fn mode(self, humanize: HumanizeArg) -> Mode {
        match self {
            ToolArg::Paraphrase => Mode::Paraphrase,
            ToolArg::Humanize => Mode::Humanize(humanize.into()),
        }
    }
}
