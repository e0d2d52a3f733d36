use anyhow::Result;
use clap::builder::TypedValueParser;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use rephrase_cli::commands::{self, BrowserArgs, InputArgs};
use rephrase_cli::{HumanizeArg, OutputFormat, ToolArg};
use rephrase_core::Mode;
use rephrase_core::chunk::DEFAULT_WORD_LIMIT;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rephrase")]
#[command(author, version)]
#[command(
    about = "Paraphrase and humanize text with QuillBot through a driven Chrome session",
    long_about = "Rephrase drives QuillBot's paraphrasing tool and AI humanizer in Chrome. \
                  Long text is split into word-limited segments at sentence boundaries, \
                  submitted one at a time, and joined back together."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Paraphrase text with QuillBot's paraphrasing tool
    Paraphrase {
        #[command(flatten)]
        input: InputArgs,

        /// Also write the result to a file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        browser: BrowserArgs,
    },

    /// Rewrite text with QuillBot's AI humanizer
    Humanize {
        #[command(flatten)]
        input: InputArgs,

        /// Humanizer mode
        #[arg(short, long, value_enum, default_value_t = HumanizeArg::Basic)]
        mode: HumanizeArg,

        /// Also write the result to a file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        browser: BrowserArgs,
    },

    /// Process a JSON array of records, as handed over by an automation host
    #[command(
        long_about = "Process a JSON array of records, as handed over by an automation host.\n\n\
                      Each record is a plain object or an n8n item with the payload under \"json\". \
                      Text is read from \"text\", \"body\" (string or {\"text\": ...}), \"content\" \
                      or \"message\". A record may choose its own \"mode\" and \"humanize_mode\".\n\n\
                      Every record is annotated with success, result, error, original_text and \
                      processed_at, then written to --output or printed as JSON."
    )]
    Batch {
        /// Path to the JSON records file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the annotated records to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Tool for records that do not name one
        #[arg(short, long, value_enum, default_value_t = ToolArg::Paraphrase)]
        mode: ToolArg,

        /// Humanizer mode for records that do not name one
        #[arg(long, value_enum, default_value_t = HumanizeArg::Basic)]
        humanize_mode: HumanizeArg,

        #[command(flatten)]
        browser: BrowserArgs,
    },

    /// Show the segments text would be submitted as, without opening Chrome
    Chunk {
        #[command(flatten)]
        input: InputArgs,

        /// Maximum words per segment
        #[arg(short, long, default_value_t = DEFAULT_WORD_LIMIT, value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize))]
        limit: usize,
    },

    /// Generate shell completion scripts
    #[command(long_about = "Generate shell completion scripts for rephrase.

SUPPORTED SHELLS:
    bash, zsh, fish, powershell, elvish

INSTALLATION:
    Bash:
        rephrase completion --shell bash > ~/.local/share/bash-completion/completions/rephrase
        (or source it from ~/.bashrc)

    Zsh:
        rephrase completion --shell zsh > ~/.zfunc/_rephrase
        (add ~/.zfunc to fpath in ~/.zshrc before compinit)

    Fish:
        rephrase completion --shell fish > ~/.config/fish/completions/rephrase.fish

    PowerShell:
        rephrase completion --shell powershell >> $PROFILE")]
    Completion {
        /// Shell to generate completions for
        #[arg(short, long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    match cli.command {
        Commands::Paraphrase {
            input,
            output,
            browser,
        } => {
            let text = input.read()?;
            commands::rewrite::execute(
                &text,
                Mode::Paraphrase,
                &browser,
                output.as_deref(),
                cli.format,
            )
        }
        Commands::Humanize {
            input,
            mode,
            output,
            browser,
        } => {
            let text = input.read()?;
            commands::rewrite::execute(
                &text,
                Mode::Humanize(mode.into()),
                &browser,
                output.as_deref(),
                cli.format,
            )
        }
        Commands::Batch {
            file,
            output,
            mode,
            humanize_mode,
            browser,
        } => commands::batch::execute(
            &file,
            output.as_deref(),
            mode.mode(humanize_mode),
            &browser,
            cli.format,
        ),
        Commands::Chunk { input, limit } => {
            let text = input.read()?;
            commands::chunk::execute(&text, limit, cli.format)
        }
        Commands::Completion { shell } => {
            commands::completion::execute(shell, &mut Cli::command())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("rephrase=debug,rephrase_core=debug,rephrase_browser=debug")
    } else {
        EnvFilter::new("rephrase=info")
    };

    // stdout carries results; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
