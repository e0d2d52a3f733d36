pub mod batch;
pub mod chunk;
pub mod completion;
pub mod rewrite;

use anyhow::{Context, Result};
use clap::Args;
use clap::builder::{BoolishValueParser, TypedValueParser};
use rephrase_browser::site::DEFAULT_BASE_URL;
use rephrase_browser::{LaunchOptions, ProfileManager, SessionConfig};
use rephrase_core::chunk::DEFAULT_WORD_LIMIT;
use rephrase_core::{RunPolicy, Timings};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where the text to work on comes from
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Text to process (read from stdin when neither TEXT nor --input is given)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    pub input: Option<PathBuf>,
}

impl InputArgs {
    /// Resolve the input to trimmed, non-empty text
    pub fn read(&self) -> Result<String> {
        let raw = if let Some(path) = &self.input {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        } else if let Some(text) = &self.text {
            text.clone()
        } else if !std::io::stdin().is_terminal() {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        } else {
            String::new()
        };

        let text = raw.trim();
        if text.is_empty() {
            anyhow::bail!("No text provided. Pass TEXT, --input FILE or pipe text on stdin.");
        }

        Ok(text.to_string())
    }
}

/// Chrome and QuillBot settings shared by every command that opens a session
#[derive(Args, Debug, Clone)]
pub struct BrowserArgs {
    /// Run Chrome without a window
    #[arg(
        long,
        env = "HEADLESS",
        default_value_t = true,
        action = clap::ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL"
    )]
    pub headless: bool,

    /// Chrome user-data directory (defaults to the platform's Chrome profile root)
    #[arg(long, env = "CHROME_USER_DATA_DIR", value_name = "DIR")]
    pub user_data_dir: Option<PathBuf>,

    /// Profile inside the user-data directory
    #[arg(long, env = "CHROME_PROFILE_DIR", default_value = "Default", value_name = "NAME")]
    pub profile_directory: String,

    /// Launch on a scratch copy of the profile so a running Chrome is not disturbed
    #[arg(
        long,
        env = "COPY_PROFILE",
        default_value_t = true,
        action = clap::ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL"
    )]
    pub copy_profile: bool,

    /// Use a fresh throwaway profile instead of the user's Chrome profile
    #[arg(long, conflicts_with = "user_data_dir")]
    pub no_profile: bool,

    /// Path to the Chrome binary (auto-detected if not specified)
    #[arg(long, env = "CHROME_PATH", value_name = "PATH")]
    pub chrome_path: Option<PathBuf>,

    /// QuillBot site root
    #[arg(long, env = "QUILLBOT_URL", default_value = DEFAULT_BASE_URL, value_parser = parse_base_url)]
    pub base_url: String,

    /// Maximum words submitted at once
    #[arg(long, default_value_t = DEFAULT_WORD_LIMIT, value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize))]
    pub word_limit: usize,

    /// Seconds to wait after submitting a segment before reading the output
    #[arg(long, default_value_t = 15, value_name = "SECS")]
    pub settle_secs: u64,

    /// Seconds to wait for page elements to appear
    #[arg(long, default_value_t = 20, value_name = "SECS")]
    pub timeout_secs: u64,

    /// Report success with empty text when every segment failed
    #[arg(long, env = "ALLOW_EMPTY_RESULT")]
    pub allow_empty: bool,
}

impl BrowserArgs {
    pub fn session_config(&self) -> SessionConfig {
        let user_data_dir = if self.no_profile {
            None
        } else {
            self.user_data_dir
                .clone()
                .or_else(ProfileManager::default_user_data_dir)
        };

        SessionConfig {
            launch: LaunchOptions {
                headless: self.headless,
                chrome_path: self.chrome_path.clone(),
                user_data_dir,
                profile_directory: Some(self.profile_directory.clone()),
                copy_profile: self.copy_profile,
            },
            timings: Timings {
                settle_delay: Duration::from_secs(self.settle_secs),
                element_timeout: Duration::from_secs(self.timeout_secs),
                ..Timings::default()
            },
            policy: RunPolicy {
                word_limit: self.word_limit,
                allow_empty_result: self.allow_empty,
            },
            base_url: self.base_url.clone(),
        }
    }
}

fn parse_base_url(value: &str) -> std::result::Result<String, String> {
    let url = url::Url::parse(value).map_err(|e| format!("invalid URL: {}", e))?;
    match url.scheme() {
        "http" | "https" => Ok(value.to_string()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}

/// Write text to a file, creating parent directories
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Multi-threaded runtime for one command, shut down without waiting on
/// stuck blocking tasks
pub fn block_on<F: std::future::Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let output = runtime.block_on(future);
    runtime.shutdown_timeout(Duration::from_millis(100));

    Ok(output)
}
