use crate::{Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::handler::Handler;
use std::path::PathBuf;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Builds the Chrome configuration for one session and launches it
pub struct ChromeLauncher {
    chrome_path: PathBuf,
    profile_path: PathBuf,
    profile_directory: Option<String>,
    headless: bool,
}

impl ChromeLauncher {
    pub fn new(chrome_path: PathBuf, profile_path: PathBuf, headless: bool) -> Self {
        Self {
            chrome_path,
            profile_path,
            profile_directory: None,
            headless,
        }
    }

    /// Select a profile inside the user-data directory (e.g. "Default")
    pub fn with_profile_directory(mut self, name: impl Into<String>) -> Self {
        self.profile_directory = Some(name.into());
        self
    }

    /// Launch Chrome and connect over CDP
    pub async fn launch(&self) -> Result<(Browser, Handler)> {
        let config = self.browser_config()?;

        tracing::info!(
            "Launching {} ({})",
            self.chrome_path.display(),
            if self.headless { "headless" } else { "headed" }
        );

        Browser::launch(config)
            .await
            .map_err(|e| Error::Launch(e.to_string()))
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        // Headless is passed as an explicit flag to get the new headless mode
        BrowserConfig::builder()
            .chrome_executable(&self.chrome_path)
            .user_data_dir(&self.profile_path)
            .with_head()
            .viewport(None)
            .args(self.build_args())
            .build()
            .map_err(Error::Launch)
    }

    /// Chrome command-line flags beyond executable and user-data directory
    fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.headless {
            args.push("--headless=new".to_string());
        }

        if let Some(profile) = &self.profile_directory {
            args.push(format!("--profile-directory={}", profile));
        }

        args.extend(
            [
                "--window-size=1920,1080",
                "--disable-blink-features=AutomationControlled",
                "--no-sandbox",
                "--disable-dev-shm-usage",
                "--no-first-run",
                "--no-default-browser-check",
            ]
            .map(String::from),
        );
        args.push(format!("--user-agent={}", USER_AGENT));

        args
    }
}
