//! One browser session driving the rewriting tools.
//!
//! A session owns the browser and any scratch profile from `open` until
//! `close`. Each run navigates to the tool page for the request's mode and
//! submits the chunked text one segment at a time. A segment that fails is
//! recorded and skipped; only launch and navigation errors end a run early.

use crate::chrome_finder::ChromeFinder;
use crate::chromium::ChromiumPage;
use crate::driver::{Locator, PageDriver};
use crate::launcher::ChromeLauncher;
use crate::profile::ProfileManager;
use crate::site::{self, DEFAULT_BASE_URL, Tool};
use crate::{Error, Result};
use rephrase_core::chunk::{self, Segment};
use rephrase_core::wait::Poller;
use rephrase_core::{
    HumanizeMode, Mode, Outcome, Request, RunPolicy, SegmentFailure, Timings,
};
use std::path::PathBuf;

/// How Chrome is started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    pub headless: bool,
    /// Explicit Chrome binary; discovered when `None`
    pub chrome_path: Option<PathBuf>,
    /// Chrome user-data directory; a throwaway profile is used when `None`
    pub user_data_dir: Option<PathBuf>,
    /// Profile inside `user_data_dir`
    pub profile_directory: Option<String>,
    /// Launch on a scratch copy of `user_data_dir` instead of the original
    pub copy_profile: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_path: None,
            user_data_dir: None,
            profile_directory: Some("Default".to_string()),
            copy_profile: true,
        }
    }
}

/// Everything a session needs, built once by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub launch: LaunchOptions,
    pub timings: Timings,
    pub policy: RunPolicy,
    pub base_url: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            launch: LaunchOptions::default(),
            timings: Timings::default(),
            policy: RunPolicy::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Lifecycle of an opened session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Browser up, no run in progress
    Ready,
    /// A run is submitting segments
    Active,
    /// Browser shut down; the session cannot be reused
    Closed,
}

impl From<Error> for SegmentFailure {
    fn from(err: Error) -> Self {
        SegmentFailure::Interaction(err.to_string())
    }
}

pub struct Session<D: PageDriver> {
    driver: D,
    profile: Option<ProfileManager>,
    config: SessionConfig,
    state: SessionState,
    /// Tool page currently loaded
    page: Option<Tool>,
}

impl Session<ChromiumPage> {
    /// Find Chrome, prepare the profile and launch.
    ///
    /// Every failure is reported as `Error::Launch`. A scratch profile made
    /// for a launch that failed is removed before returning.
    pub async fn open(config: SessionConfig) -> Result<Self> {
        let chrome_path = ChromeFinder::new(config.launch.chrome_path.clone())
            .find()
            .map_err(into_launch)?;
        let profile = prepare_profile(&config.launch).map_err(into_launch)?;

        let mut launcher = ChromeLauncher::new(
            chrome_path,
            profile.path().to_path_buf(),
            config.launch.headless,
        );
        if config.launch.user_data_dir.is_some() {
            if let Some(name) = &config.launch.profile_directory {
                launcher = launcher.with_profile_directory(name.clone());
            }
        }

        let started = match launcher.launch().await {
            Ok((browser, handler)) => {
                ChromiumPage::start(browser, handler, config.timings.interaction_pause).await
            }
            Err(e) => Err(e),
        };

        match started {
            Ok(driver) => {
                tracing::info!("Browser session ready");
                let mut session = Self::with_driver(driver, config);
                session.profile = Some(profile);
                Ok(session)
            }
            Err(e) => {
                if let Err(cleanup_err) = profile.cleanup() {
                    tracing::warn!("Failed to remove scratch profile: {}", cleanup_err);
                }
                Err(into_launch(e))
            }
        }
    }
}

impl<D: PageDriver> Session<D> {
    /// Wrap an already running driver
    pub fn with_driver(driver: D, config: SessionConfig) -> Self {
        Self {
            driver,
            profile: None,
            config,
            state: SessionState::Ready,
            page: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Tool page loaded by the last run
    pub fn page(&self) -> Option<Tool> {
        self.page
    }

    /// Validate `text` and run it through the tool for `mode`
    pub async fn rewrite(&mut self, text: &str, mode: Mode) -> Result<Outcome> {
        let request = Request::new(text, mode)?;
        self.run(&request).await
    }

    /// Submit every segment of the request and collect the outputs
    pub async fn run(&mut self, request: &Request) -> Result<Outcome> {
        if self.state == SessionState::Closed {
            return Err(Error::Session("session is closed".to_string()));
        }

        let segments = chunk::segments(request.text(), self.config.policy.word_limit);
        if segments.is_empty() {
            return Err(rephrase_core::Error::Validation("No text provided".to_string()).into());
        }

        self.state = SessionState::Active;
        let result = self.drive(request.mode(), segments).await;
        self.state = SessionState::Ready;
        result
    }

    /// Run one request, then close whatever happened.
    ///
    /// Errors are folded into a failed outcome.
    pub async fn run_once(mut self, request: &Request) -> Outcome {
        let outcome = match self.run(request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Run failed: {}", e);
                Outcome::failure(e.to_string())
            }
        };

        self.close().await;
        outcome
    }

    /// Quit the browser and remove the scratch profile.
    ///
    /// Never fails; errors are logged. Calling it again does nothing.
    pub async fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.state = SessionState::Closed;

        tracing::info!("Closing browser session");
        if let Err(e) = self.driver.quit().await {
            tracing::warn!("Error while closing browser: {}", e);
        }

        if let Some(profile) = self.profile.take() {
            if let Err(e) = profile.cleanup() {
                tracing::warn!("Failed to remove scratch profile: {}", e);
            }
        }
    }

    async fn drive(&mut self, mode: Mode, segments: Vec<Segment>) -> Result<Outcome> {
        let tool = Tool::for_mode(mode);
        let url = tool.url(&self.config.base_url)?;
        let total = segments.len();

        tracing::info!("Opening {} for {} segment(s)", url, total);
        self.driver.navigate(url.as_str()).await?;
        self.page = Some(tool);
        tokio::time::sleep(self.config.timings.navigation_delay).await;

        if let Mode::Humanize(sub) = mode {
            if let Err(e) = self.select_humanize_mode(sub).await {
                tracing::warn!("Could not select {} humanize mode: {}", sub.as_str(), e);
            }
        }

        let mut results = Vec::with_capacity(total);

        for segment in segments {
            let result = self.process_segment(tool, &segment).await;

            match &result {
                Ok(output) => {
                    tracing::info!(
                        "Segment {}/{} done ({} words in, {} chars out)",
                        segment.index,
                        total,
                        segment.words,
                        output.chars().count()
                    );
                }
                Err(failure) => {
                    tracing::warn!("Segment {}/{} failed: {}", segment.index, total, failure);
                }
            }

            results.push((segment, result));
        }

        Ok(Outcome::from_segments(
            results,
            self.config.policy.allow_empty_result,
        ))
    }

    async fn select_humanize_mode(&mut self, mode: HumanizeMode) -> Result<()> {
        let tab = site::mode_tab(mode);
        if !self.wait_visible(&tab, self.config.timings.element_poller()).await? {
            return Err(Error::Browser(format!("mode tab {} not found", tab)));
        }

        self.driver.click(&tab).await?;
        tokio::time::sleep(self.config.timings.interaction_pause * 2).await;

        if mode == HumanizeMode::Advanced && self.driver.is_visible(&site::sign_up_gate()).await? {
            tracing::warn!(
                "Advanced humanize requires a signed-in account; segments may come back empty"
            );
        }

        Ok(())
    }

    /// Clear, type, submit and read back one segment
    async fn process_segment(
        &mut self,
        tool: Tool,
        segment: &Segment,
    ) -> std::result::Result<String, SegmentFailure> {
        let timings = self.config.timings;
        let input = site::input_box();

        if !self.wait_visible(&input, timings.element_poller()).await? {
            return Err(SegmentFailure::InputNotFound);
        }

        self.driver.clear(&input).await?;
        if !self.wait_cleared(&input, timings.clear_poller()).await? {
            return Err(SegmentFailure::InputNotCleared);
        }

        tracing::debug!("Typing segment {} ({} words)", segment.index, segment.words);
        self.driver.type_text(&input, &segment.text).await?;

        let Some(button) = self.find_action(tool).await? else {
            return Err(SegmentFailure::ControlNotFound(
                tool.action_label().to_string(),
            ));
        };
        self.clear_output().await;
        self.driver.click(&button).await?;

        tracing::debug!(
            "Submitted segment {}, waiting {:?} for output",
            segment.index,
            timings.settle_delay
        );
        tokio::time::sleep(timings.settle_delay).await;

        self.read_output(timings.output_poller())
            .await?
            .ok_or(SegmentFailure::ExtractionEmpty)
    }

    async fn wait_visible(&mut self, locator: &Locator, poller: Poller) -> Result<bool> {
        let mut deadline = poller.start();
        loop {
            if self.driver.is_visible(locator).await? {
                return Ok(true);
            }
            if !deadline.tick().await {
                tracing::debug!("Gave up waiting for {}", locator);
                return Ok(false);
            }
        }
    }

    async fn wait_cleared(&mut self, locator: &Locator, poller: Poller) -> Result<bool> {
        let mut deadline = poller.start();
        loop {
            let current = self.driver.text(locator).await?.unwrap_or_default();
            if current.trim().is_empty() {
                return Ok(true);
            }
            if !deadline.tick().await {
                return Ok(false);
            }
        }
    }

    /// First visible action button across the tool's strategies
    async fn find_action(&mut self, tool: Tool) -> Result<Option<Locator>> {
        for locator in tool.action_strategies() {
            if self.driver.is_visible(&locator).await? {
                return Ok(Some(locator));
            }
        }
        Ok(None)
    }

    /// Empty the output surfaces so the next render is the only text left.
    ///
    /// Best effort: a page that keeps its old output still gets submitted.
    async fn clear_output(&mut self) {
        for locator in [site::output_box(), site::output_editor()] {
            match self.driver.is_visible(&locator).await {
                Ok(true) => {
                    if let Err(e) = self.driver.clear(&locator).await {
                        tracing::debug!("Could not clear {}: {}", locator, e);
                    }
                }
                Ok(false) => {}
                Err(e) => tracing::debug!("Could not check {}: {}", locator, e),
            }
        }
    }

    async fn read_output(&mut self, poller: Poller) -> Result<Option<String>> {
        let mut deadline = poller.start();
        loop {
            if let Some(text) = self.current_output().await? {
                return Ok(Some(text));
            }
            if !deadline.tick().await {
                return Ok(None);
            }
        }
    }

    async fn current_output(&mut self) -> Result<Option<String>> {
        for locator in [site::output_box(), site::output_editor()] {
            if let Some(text) = self.driver.text(&locator).await? {
                let text = text.trim();
                if !text.is_empty() {
                    return Ok(Some(text.to_string()));
                }
            }
        }
        Ok(None)
    }
}

/// Validate, open, run and close, reporting every error in the outcome
pub async fn process(config: SessionConfig, text: &str, mode: Mode) -> Outcome {
    let request = match Request::new(text, mode) {
        Ok(request) => request,
        Err(e) => return Outcome::failure(e.to_string()),
    };

    match Session::open(config).await {
        Ok(session) => session.run_once(&request).await,
        Err(e) => {
            tracing::error!("{}", e);
            Outcome::failure(e.to_string())
        }
    }
}

fn prepare_profile(options: &LaunchOptions) -> Result<ProfileManager> {
    match &options.user_data_dir {
        None => ProfileManager::temporary(),
        Some(dir) if options.copy_profile => match ProfileManager::scratch_copy(dir) {
            Ok(profile) => Ok(profile),
            Err(e) => {
                tracing::warn!(
                    "Could not copy profile ({}), using {} directly",
                    e,
                    dir.display()
                );
                ProfileManager::persistent(dir.clone())
            }
        },
        Some(dir) => ProfileManager::persistent(dir.clone()),
    }
}

fn into_launch(err: Error) -> Error {
    match err {
        Error::Launch(_) => err,
        other => Error::Launch(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::time::Duration;

    /// In-memory stand-in for the tool page
    #[derive(Default)]
    struct ScriptedDriver {
        hidden: HashSet<Locator>,
        /// Submissions (1-based) at which no action button is shown
        missing_button_at: HashSet<usize>,
        /// Clearing leaves the old text in place
        sticky_input: bool,
        fail_typing: bool,
        fail_quit: bool,
        /// Output shown for every submission instead of the echo
        fixed_output: Option<String>,
        /// Output rendered only in the nested editor
        output_in_editor: bool,

        input: String,
        output: String,
        editor: String,
        typed: usize,

        navigations: Vec<String>,
        clicks: Vec<Locator>,
        submissions: Vec<String>,
        visibility_checks: Vec<Locator>,
        quits: usize,
    }

    impl ScriptedDriver {
        fn is_action(locator: &Locator) -> bool {
            locator.selector().starts_with("button")
        }
    }

    #[async_trait]
    impl PageDriver for ScriptedDriver {
        async fn navigate(&mut self, url: &str) -> Result<()> {
            self.navigations.push(url.to_string());
            Ok(())
        }

        async fn is_visible(&mut self, locator: &Locator) -> Result<bool> {
            self.visibility_checks.push(locator.clone());
            if Self::is_action(locator) && self.missing_button_at.contains(&self.typed) {
                return Ok(false);
            }
            Ok(!self.hidden.contains(locator))
        }

        async fn clear(&mut self, locator: &Locator) -> Result<()> {
            if *locator == site::output_box() {
                self.output.clear();
            } else if *locator == site::output_editor() {
                self.editor.clear();
            } else if !self.sticky_input {
                self.input.clear();
            }
            Ok(())
        }

        async fn type_text(&mut self, _locator: &Locator, text: &str) -> Result<()> {
            if self.fail_typing {
                return Err(Error::Browser("element detached".to_string()));
            }
            self.typed += 1;
            self.input.push_str(text);
            Ok(())
        }

        async fn click(&mut self, locator: &Locator) -> Result<()> {
            self.clicks.push(locator.clone());
            if Self::is_action(locator) {
                self.submissions.push(self.input.clone());
                let output = self
                    .fixed_output
                    .clone()
                    .unwrap_or_else(|| format!("  {}\n", self.input.to_uppercase()));
                if self.output_in_editor {
                    self.editor = output;
                } else {
                    self.output = output;
                }
            }
            Ok(())
        }

        async fn text(&mut self, locator: &Locator) -> Result<Option<String>> {
            if *locator == site::input_box() {
                Ok(Some(self.input.clone()))
            } else if *locator == site::output_box() {
                Ok(Some(self.output.clone()))
            } else if *locator == site::output_editor() {
                Ok(Some(self.editor.clone()))
            } else {
                Ok(None)
            }
        }

        async fn quit(&mut self) -> Result<()> {
            self.quits += 1;
            if self.fail_quit {
                return Err(Error::Cdp("connection reset".to_string()));
            }
            Ok(())
        }
    }

    fn config(word_limit: usize) -> SessionConfig {
        SessionConfig {
            policy: RunPolicy {
                word_limit,
                allow_empty_result: false,
            },
            ..SessionConfig::default()
        }
    }

    fn sentence(tag: &str, n: usize) -> String {
        let words: Vec<String> = (0..n).map(|i| format!("{}{}", tag, i)).collect();
        format!("{}.", words.join(" "))
    }

    fn three_segments() -> (String, [String; 3]) {
        let parts = [sentence("a", 50), sentence("b", 50), sentence("c", 50)];
        (parts.join(" "), parts)
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_text_is_submitted_once() {
        let text = "The quick brown fox jumps over the lazy dog today.";
        let mut session = Session::with_driver(ScriptedDriver::default(), config(125));

        let outcome = session.rewrite(text, Mode::Paraphrase).await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.text.as_deref(), Some(text.to_uppercase().as_str()));
        assert_eq!(session.driver.submissions, vec![text.to_string()]);
        assert_eq!(
            session.driver.navigations,
            vec!["https://quillbot.com/paraphrasing-tool".to_string()]
        );
        assert_eq!(session.page(), Some(Tool::Paraphraser));
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_text_fails_before_navigation() {
        let mut session = Session::with_driver(ScriptedDriver::default(), config(125));

        let err = session.rewrite("  \n\t ", Mode::Paraphrase).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Core(rephrase_core::Error::Validation(_))
        ));
        assert!(session.driver.navigations.is_empty());
        assert!(session.driver.submissions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_button_skips_only_that_segment() {
        let (text, parts) = three_segments();
        let driver = ScriptedDriver {
            missing_button_at: HashSet::from([2]),
            ..ScriptedDriver::default()
        };
        let mut session = Session::with_driver(driver, config(60));

        let outcome = session.rewrite(&text, Mode::Paraphrase).await.unwrap();

        assert!(outcome.success);
        assert_eq!(
            outcome.text.unwrap(),
            format!("{} {}", parts[0].to_uppercase(), parts[2].to_uppercase())
        );
        assert_eq!(outcome.segments.len(), 3);
        assert_eq!(
            outcome.segments[1].failure.as_deref(),
            Some("'Paraphrase' button not found")
        );
        assert_eq!(session.driver.submissions, vec![parts[0].clone(), parts[2].clone()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_button_is_used() {
        let driver = ScriptedDriver {
            hidden: HashSet::from([Locator::css("button").containing("Paraphrase")]),
            ..ScriptedDriver::default()
        };
        let mut session = Session::with_driver(driver, config(125));

        let outcome = session.rewrite("Hello there.", Mode::Paraphrase).await.unwrap();

        assert!(outcome.success);
        assert_eq!(
            session.driver.clicks,
            vec![Locator::css("button.MuiButton-containedPrimary").containing("Paraphrase")]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_is_idempotent_and_swallows_errors() {
        let driver = ScriptedDriver {
            fail_quit: true,
            ..ScriptedDriver::default()
        };
        let mut session = Session::with_driver(driver, config(125));

        session.close().await;
        session.close().await;

        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(session.driver.quits, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_session_rejects_runs() {
        let mut session = Session::with_driver(ScriptedDriver::default(), config(125));
        session.close().await;

        let err = session.rewrite("Some text.", Mode::Paraphrase).await.unwrap_err();

        assert!(matches!(err, Error::Session(_)));
        assert!(session.driver.navigations.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_segments_failed_is_an_error() {
        let driver = ScriptedDriver {
            hidden: HashSet::from([site::input_box()]),
            ..ScriptedDriver::default()
        };
        let mut session = Session::with_driver(driver, config(125));
        let started = tokio::time::Instant::now();

        let outcome = session.rewrite("Hello there.", Mode::Paraphrase).await.unwrap();

        assert!(!outcome.success);
        assert_eq!(
            outcome.error.as_deref(),
            Some("no segment produced output (1 of 1 failed)")
        );
        assert_eq!(outcome.segments[0].failure.as_deref(), Some("input box not found"));
        // navigation delay plus the element timeout
        assert_eq!(started.elapsed(), Duration::from_secs(22));
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_segments_failed_can_succeed_empty() {
        let driver = ScriptedDriver {
            hidden: HashSet::from([site::input_box()]),
            ..ScriptedDriver::default()
        };
        let mut cfg = config(125);
        cfg.policy.allow_empty_result = true;
        let mut session = Session::with_driver(driver, cfg);

        let outcome = session.rewrite("Hello there.", Mode::Paraphrase).await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.text.as_deref(), Some(""));
        assert_eq!(outcome.failed_segments(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_outputs_are_all_kept() {
        let (text, _) = three_segments();
        let driver = ScriptedDriver {
            fixed_output: Some("same result".to_string()),
            ..ScriptedDriver::default()
        };
        let mut session = Session::with_driver(driver, config(60));

        let outcome = session.rewrite(&text, Mode::Paraphrase).await.unwrap();

        assert!(outcome.success);
        assert_eq!(
            outcome.text.as_deref(),
            Some("same result same result same result")
        );
        assert_eq!(outcome.failed_segments(), 0);
        assert_eq!(session.driver.submissions.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_segment_is_not_deduplicated() {
        let repeated = sentence("w", 60);
        let text = format!("{} {}", repeated, repeated);
        let mut session = Session::with_driver(ScriptedDriver::default(), config(100));

        let outcome = session.rewrite(&text, Mode::Paraphrase).await.unwrap();

        let upper = repeated.to_uppercase();
        assert_eq!(outcome.segments.len(), 2);
        assert_eq!(outcome.failed_segments(), 0);
        assert_eq!(
            outcome.text.as_deref(),
            Some(format!("{} {}", upper, upper).as_str())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_output_is_cleared_before_each_submission() {
        let (text, _) = three_segments();
        let mut session = Session::with_driver(ScriptedDriver::default(), config(60));

        session.rewrite(&text, Mode::Paraphrase).await.unwrap();

        let output_checks = session
            .driver
            .visibility_checks
            .iter()
            .filter(|l| **l == site::output_box())
            .count();
        assert_eq!(output_checks, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_output_falls_back_to_nested_editor() {
        let driver = ScriptedDriver {
            output_in_editor: true,
            ..ScriptedDriver::default()
        };
        let mut session = Session::with_driver(driver, config(125));

        let outcome = session.rewrite("Hello there.", Mode::Paraphrase).await.unwrap();

        assert_eq!(outcome.text.as_deref(), Some("HELLO THERE."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_that_will_not_clear_fails_segment() {
        let driver = ScriptedDriver {
            sticky_input: true,
            input: "left over".to_string(),
            ..ScriptedDriver::default()
        };
        let mut session = Session::with_driver(driver, config(125));

        let outcome = session.rewrite("Hello there.", Mode::Paraphrase).await.unwrap();

        assert!(!outcome.success);
        assert_eq!(
            outcome.segments[0].failure.as_deref(),
            Some("input box could not be cleared")
        );
        assert!(session.driver.submissions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_error_becomes_interaction_failure() {
        let driver = ScriptedDriver {
            fail_typing: true,
            ..ScriptedDriver::default()
        };
        let mut session = Session::with_driver(driver, config(125));

        let outcome = session.rewrite("Hello there.", Mode::Paraphrase).await.unwrap();

        assert_eq!(
            outcome.segments[0].failure.as_deref(),
            Some("interaction failed: Browser error: element detached")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_humanize_selects_mode_tab_and_checks_gate() {
        let mut session = Session::with_driver(ScriptedDriver::default(), config(125));

        let outcome = session
            .rewrite("Hello there.", Mode::Humanize(HumanizeMode::Advanced))
            .await
            .unwrap();

        assert!(outcome.success);
        assert_eq!(
            session.driver.navigations,
            vec!["https://quillbot.com/ai-humanizer".to_string()]
        );
        assert_eq!(
            session.driver.clicks,
            vec![
                Locator::id("Paraphraser-mode-tab-1"),
                Locator::css("button").containing("Humanize"),
            ]
        );
        assert!(session.driver.visibility_checks.contains(&site::sign_up_gate()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_mode_tab_does_not_stop_run() {
        let driver = ScriptedDriver {
            hidden: HashSet::from([site::mode_tab(HumanizeMode::Basic)]),
            ..ScriptedDriver::default()
        };
        let mut session = Session::with_driver(driver, config(125));

        let outcome = session
            .rewrite("Hello there.", Mode::Humanize(HumanizeMode::Basic))
            .await
            .unwrap();

        assert!(outcome.success);
        assert!(!session.driver.visibility_checks.contains(&site::sign_up_gate()));
        assert_eq!(session.driver.submissions, vec!["Hello there.".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_once_swallows_close_errors() {
        let driver = ScriptedDriver {
            fail_quit: true,
            ..ScriptedDriver::default()
        };
        let session = Session::with_driver(driver, config(125));
        let request = Request::new("Hello there.", Mode::Paraphrase).unwrap();

        let outcome = session.run_once(&request).await;

        assert!(outcome.success);
        assert_eq!(outcome.text.as_deref(), Some("HELLO THERE."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_once_reports_closed_session_as_failure() {
        let mut session = Session::with_driver(ScriptedDriver::default(), config(125));
        session.close().await;
        let request = Request::new("Hello there.", Mode::Paraphrase).unwrap();

        let outcome = session.run_once(&request).await;

        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Session error: session is closed"));
    }

    #[tokio::test]
    async fn test_process_rejects_blank_text_without_launching() {
        let cfg = SessionConfig {
            launch: LaunchOptions {
                chrome_path: Some(PathBuf::from("/nonexistent/chrome")),
                ..LaunchOptions::default()
            },
            ..SessionConfig::default()
        };

        let outcome = process(cfg, "   ", Mode::Paraphrase).await;

        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Invalid request: No text provided"));
    }

    #[tokio::test]
    async fn test_process_reports_launch_failure() {
        let cfg = SessionConfig {
            launch: LaunchOptions {
                chrome_path: Some(PathBuf::from("/nonexistent/chrome")),
                ..LaunchOptions::default()
            },
            ..SessionConfig::default()
        };

        let outcome = process(cfg, "Hello there.", Mode::Paraphrase).await;

        assert!(!outcome.success);
        let error = outcome.error.unwrap();
        assert!(error.starts_with("Failed to launch browser"));
        assert!(error.contains("/nonexistent/chrome"));
    }

    #[test]
    fn test_prepare_profile_without_user_data_is_temporary() {
        let profile = prepare_profile(&LaunchOptions::default()).unwrap();

        assert!(profile.is_temporary());
    }

    #[test]
    fn test_prepare_profile_falls_back_to_original_on_copy_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let options = LaunchOptions {
            user_data_dir: Some(missing.clone()),
            ..LaunchOptions::default()
        };

        let profile = prepare_profile(&options).unwrap();

        assert!(!profile.is_temporary());
        assert_eq!(profile.path(), missing.as_path());
    }

    #[test]
    fn test_prepare_profile_in_place_when_not_copying() {
        let dir = tempfile::tempdir().unwrap();
        let options = LaunchOptions {
            user_data_dir: Some(dir.path().to_path_buf()),
            copy_profile: false,
            ..LaunchOptions::default()
        };

        let profile = prepare_profile(&options).unwrap();

        assert_eq!(profile.path(), dir.path());
        assert!(!profile.is_temporary());
    }
}
