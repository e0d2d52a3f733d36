use crate::Result;
use async_trait::async_trait;
use std::fmt;

/// How to find an element: a CSS selector, optionally narrowed to elements
/// whose rendered text contains a string. Only visible elements match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    css: String,
    text: Option<String>,
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            css: selector.into(),
            text: None,
        }
    }

    pub fn id(id: &str) -> Self {
        Self::css(format!("#{}", id))
    }

    /// Keep only elements whose rendered text contains `text`
    pub fn containing(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn selector(&self) -> &str {
        &self.css
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{} containing '{}'", self.css, text),
            None => write!(f, "{}", self.css),
        }
    }
}

/// The page operations a session needs from a browser.
///
/// Implementations act on the first visible element matching a locator and
/// must simulate user input rather than assign values, since the rewriting
/// tools' editors ignore state they did not see typed.
#[async_trait]
pub trait PageDriver: Send {
    /// Load a URL and wait for the navigation to finish
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Whether a visible element matches right now
    async fn is_visible(&mut self, locator: &Locator) -> Result<bool>;

    /// Empty an editable element and notify its listeners
    async fn clear(&mut self, locator: &Locator) -> Result<()>;

    /// Focus an element with a pointer click and type into it
    async fn type_text(&mut self, locator: &Locator, text: &str) -> Result<()>;

    /// Move the pointer onto an element and click it
    async fn click(&mut self, locator: &Locator) -> Result<()>;

    /// Rendered text of an element and its descendants, `None` if absent
    async fn text(&mut self, locator: &Locator) -> Result<Option<String>>;

    /// Shut the browser down
    async fn quit(&mut self) -> Result<()>;
}
