use crate::driver::{Locator, PageDriver};
use crate::{Error, Result};
use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::element::Element;
use chromiumoxide::handler::Handler;
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Attribute used to hand an element found by script over to CDP
const TARGET_ATTR: &str = "data-rephrase-target";

const CLEAR_FN: &str = r#"function() {
    this.scrollIntoView({ block: 'center' });
    if ('value' in this) { this.value = ''; }
    this.textContent = '';
    this.innerHTML = '';
    this.dispatchEvent(new Event('input', { bubbles: true }));
    this.dispatchEvent(new Event('change', { bubbles: true }));
}"#;

const NOTIFY_INPUT_FN: &str = r#"function() {
    this.dispatchEvent(new Event('input', { bubbles: true }));
}"#;

/// `PageDriver` over a Chrome tab controlled through chromiumoxide
pub struct ChromiumPage {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    pause: Duration,
}

impl ChromiumPage {
    /// Take over a launched browser and open the working tab.
    ///
    /// `pause` is inserted between the steps of an interaction.
    pub async fn start(browser: Browser, mut handler: Handler, pause: Duration) -> Result<Self> {
        // The handler must be polled for any CDP command to complete
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(Error::Launch(format!("Failed to open a tab: {}", e)));
            }
        };

        Ok(Self {
            browser,
            page,
            handler_task,
            pause,
        })
    }
}

#[async_trait]
impl PageDriver for ChromiumPage {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        self.page.goto(url).await?;
        Ok(())
    }

    async fn is_visible(&mut self, locator: &Locator) -> Result<bool> {
        Ok(resolve(&self.page, locator).await?.is_some())
    }

    async fn clear(&mut self, locator: &Locator) -> Result<()> {
        let element = require(&self.page, locator).await?;
        element.call_js_fn(CLEAR_FN, false).await?;
        tokio::time::sleep(self.pause).await;
        Ok(())
    }

    async fn type_text(&mut self, locator: &Locator, text: &str) -> Result<()> {
        let element = require(&self.page, locator).await?;
        element.scroll_into_view().await?;
        let point = element.clickable_point().await?;
        self.page.move_mouse(point).await?;
        element.click().await?;
        tokio::time::sleep(self.pause).await;

        element.type_str(text).await?;
        tokio::time::sleep(self.pause).await;

        element.call_js_fn(NOTIFY_INPUT_FN, false).await?;
        Ok(())
    }

    async fn click(&mut self, locator: &Locator) -> Result<()> {
        let element = require(&self.page, locator).await?;
        element.scroll_into_view().await?;
        let point = element.clickable_point().await?;
        self.page.move_mouse(point).await?;
        element.click().await?;
        Ok(())
    }

    async fn text(&mut self, locator: &Locator) -> Result<Option<String>> {
        match resolve(&self.page, locator).await? {
            Some(element) => Ok(Some(element.inner_text().await?.unwrap_or_default())),
            None => Ok(None),
        }
    }

    async fn quit(&mut self) -> Result<()> {
        let closed = self.browser.close().await;

        match &closed {
            Ok(_) => {
                if let Err(e) = self.browser.wait().await {
                    tracing::debug!("Waiting for Chrome to exit failed: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!("Graceful browser close failed ({}), killing Chrome", e);
                if let Some(Err(e)) = self.browser.kill().await {
                    tracing::warn!("Failed to kill Chrome: {}", e);
                }
            }
        }

        self.handler_task.abort();
        closed.map(|_| ()).map_err(Error::from)
    }
}

/// Find the first visible match and tag it so CDP can address it
async fn resolve(page: &Page, locator: &Locator) -> Result<Option<Element>> {
    let found: bool = eval(page, locate_script(locator)).await?;
    if !found {
        return Ok(None);
    }

    let element = page.find_element(format!("[{}]", TARGET_ATTR)).await?;
    Ok(Some(element))
}

async fn require(page: &Page, locator: &Locator) -> Result<Element> {
    resolve(page, locator)
        .await?
        .ok_or_else(|| Error::Browser(format!("No visible element for {}", locator)))
}

async fn eval<T: DeserializeOwned>(page: &Page, script: String) -> Result<T> {
    page.evaluate(script)
        .await?
        .into_value()
        .map_err(|e| Error::Cdp(format!("Unexpected script result: {}", e)))
}

/// Script that marks the first visible element matching `locator`
fn locate_script(locator: &Locator) -> String {
    let css = serde_json::Value::from(locator.selector()).to_string();
    let text = match locator.text() {
        Some(text) => serde_json::Value::from(text).to_string(),
        None => "null".to_string(),
    };

    format!(
        r#"(() => {{
    const attr = '{attr}';
    document.querySelectorAll('[' + attr + ']').forEach(el => el.removeAttribute(attr));
    const visible = el => !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length);
    const text = {text};
    const found = Array.from(document.querySelectorAll({css}))
        .find(el => visible(el) && (text === null || (el.innerText || '').includes(text)));
    if (!found) return false;
    found.setAttribute(attr, '');
    return true;
}})()"#,
        attr = TARGET_ATTR,
        text = text,
        css = css,
    )
}
