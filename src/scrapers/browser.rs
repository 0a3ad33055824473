use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// The browser capability the collection driver consumes. Kept minimal so
/// tests can script page content without a real browser.
pub trait BrowserController {
    fn navigate(&self, url: &str) -> Result<()>;
    /// Raw HTML of the currently rendered page.
    fn current_content(&self) -> Result<String>;
    /// Bounded poll for an element; absence after the timeout is `false`,
    /// not an error.
    fn wait_for_element(&self, css: &str, timeout: Duration) -> bool;
    fn click(&self, css: &str) -> Result<()>;
    fn scroll_to_bottom(&self) -> Result<()>;
    fn close(&self);
}

/// Headless-Chrome implementation. One tab, fully sequential; the underlying
/// browser process is torn down when this is dropped, on every exit path.
pub struct ChromeController {
    #[allow(dead_code)]
    browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeController {
    pub fn new() -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some((1920, 1080)))
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open tab")?;
        tab.set_user_agent(USER_AGENT, None, None)
            .context("Failed to set user agent")?;

        Ok(Self { browser, tab })
    }
}

impl BrowserController for ChromeController {
    fn navigate(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);
        self.tab
            .navigate_to(url)
            .with_context(|| format!("Failed to navigate to {url}"))?;
        self.tab.wait_until_navigated()?;
        Ok(())
    }

    fn current_content(&self) -> Result<String> {
        let result = self
            .tab
            .evaluate("document.documentElement.outerHTML", false)?;
        let html = result
            .value
            .and_then(|value| value.as_str().map(str::to_owned))
            .unwrap_or_default();
        Ok(html)
    }

    fn wait_for_element(&self, css: &str, timeout: Duration) -> bool {
        self.tab
            .wait_for_element_with_custom_timeout(css, timeout)
            .is_ok()
    }

    fn click(&self, css: &str) -> Result<()> {
        let element = self
            .tab
            .find_element(css)
            .with_context(|| format!("Element not found: {css}"))?;
        element.click()?;
        Ok(())
    }

    fn scroll_to_bottom(&self) -> Result<()> {
        self.tab
            .evaluate("window.scrollTo(0, document.body.scrollHeight);", false)?;
        Ok(())
    }

    fn close(&self) {
        debug!("Closing browser tab");
        let _ = self.tab.close(true);
    }
}
