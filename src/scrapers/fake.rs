//! Scripted in-memory browser for driver tests.

use anyhow::{bail, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use super::BrowserController;

/// Serves canned HTML per URL; navigation to an unscripted URL serves an
/// empty page, navigation to a URL in `fail_urls` errors.
#[derive(Default)]
pub struct ScriptedBrowser {
    pages: HashMap<String, String>,
    fail_urls: HashSet<String>,
    has_modal: bool,
    current: RefCell<String>,
    pub visited: RefCell<Vec<String>>,
}

impl ScriptedBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.fail_urls.insert(url.to_string());
        self
    }

    pub fn with_modal(mut self) -> Self {
        self.has_modal = true;
        self
    }
}

impl BrowserController for ScriptedBrowser {
    fn navigate(&self, url: &str) -> Result<()> {
        self.visited.borrow_mut().push(url.to_string());
        if self.fail_urls.contains(url) {
            bail!("navigation refused: {url}");
        }
        *self.current.borrow_mut() = self.pages.get(url).cloned().unwrap_or_default();
        Ok(())
    }

    fn current_content(&self) -> Result<String> {
        Ok(self.current.borrow().clone())
    }

    fn wait_for_element(&self, css: &str, _timeout: Duration) -> bool {
        self.has_modal && css.contains("Close")
    }

    fn click(&self, _css: &str) -> Result<()> {
        Ok(())
    }

    fn scroll_to_bottom(&self) -> Result<()> {
        Ok(())
    }

    fn close(&self) {}
}
