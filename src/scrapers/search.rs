use chrono::{DateTime, Utc};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::thread;
use tracing::{info, warn};

use super::{BrowserController, CollectConfig, ScrapeError};

/// Outcome of one link-harvesting run over the search results.
#[derive(Debug)]
pub struct CollectionReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub pages_visited: u32,
    /// Unique listing links, in first-seen order.
    pub links: Vec<String>,
}

/// Walks the paginated search results and harvests listing links from the
/// result cards, deduplicating across pages.
pub struct SearchCollector<'a, B: BrowserController> {
    browser: &'a B,
    config: &'a CollectConfig,
}

impl<'a, B: BrowserController> SearchCollector<'a, B> {
    pub fn new(browser: &'a B, config: &'a CollectConfig) -> Self {
        Self { browser, config }
    }

    /// Collect listing links. The initial page load is fatal; a later page
    /// failure ends the run early with whatever was accumulated.
    pub fn collect_links(&self) -> Result<CollectionReport, ScrapeError> {
        let started_at = Utc::now();
        let base_url = &self.config.base_url;

        info!("Loading search results: {}", base_url);
        self.browser
            .navigate(base_url)
            .map_err(|source| ScrapeError::Page {
                url: base_url.clone(),
                source,
            })?;
        thread::sleep(self.config.page_load_wait);

        let html = self
            .browser
            .current_content()
            .map_err(|source| ScrapeError::Page {
                url: base_url.clone(),
                source,
            })?;
        let document = Html::parse_document(&html);

        let total_pages = match read_total_listings(&document) {
            Some(total) => {
                let pages = total.div_ceil(self.config.listings_per_page);
                info!("Found {} listings, walking {} result pages", total, pages);
                pages
            }
            None => {
                info!(
                    "Could not read the total listing count, defaulting to {} pages",
                    self.config.default_page_count
                );
                self.config.default_page_count
            }
        };

        let mut seen = HashSet::new();
        let mut links = Vec::new();
        let mut pages_visited = 0;

        for page in 0..total_pages {
            let offset = page * self.config.listings_per_page;
            let page_url = format!("{base_url}&items_offset={offset}");
            info!("Results page {}/{}", page + 1, total_pages);

            if let Err(source) = self.browser.navigate(&page_url) {
                warn!(
                    "{:#}, stopping with {} links collected",
                    anyhow::Error::from(ScrapeError::Page {
                        url: page_url,
                        source,
                    }),
                    links.len()
                );
                break;
            }
            thread::sleep(self.config.page_load_wait);

            // Lazy content only renders as the page scrolls.
            for _ in 0..self.config.scroll_rounds {
                if let Err(error) = self.browser.scroll_to_bottom() {
                    warn!("Scroll failed: {:#}", error);
                    break;
                }
                thread::sleep(self.config.scroll_wait);
            }

            let html = match self.browser.current_content() {
                Ok(html) => html,
                Err(source) => {
                    warn!(
                        "{:#}, stopping with {} links collected",
                        anyhow::Error::from(ScrapeError::Page {
                            url: format!("{base_url}&items_offset={offset}"),
                            source,
                        }),
                        links.len()
                    );
                    break;
                }
            };
            let document = Html::parse_document(&html);
            pages_visited += 1;

            let card_sel = Selector::parse(r#"div[data-testid="card-container"]"#).unwrap();
            let cards: Vec<_> = document.select(&card_sel).collect();
            if cards.is_empty() {
                info!("No listings on this page, stopping early");
                break;
            }

            let mut new_links = 0;
            for card in &cards {
                if let Some(link) = card_link(*card, &self.config.site_origin) {
                    if seen.insert(link.clone()) {
                        links.push(link);
                        new_links += 1;
                    }
                }
            }
            info!(
                "Found {} cards, {} new links (total {})",
                cards.len(),
                new_links,
                links.len()
            );
        }

        info!("Collected {} unique listing links", links.len());
        Ok(CollectionReport {
            started_at,
            finished_at: Utc::now(),
            pages_visited,
            links,
        })
    }
}

/// Total-results statistic, tried in two places; the wording varies with the
/// site locale.
fn read_total_listings(document: &Html) -> Option<u32> {
    let total_re = Regex::new(r"(\d+)\s+(?:alojamientos?|homes?|stays?|places?)").unwrap();
    for css in ["span.a8jt5op", "h1.hpipapi"] {
        let selector = Selector::parse(css).unwrap();
        if let Some(element) = document.select(&selector).next() {
            let text = element.text().collect::<String>();
            if let Some(captures) = total_re.captures(&text) {
                return captures.get(1).unwrap().as_str().parse().ok();
            }
        }
    }
    None
}

/// A card's link is its direct child anchor, not any nested one.
fn card_link(card: ElementRef, origin: &str) -> Option<String> {
    let anchor = card
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")?;
    let href = anchor.value().attr("href")?;
    if href.starts_with("http") {
        Some(href.to_string())
    } else {
        Some(format!("{origin}{href}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::fake::ScriptedBrowser;

    const BASE: &str = "https://example.com/s/town/homes?adults=2";

    fn results_page(hrefs: &[&str]) -> String {
        let cards: String = hrefs
            .iter()
            .map(|href| {
                format!(r#"<div data-testid="card-container"><a href="{href}"><img/></a></div>"#)
            })
            .collect();
        format!("<html><body>{cards}</body></html>")
    }

    fn stats_page(total: &str) -> String {
        format!(r#"<html><body><span class="a8jt5op">{total}</span></body></html>"#)
    }

    fn collect(browser: &ScriptedBrowser) -> CollectionReport {
        let config = CollectConfig::instant(BASE);
        SearchCollector::new(browser, &config)
            .collect_links()
            .unwrap()
    }

    #[test]
    fn dedupes_links_across_overlapping_pages() {
        let browser = ScriptedBrowser::new()
            .page(BASE, &stats_page("36 stays in town"))
            .page(
                &format!("{BASE}&items_offset=0"),
                &results_page(&["/rooms/1", "/rooms/2"]),
            )
            .page(
                &format!("{BASE}&items_offset=18"),
                &results_page(&["/rooms/2", "/rooms/3"]),
            );

        let report = collect(&browser);
        assert_eq!(
            report.links,
            vec![
                "https://example.com/rooms/1",
                "https://example.com/rooms/2",
                "https://example.com/rooms/3",
            ]
        );
        assert_eq!(report.pages_visited, 2);
    }

    #[test]
    fn empty_page_stops_collection_early() {
        let browser = ScriptedBrowser::new()
            .page(BASE, &stats_page("90 homes"))
            .page(
                &format!("{BASE}&items_offset=0"),
                &results_page(&["/rooms/1"]),
            );
        // offset 18 is unscripted and renders empty

        let report = collect(&browser);
        assert_eq!(report.links.len(), 1);
        assert_eq!(report.pages_visited, 2);
    }

    #[test]
    fn unreadable_total_defaults_to_four_pages() {
        let mut browser = ScriptedBrowser::new().page(BASE, "<html><body>search</body></html>");
        for page in 0..4u32 {
            let offset = page * 18;
            browser = browser.page(
                &format!("{BASE}&items_offset={offset}"),
                &results_page(&[&format!("/rooms/{page}")]),
            );
        }

        let report = collect(&browser);
        assert_eq!(report.pages_visited, 4);
        assert_eq!(report.links.len(), 4);
        // initial load plus the four offset pages
        assert_eq!(browser.visited.borrow().len(), 5);
    }

    #[test]
    fn page_failure_returns_accumulated_links() {
        let browser = ScriptedBrowser::new()
            .page(BASE, &stats_page("36 stays"))
            .page(
                &format!("{BASE}&items_offset=0"),
                &results_page(&["/rooms/1", "/rooms/2"]),
            )
            .failing(&format!("{BASE}&items_offset=18"));

        let report = collect(&browser);
        assert_eq!(report.links.len(), 2);
    }

    #[test]
    fn initial_load_failure_is_fatal() {
        let browser = ScriptedBrowser::new().failing(BASE);
        let config = CollectConfig::instant(BASE);
        let result = SearchCollector::new(&browser, &config).collect_links();
        assert!(matches!(result, Err(ScrapeError::Page { .. })));
    }

    #[test]
    fn absolute_hrefs_pass_through_unchanged() {
        let browser = ScriptedBrowser::new()
            .page(BASE, &stats_page("1 stay"))
            .page(
                &format!("{BASE}&items_offset=0"),
                &results_page(&["https://other.example/rooms/9"]),
            );

        let report = collect(&browser);
        assert_eq!(report.links, vec!["https://other.example/rooms/9"]);
    }
}
