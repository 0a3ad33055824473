pub mod browser;
pub mod config;
pub mod listing;
pub mod search;

#[cfg(test)]
pub(crate) mod fake;

pub use browser::{BrowserController, ChromeController};
pub use config::CollectConfig;
pub use listing::ListingScraper;
pub use search::SearchCollector;

/// Unrecoverable failures at the two collection boundaries. Listing failures
/// drop one listing and the batch continues; a results-page failure ends the
/// run with whatever was accumulated.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("failed to load search results page {url}")]
    Page {
        url: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to scrape listing {url}")]
    Listing {
        url: String,
        #[source]
        source: anyhow::Error,
    },
}
