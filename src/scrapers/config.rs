use std::time::Duration;

/// Tuning for one collection run. Fixed blocking waits throughout; there is
/// no retry or timeout escalation.
#[derive(Debug, Clone)]
pub struct CollectConfig {
    /// Search-results URL; page offsets are appended to it.
    pub base_url: String,
    /// Site origin used to absolutize relative card links.
    pub site_origin: String,
    /// Results page size the site paginates with.
    pub listings_per_page: u32,
    /// Pages to walk when the total-results statistic cannot be read.
    pub default_page_count: u32,
    /// Wait after each page load.
    pub page_load_wait: Duration,
    /// Scroll-to-bottom rounds per results page, to trigger lazy loading.
    pub scroll_rounds: u32,
    /// Wait after each scroll round.
    pub scroll_wait: Duration,
    /// Pause between listing visits, to go easy on the source.
    pub listing_pause: Duration,
    /// Bounded wait for the overlay-dismiss button on a listing page.
    pub modal_timeout: Duration,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.airbnb.com/s/Microcentro/homes?refinement_paths%5B%5D=%2Fhomes&adults=2&checkin=2025-02-16&checkout=2025-02-19&search_mode=regular_search".to_string(),
            site_origin: "https://www.airbnb.com".to_string(),
            listings_per_page: 18,
            default_page_count: 4,
            page_load_wait: Duration::from_secs(5),
            scroll_rounds: 3,
            scroll_wait: Duration::from_secs(3),
            listing_pause: Duration::from_secs(2),
            modal_timeout: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
impl CollectConfig {
    /// A config with all waits zeroed, for driver tests against a scripted
    /// browser.
    pub fn instant(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            site_origin: "https://example.com".to_string(),
            page_load_wait: Duration::ZERO,
            scroll_wait: Duration::ZERO,
            listing_pause: Duration::ZERO,
            modal_timeout: Duration::ZERO,
            ..Self::default()
        }
    }
}
