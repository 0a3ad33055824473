use anyhow::Result;
use scraper::Html;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{BrowserController, CollectConfig, ScrapeError};
use crate::extract::{capacity, host, price, rating, ExtractStatus};
use crate::models::ListingRecord;

/// Visits collected listing links one by one and turns each rendered page
/// into a flat record. A failure on one listing drops that listing and the
/// batch continues.
pub struct ListingScraper<'a, B: BrowserController> {
    browser: &'a B,
    config: &'a CollectConfig,
}

impl<'a, B: BrowserController> ListingScraper<'a, B> {
    pub fn new(browser: &'a B, config: &'a CollectConfig) -> Self {
        Self { browser, config }
    }

    pub fn scrape_all(&self, links: &[String]) -> Vec<ListingRecord> {
        let mut records = Vec::new();

        for (index, link) in links.iter().enumerate() {
            info!("Processing listing {}/{}", index + 1, links.len());
            match self.scrape_one(link) {
                Ok(record) => records.push(record),
                Err(error) => warn!("Dropping listing: {:#}", anyhow::Error::from(error)),
            }
            thread::sleep(self.config.listing_pause);
        }

        info!(
            "Scraped {} of {} listings successfully",
            records.len(),
            links.len()
        );
        records
    }

    fn scrape_one(&self, link: &str) -> Result<ListingRecord, ScrapeError> {
        let listing_err = |source: anyhow::Error| ScrapeError::Listing {
            url: link.to_string(),
            source,
        };

        self.browser.navigate(link).map_err(listing_err)?;
        thread::sleep(self.config.page_load_wait);

        self.dismiss_modal();

        let html = self.browser.current_content().map_err(listing_err)?;
        let document = Html::parse_document(&html);
        Ok(assemble(&document, link))
    }

    /// Listing pages sometimes open with a translation/login overlay. Wait
    /// briefly for its close button; not finding one is success.
    fn dismiss_modal(&self) {
        let close_button = "button[aria-label='Close']";
        if !self
            .browser
            .wait_for_element(close_button, self.config.modal_timeout)
        {
            debug!("No overlay modal to dismiss");
            return;
        }
        match self.browser.click(close_button) {
            Ok(()) => {
                debug!("Dismissed overlay modal");
                thread::sleep(Duration::from_secs(1).min(self.config.modal_timeout));
            }
            Err(error) => debug!("Could not dismiss overlay modal: {:#}", error),
        }
    }
}

/// Merge the four extractor outputs for one listing into a single record,
/// with the source link attached by the caller. Degraded extractions are
/// logged with enough context to diagnose, never raised.
pub fn assemble(document: &Html, link: &str) -> ListingRecord {
    let mut record = ListingRecord::empty();
    record.link = link.to_string();

    let rating = rating::extract(document);
    log_degraded("rating", link, rating.status);
    record.rating = rating.value.rating;
    record.reviews = rating.value.reviews;

    let capacity = capacity::extract(document);
    log_degraded("capacity", link, capacity.status);
    record.guests = capacity.value.guests;
    record.bedrooms = capacity.value.bedrooms;
    record.beds = capacity.value.beds;
    record.baths = capacity.value.baths;

    let host = host::extract(document);
    log_degraded("host", link, host.status);
    record.years_hosting = host.value.years_hosting;

    let price = price::extract(document);
    log_degraded("price", link, price.status);
    record.price_original = price.value.price_original;
    record.price_discount = price.value.price_discount;
    record.nights = price.value.nights;
    record.total_nights = price.value.total_nights;
    record.special_offer = price.value.special_offer;
    record.cleaning_fee = price.value.cleaning_fee;
    record.service_fee = price.value.service_fee;
    record.total = price.value.total;

    record
}

fn log_degraded(group: &str, link: &str, status: ExtractStatus) {
    if status.is_complete() {
        return;
    }
    match status {
        ExtractStatus::SectionMissing => {
            warn!("{} section missing on {}, using defaults", group, link)
        }
        _ => warn!("{} partially extracted on {}, some fields defaulted", group, link),
    }
}
