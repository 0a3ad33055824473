use regex::Regex;
use scraper::{Html, Selector};

use super::{Extracted, ExtractStatus};

/// Overall rating and review count, read from the reviews section heading
/// ("4.83 · 12 reviews").
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RatingInfo {
    pub rating: f64,
    pub reviews: u32,
}

pub fn extract(document: &Html) -> Extracted<RatingInfo> {
    let section_sel = Selector::parse(r#"div[data-section-id="REVIEWS_DEFAULT"]"#).unwrap();
    let heading_sel = Selector::parse("h2").unwrap();

    let Some(section) = document.select(&section_sel).next() else {
        return Extracted::section_missing(RatingInfo::default());
    };

    let mut info = RatingInfo::default();
    let mut status = ExtractStatus::Complete;

    match section.select(&heading_sel).next() {
        Some(heading) => {
            let text = heading.text().collect::<String>();

            let rating_re = Regex::new(r"(\d+\.\d+)").unwrap();
            match rating_re
                .captures(&text)
                .and_then(|c| c.get(1).unwrap().as_str().parse().ok())
            {
                Some(rating) => info.rating = rating,
                None => status.degrade(),
            }

            let reviews_re = Regex::new(r"(\d+)\s+reviews?").unwrap();
            match reviews_re
                .captures(&text)
                .and_then(|c| c.get(1).unwrap().as_str().parse().ok())
            {
                Some(reviews) => info.reviews = reviews,
                None => status.degrade(),
            }
        }
        None => status.degrade(),
    }

    Extracted { value: info, status }
}
