use scraper::{Html, Selector};

use super::{leading_int, Extracted, ExtractStatus};

/// Host tenure in years, read from the single labeled statistic in the host
/// profile card.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub years_hosting: u32,
}

pub fn extract(document: &Html) -> Extracted<HostInfo> {
    let section_sel = Selector::parse("div.s1m4e316").unwrap();
    let years_sel = Selector::parse(r#"span[data-testid="Years hosting-stat-heading"]"#).unwrap();

    let Some(section) = document.select(&section_sel).next() else {
        return Extracted::section_missing(HostInfo::default());
    };

    let mut info = HostInfo::default();
    let mut status = ExtractStatus::Complete;

    match section.select(&years_sel).next() {
        Some(span) => {
            let text = span.text().collect::<String>();
            match leading_int(text.trim()) {
                Some(years) => info.years_hosting = years,
                None => status.degrade(),
            }
        }
        None => status.degrade(),
    }

    Extracted { value: info, status }
}
