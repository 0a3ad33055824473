use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{dollar_amount, Extracted, ExtractStatus};

/// Nightly price plus the per-stay breakdown lines from the booking sidebar.
/// Amounts are whole currency units; offers and discounts come out negative.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PriceInfo {
    pub price_original: i64,
    pub price_discount: i64,
    pub nights: i64,
    pub total_nights: i64,
    pub special_offer: i64,
    pub cleaning_fee: i64,
    pub service_fee: i64,
    pub total: i64,
}

pub fn extract(document: &Html) -> Extracted<PriceInfo> {
    let section_sel = Selector::parse(r#"div[data-section-id="BOOK_IT_SIDEBAR"]"#).unwrap();

    let Some(section) = document.select(&section_sel).next() else {
        return Extracted::section_missing(PriceInfo::default());
    };

    let mut prices = PriceInfo::default();
    let mut status = ExtractStatus::Complete;

    extract_nightly_price(section, &mut prices, &mut status);
    extract_breakdown_lines(section, &mut prices, &mut status);
    extract_total(section, &mut prices, &mut status);

    Extracted {
        value: prices,
        status,
    }
}

/// Discounted and original nightly prices. With no running promotion only the
/// discounted span exists, in which case it is the original price.
fn extract_nightly_price(section: ElementRef, prices: &mut PriceInfo, status: &mut ExtractStatus) {
    let display_sel = Selector::parse("div._1jo4hgw").unwrap();
    let discount_sel = Selector::parse("span._11jcbg2").unwrap();
    let original_sel = Selector::parse("span._1aejdbt").unwrap();

    let Some(display) = section.select(&display_sel).next() else {
        status.degrade();
        return;
    };

    if let Some(span) = display.select(&discount_sel).next() {
        match dollar_amount(&span.text().collect::<String>()) {
            Some(amount) => prices.price_discount = amount,
            None => status.degrade(),
        }
    }

    if let Some(span) = display.select(&original_sel).next() {
        match dollar_amount(&span.text().collect::<String>()) {
            Some(amount) => prices.price_original = amount,
            None => status.degrade(),
        }
    } else if prices.price_discount != 0 {
        prices.price_original = prices.price_discount;
    }
}

/// The repeated breakdown rows: "$90 x 3 nights", fees, offers. The label
/// text routes the amount; a minus sign or the discount style class makes it
/// negative.
fn extract_breakdown_lines(
    section: ElementRef,
    prices: &mut PriceInfo,
    status: &mut ExtractStatus,
) {
    let line_sel = Selector::parse("div._14omvfj").unwrap();
    let amount_sel = Selector::parse("span._1k4xcdh").unwrap();
    let discount_amount_sel = Selector::parse("span._1rc8xn5").unwrap();
    let nights_re = Regex::new(r"x\s*(\d+)\s*nights?").unwrap();

    for line in section.select(&line_sel) {
        let text = line.text().collect::<Vec<_>>().join(" ").to_lowercase();

        let (amount_span, is_discount_class) = match line.select(&amount_sel).next() {
            Some(span) => (Some(span), false),
            None => (line.select(&discount_amount_sel).next(), true),
        };

        let amount = match amount_span {
            Some(span) => {
                let amount_text = span.text().collect::<String>();
                let negative = is_discount_class || amount_text.contains('-');
                match dollar_amount(&amount_text) {
                    Some(value) if negative => -value,
                    Some(value) => value,
                    None => {
                        status.degrade();
                        0
                    }
                }
            }
            None => 0,
        };

        if text.contains("nights") {
            match nights_re
                .captures(&text)
                .and_then(|c| c.get(1).unwrap().as_str().parse().ok())
            {
                Some(nights) => prices.nights = nights,
                None => status.degrade(),
            }
            prices.total_nights = amount;
        } else if text.contains("special offer") {
            prices.special_offer = -amount.abs();
        } else if text.contains("cleaning fee") {
            prices.cleaning_fee = amount;
        } else if text.contains("service fee") {
            prices.service_fee = amount;
        }
    }
}

/// The "total before taxes" line moves between two element classes; when the
/// amount is not in the line's own text it hides in a child span.
fn extract_total(section: ElementRef, prices: &mut PriceInfo, status: &mut ExtractStatus) {
    let primary_sel = Selector::parse("div._1vk118j").unwrap();
    let alternate_sel = Selector::parse("div._182z7aq1").unwrap();
    let child_sel = Selector::parse("span._j1kt73").unwrap();

    let line = section
        .select(&primary_sel)
        .next()
        .or_else(|| section.select(&alternate_sel).next());
    let Some(line) = line else {
        status.degrade();
        return;
    };

    if let Some(total) = dollar_amount(&line.text().collect::<String>()) {
        prices.total = total;
        return;
    }

    match line
        .select(&child_sel)
        .next()
        .and_then(|span| dollar_amount(&span.text().collect::<String>()))
    {
        Some(total) => prices.total = total,
        None => status.degrade(),
    }
}
