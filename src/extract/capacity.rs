use scraper::{Html, Selector};

use super::{Extracted, ExtractStatus};

/// Guest/bedroom/bed/bath counts parsed from the short capacity phrases under
/// the listing title ("4 guests · 2 bedrooms · 3 beds · 1 bath"). `None` is
/// the explicit "unavailable" sentinel, distinct from a count of zero.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapacityInfo {
    pub guests: Option<u32>,
    pub bedrooms: Option<u32>,
    pub beds: Option<u32>,
    pub baths: Option<u32>,
}

pub fn extract(document: &Html) -> Extracted<CapacityInfo> {
    let section_sel = Selector::parse("div.o1kjrihn").unwrap();
    let item_sel = Selector::parse("li.l7n4lsf").unwrap();

    let Some(section) = document.select(&section_sel).next() else {
        return Extracted::section_missing(CapacityInfo::default());
    };

    let mut capacity = CapacityInfo::default();
    let mut status = ExtractStatus::Complete;

    for item in section.select(&item_sel) {
        let text = item
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
            .replace('·', " ");
        let text = text.trim();

        let count = leading_count(text);

        // "bedroom" has to win over the generic "bed" substring.
        if text.contains("guest") {
            assign(&mut capacity.guests, count, &mut status);
        } else if text.contains("bedroom") {
            assign(&mut capacity.bedrooms, count, &mut status);
        } else if text.contains("bed") {
            assign(&mut capacity.beds, count, &mut status);
        } else if text.contains("bath") {
            assign(&mut capacity.baths, count, &mut status);
        }
    }

    Extracted {
        value: capacity,
        status,
    }
}

/// First whitespace-separated token as a count; tolerates a trailing "+"
/// ("16+ guests").
fn leading_count(text: &str) -> Option<u32> {
    let token = text.split_whitespace().next()?;
    token.trim_end_matches('+').parse().ok()
}

fn assign(slot: &mut Option<u32>, count: Option<u32>, status: &mut ExtractStatus) {
    match count {
        Some(n) => *slot = Some(n),
        // Keyword matched but the leading token was not a number.
        None => status.degrade(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(items: &[&str]) -> Html {
        let lis: String = items
            .iter()
            .map(|item| format!(r#"<li class="l7n4lsf">{item}</li>"#))
            .collect();
        Html::parse_document(&format!(
            r#"<html><body><div class="o1kjrihn"><ol>{lis}</ol></div></body></html>"#
        ))
    }

    #[test]
    fn parses_all_four_counts() {
        let document = doc(&["4 guests", "2 bedrooms ·", "3 beds ·", "1 bath"]);
        let extracted = extract(&document);
        assert!(extracted.status.is_complete());
        assert_eq!(
            extracted.value,
            CapacityInfo {
                guests: Some(4),
                bedrooms: Some(2),
                beds: Some(3),
                baths: Some(1),
            }
        );
    }

    #[test]
    fn bedroom_is_not_counted_as_bed() {
        let document = doc(&["2 bedrooms"]);
        let extracted = extract(&document);
        assert_eq!(extracted.value.bedrooms, Some(2));
        assert_eq!(extracted.value.beds, None);
    }

    #[test]
    fn plus_suffix_is_tolerated() {
        let document = doc(&["16+ guests"]);
        assert_eq!(extract(&document).value.guests, Some(16));
    }

    #[test]
    fn missing_section_leaves_everything_unavailable() {
        let document = Html::parse_document("<html><body><p>studio</p></body></html>");
        let extracted = extract(&document);
        assert_eq!(extracted.status, ExtractStatus::SectionMissing);
        assert_eq!(extracted.value, CapacityInfo::default());
    }

    #[test]
    fn unparsable_count_degrades_but_keeps_rest() {
        let document = doc(&["some guests", "1 bath"]);
        let extracted = extract(&document);
        assert_eq!(extracted.status, ExtractStatus::PatternMismatch);
        assert_eq!(extracted.value.guests, None);
        assert_eq!(extracted.value.baths, Some(1));
    }
}
