use serde::{Deserialize, Serialize};

/// Serde adapter for capacity counts where "unavailable" is a real sentinel,
/// distinct from a genuine zero. Round-trips through the CSV table.
mod capacity_count {
    use serde::{Deserialize, Deserializer, Serializer};

    pub const UNAVAILABLE: &str = "unavailable";

    pub fn serialize<S>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(n) => serializer.collect_str(n),
            None => serializer.serialize_str(UNAVAILABLE),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(UNAVAILABLE) {
            return Ok(None);
        }
        raw.parse::<u32>().map(Some).map_err(serde::de::Error::custom)
    }
}

/// One scraped listing, flattened to the fixed table schema.
///
/// Field order here is the persisted column order. Every field is always
/// populated; extraction failures substitute the documented defaults rather
/// than leaving holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// 1-based position in the table, assigned at build time. Presentation
    /// artifact only; `link` is the stable identity.
    pub id: u32,
    /// Never populated by any extractor; kept as a column for schema
    /// stability.
    #[serde(default)]
    pub title: String,
    pub link: String,
    /// 0.0 when the listing has no rating yet.
    pub rating: f64,
    pub reviews: u32,
    #[serde(with = "capacity_count")]
    pub guests: Option<u32>,
    #[serde(with = "capacity_count")]
    pub bedrooms: Option<u32>,
    #[serde(with = "capacity_count")]
    pub beds: Option<u32>,
    #[serde(with = "capacity_count")]
    pub baths: Option<u32>,
    pub years_hosting: u32,
    pub price_original: i64,
    pub price_discount: i64,
    pub nights: i64,
    pub total_nights: i64,
    /// Negative when present; offers are discounts.
    pub special_offer: i64,
    pub cleaning_fee: i64,
    pub service_fee: i64,
    pub total: i64,
    /// Derived in memory after load, never persisted.
    #[serde(skip)]
    pub reviews_per_year: f64,
}

impl ListingRecord {
    /// A record with every field at its sentinel default. Extractors fill in
    /// whatever they manage to find.
    pub fn empty() -> Self {
        Self {
            id: 0,
            title: String::new(),
            link: String::new(),
            rating: 0.0,
            reviews: 0,
            guests: None,
            bedrooms: None,
            beds: None,
            baths: None,
            years_hosting: 0,
            price_original: 0,
            price_discount: 0,
            nights: 0,
            total_nights: 0,
            special_offer: 0,
            cleaning_fee: 0,
            service_fee: 0,
            total: 0,
            reviews_per_year: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_sentinel_round_trips() {
        let mut record = ListingRecord::empty();
        record.id = 1;
        record.link = "https://example.com/rooms/1".to_string();
        record.guests = Some(4);
        // bedrooms stays unavailable

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&record).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("unavailable"));

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let back: ListingRecord = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(back.guests, Some(4));
        assert_eq!(back.bedrooms, None);
    }
}
