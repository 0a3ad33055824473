use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::models::ListingRecord;

/// Turn assembled rows into the table proper: sequential 1-based ids in
/// insertion order. The table is rebuilt wholesale each run; there are no
/// merge semantics.
pub fn build_table(mut rows: Vec<ListingRecord>) -> Vec<ListingRecord> {
    for (index, row) in rows.iter_mut().enumerate() {
        row.id = (index + 1) as u32;
    }
    rows
}

/// Write the table as CSV with a header row in the fixed column order.
/// An empty table is not an error: nothing is written and `false` comes back.
pub fn save_csv(records: &[ListingRecord], path: &Path) -> Result<bool> {
    if records.is_empty() {
        info!("No data to save");
        return Ok(false);
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!("Saved {} listings to {}", records.len(), path.display());
    Ok(true)
}

/// Read a previously written table back. Derived columns are not persisted
/// and come back at their defaults.
pub fn load_csv(path: &Path) -> Result<Vec<ListingRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: ListingRecord =
            row.with_context(|| format!("Malformed row in {}", path.display()))?;
        records.push(record);
    }

    info!("Loaded {} listings from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample(link: &str, reviews: u32) -> ListingRecord {
        let mut record = ListingRecord::empty();
        record.link = link.to_string();
        record.rating = 4.5;
        record.reviews = reviews;
        record.guests = Some(2);
        record.price_original = 75;
        record.special_offer = -15;
        record
    }

    fn temp_csv(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stay-scout-{}-{}.csv", name, std::process::id()))
    }

    #[test]
    fn build_assigns_dense_one_based_ids() {
        let table = build_table(vec![sample("a", 1), sample("b", 2), sample("c", 3)]);
        let ids: Vec<u32> = table.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn csv_round_trip_preserves_records() {
        let table = build_table(vec![
            sample("https://example.com/rooms/1", 10),
            sample("https://example.com/rooms/2", 0),
        ]);
        let path = temp_csv("round-trip");

        assert!(save_csv(&table, &path).unwrap());
        let loaded = load_csv(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, table);
        assert_eq!(loaded[0].id, 1);
        assert_eq!(loaded[1].id, 2);
    }

    #[test]
    fn header_uses_fixed_column_order() {
        let table = build_table(vec![sample("x", 1)]);
        let path = temp_csv("header");
        save_csv(&table, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "id,title,link,rating,reviews,guests,bedrooms,beds,baths,years_hosting,\
             price_original,price_discount,nights,total_nights,special_offer,\
             cleaning_fee,service_fee,total"
        );
    }

    #[test]
    fn empty_table_writes_nothing() {
        let path = temp_csv("empty");
        assert!(!save_csv(&[], &path).unwrap());
        assert!(!path.exists());
    }
}
