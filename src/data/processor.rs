use crate::models::ListingRecord;

/// Add the derived `reviews_per_year` column over the whole table, returning
/// a new table. A tenure of zero years counts as one so the ratio is always
/// defined; that substitution is deliberate, not a null. Idempotent.
pub fn with_reviews_per_year(records: &[ListingRecord]) -> Vec<ListingRecord> {
    records
        .iter()
        .cloned()
        .map(|mut record| {
            let years = if record.years_hosting == 0 {
                1
            } else {
                record.years_hosting
            };
            record.reviews_per_year = f64::from(record.reviews) / f64::from(years);
            record
        })
        .collect()
}
