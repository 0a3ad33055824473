use std::collections::HashMap;
use std::fmt;

use crate::models::ListingRecord;

/// Exact-match filters over the capacity columns. `None` leaves a column
/// unconstrained; supplied filters compose with logical AND. A filter can
/// never match a listing whose field is unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub baths: Option<u32>,
    pub bedrooms: Option<u32>,
    pub beds: Option<u32>,
}

impl ListingFilter {
    pub fn matches(&self, record: &ListingRecord) -> bool {
        fn field_ok(wanted: Option<u32>, actual: Option<u32>) -> bool {
            match wanted {
                None => true,
                Some(value) => actual == Some(value),
            }
        }
        field_ok(self.baths, record.baths)
            && field_ok(self.bedrooms, record.bedrooms)
            && field_ok(self.beds, record.beds)
    }
}

/// Pure subset selection; the input table is never mutated.
pub fn filter_records(records: &[ListingRecord], filter: &ListingFilter) -> Vec<ListingRecord> {
    records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}

/// Two occupancy/income estimates coexist in the dashboard; neither is
/// authoritative, so the caller picks one by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyModel {
    /// Occupancy = mean reviews-per-year scaled by 3, capped at 100%;
    /// income scales the 30-day gross by that occupancy.
    Simple,
    /// Assumes 30% of guests review and 3 nights per stay; income is the
    /// plain 30-day gross, ignoring occupancy.
    ReviewRate,
}

const REVIEW_RATE: f64 = 0.30;
const NIGHTS_PER_STAY: f64 = 3.0;

/// Descriptive statistics over a (possibly filtered) subset. An empty subset
/// yields all zeros rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub listing_count: usize,
    pub price_mean: f64,
    pub price_median: f64,
    /// Lowest mode on ties.
    pub price_mode: i64,
    pub price_min: i64,
    pub price_max: i64,
    pub rating_mean: f64,
    pub reviews_per_year_mean: f64,
    pub years_hosting_mean: f64,
    /// Percentage points in [0, 100].
    pub occupancy_pct: f64,
    pub monthly_income: f64,
}

/// Filter the table and compute the stat tiles over the subset. Expects the
/// derived `reviews_per_year` column to be populated.
pub fn aggregate(
    records: &[ListingRecord],
    filter: &ListingFilter,
    model: OccupancyModel,
) -> (Vec<ListingRecord>, SummaryStats) {
    let subset = filter_records(records, filter);

    let prices: Vec<i64> = subset.iter().map(|r| r.price_original).collect();
    let price_mean = mean(subset.iter().map(|r| r.price_original as f64));
    let rpy_mean = mean(subset.iter().map(|r| r.reviews_per_year));

    let occupancy_pct = match model {
        OccupancyModel::Simple => (rpy_mean * 3.0).min(100.0),
        OccupancyModel::ReviewRate => {
            let stays = rpy_mean / REVIEW_RATE;
            let nights_occupied = stays * NIGHTS_PER_STAY;
            (nights_occupied / 365.0 * 100.0).min(100.0)
        }
    };
    let monthly_income = match model {
        OccupancyModel::Simple => price_mean * 30.0 * occupancy_pct / 100.0,
        OccupancyModel::ReviewRate => price_mean * 30.0,
    };

    let stats = SummaryStats {
        listing_count: subset.len(),
        price_mean,
        price_median: median(&prices),
        price_mode: mode(&prices),
        price_min: prices.iter().copied().min().unwrap_or(0),
        price_max: prices.iter().copied().max().unwrap_or(0),
        rating_mean: mean(subset.iter().map(|r| r.rating)),
        reviews_per_year_mean: rpy_mean,
        years_hosting_mean: mean(subset.iter().map(|r| f64::from(r.years_hosting))),
        occupancy_pct,
        monthly_income,
    };
    (subset, stats)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn median(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid] as f64
    } else {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    }
}

/// Most frequent value; ties break toward the lowest value.
fn mode(values: &[i64]) -> i64 {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for value in values {
        *counts.entry(*value).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .min_by(|(va, ca), (vb, cb)| cb.cmp(ca).then(va.cmp(vb)))
        .map(|(value, _)| value)
        .unwrap_or(0)
}

impl fmt::Display for SummaryStats {
    /// Dashboard tile formatting: whole dollars, one-decimal means, whole
    /// percent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Listings:            {}", self.listing_count)?;
        writeln!(f, "Average price:       ${:.0}", self.price_mean)?;
        writeln!(f, "Median price:        ${:.0}", self.price_median)?;
        writeln!(f, "Mode price:          ${}", self.price_mode)?;
        writeln!(f, "Minimum price:       ${}", self.price_min)?;
        writeln!(f, "Maximum price:       ${}", self.price_max)?;
        writeln!(f, "Average rating:      {:.1}", self.rating_mean)?;
        writeln!(f, "Reviews per year:    {:.1}", self.reviews_per_year_mean)?;
        writeln!(f, "Years hosting:       {:.1}", self.years_hosting_mean)?;
        writeln!(f, "Estimated occupancy: {:.0}%", self.occupancy_pct)?;
        write!(f, "Est. monthly income: ${:.0}", self.monthly_income)
    }
}
