pub mod capacity;
pub mod host;
pub mod price;
pub mod rating;

use regex::Regex;

/// How an extractor call went. Extractors never fail outright; they degrade
/// to field defaults and report what happened so the caller can log it with
/// the listing URL attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStatus {
    /// Everything the extractor looks for was found and parsed.
    Complete,
    /// The enclosing page section was absent; the whole group defaulted.
    SectionMissing,
    /// The section was present but some expected text pattern did not match;
    /// the affected fields defaulted.
    PatternMismatch,
}

impl ExtractStatus {
    pub fn is_complete(self) -> bool {
        self == ExtractStatus::Complete
    }

    /// Downgrade `Complete` to `PatternMismatch`, keeping `SectionMissing`.
    pub(crate) fn degrade(&mut self) {
        if *self == ExtractStatus::Complete {
            *self = ExtractStatus::PatternMismatch;
        }
    }
}

/// An extractor result: the field group with defaults substituted where
/// needed, plus the status describing how much of it was actually found.
#[derive(Debug)]
pub struct Extracted<T> {
    pub value: T,
    pub status: ExtractStatus,
}

impl<T> Extracted<T> {
    pub fn section_missing(value: T) -> Self {
        Self {
            value,
            status: ExtractStatus::SectionMissing,
        }
    }
}

/// First whole-unit dollar amount in `text`, e.g. "$90 x 3" -> 90.
pub(crate) fn dollar_amount(text: &str) -> Option<i64> {
    let re = Regex::new(r"\$(\d+)").unwrap();
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// First run of digits in `text`, e.g. "7 yrs" -> 7.
pub(crate) fn leading_int(text: &str) -> Option<u32> {
    let re = Regex::new(r"(\d+)").unwrap();
    re.captures(text)?.get(1)?.as_str().parse().ok()
}
