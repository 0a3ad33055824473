pub mod processor;
pub mod stats;
pub mod table;

pub use stats::{ListingFilter, OccupancyModel, SummaryStats};
