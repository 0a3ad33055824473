mod data;
mod extract;
mod models;
mod scrapers;

use std::path::Path;

use data::{processor, stats, table, ListingFilter, OccupancyModel};
use scrapers::{
    BrowserController, ChromeController, CollectConfig, ListingScraper, SearchCollector,
};
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Stay Scout - rental listing collector");

    // Passing an existing CSV skips collection and only runs the analysis.
    let args: Vec<String> = std::env::args().collect();
    let table = if let Some(existing) = args.get(1) {
        table::load_csv(Path::new(existing))?
    } else {
        let config = CollectConfig::default();
        let browser = ChromeController::new()?;

        let report = SearchCollector::new(&browser, &config).collect_links()?;
        info!(
            "Collected {} links over {} pages in {}s",
            report.links.len(),
            report.pages_visited,
            (report.finished_at - report.started_at).num_seconds()
        );

        let rows = ListingScraper::new(&browser, &config).scrape_all(&report.links);
        browser.close();

        let table = table::build_table(rows);
        if table::save_csv(&table, Path::new("listing_data.csv"))? {
            let json = serde_json::to_string_pretty(&table)?;
            tokio::fs::write("listing_data.json", json).await?;
            info!("Saved raw records to listing_data.json");
        }
        table
    };

    if table.is_empty() {
        warn!("No listings to analyze");
        return Ok(());
    }

    let table = processor::with_reviews_per_year(&table);

    for (name, model) in [
        ("simple", OccupancyModel::Simple),
        ("review-rate", OccupancyModel::ReviewRate),
    ] {
        let (_, summary) = stats::aggregate(&table, &ListingFilter::default(), model);
        println!("\n--- Summary ({name} occupancy model) ---");
        println!("{summary}");
    }

    Ok(())
}
