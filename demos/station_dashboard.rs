//! Builds the dashboard for one station and prints it as JSON.
//!
//! Usage: `cargo run --example station_dashboard -- ILAZIOCA17 2024`

use pws_calendar::{CalendarConfig, CalendarError, GridCell, StationCalendar};
use std::env;

#[tokio::main]
async fn main() -> Result<(), CalendarError> {
    let mut args = env::args().skip(1);
    let station = args.next().unwrap_or_else(|| "ILAZIOCA17".to_string());
    let year = args.next().and_then(|y| y.parse::<i32>().ok());

    let cache_folder = env::temp_dir().join("pws_calendar_demo");
    let config = CalendarConfig::builder().max_concurrent_fetches(3).build();
    let client = StationCalendar::with_config(cache_folder, config).await?;

    let dashboard = client
        .dashboard()
        .station(&station)
        .maybe_year(year)
        .call()
        .await?;

    println!(
        "{} ({}): {} points in {}, {} points in {}",
        dashboard.station,
        dashboard.country,
        dashboard.primary.len(),
        dashboard.year,
        dashboard.comparison.len(),
        dashboard.comparison_year
    );

    // First week of January, straight from the grid.
    for row in dashboard.grid.rows.iter().take(7) {
        match &row.cells[0] {
            GridCell::Temperatures { high, low } => println!(
                "Jan {:>2}: {:>5.1} {} / {:>5.1} {}",
                row.day, high.celsius, high.color, low.celsius, low.color
            ),
            GridCell::NoData => println!("Jan {:>2}: no data", row.day),
            GridCell::Blank => {}
        }
    }

    match serde_json::to_string_pretty(&dashboard) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Could not serialize dashboard: {e}"),
    }

    Ok(())
}
