use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::event::Event;

const HEADER: &str = "date,event_name,time,location,venue_series";

/// Write the final record set as CSV, one row per event, overwriting any
/// existing file. Write failures abort the run.
pub fn write_csv(path: &Path, events: &[Event]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{HEADER}")?;
    for event in events {
        writeln!(out, "{}", render_row(event))?;
    }
    out.flush()?;
    Ok(())
}

fn render_row(event: &Event) -> String {
    [
        event.date.format("%Y-%m-%d").to_string(),
        event.name.clone(),
        event.time.clone(),
        event.location.clone(),
        event.venue_series.clone(),
    ]
    .iter()
    .map(|field| quote_field(field))
    .collect::<Vec<_>>()
    .join(",")
}

fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Human-readable run report: counts, date range, venue list, and the
/// first few rows.
pub fn print_summary(events: &[Event], path: &Path) {
    println!("\n=== SUMMARY ===");
    println!("Total events: {}", events.len());
    if let (Some(first), Some(last)) = (events.first(), events.last()) {
        println!(
            "Date range: {} to {}",
            first.date.format("%Y-%m-%d"),
            last.date.format("%Y-%m-%d")
        );
    }
    println!("Venue series: {}", venue_list(events).join(", "));
    println!("Data saved to: {}", path.display());

    println!("\n=== SAMPLE EVENTS ===");
    for event in events.iter().take(5) {
        println!(
            "{}  {:<32} {:<12} {}",
            event.date.format("%Y-%m-%d"),
            event.name,
            event.time,
            event.venue_series
        );
    }
}

/// Distinct venue-series names in first-appearance order.
fn venue_list(events: &[Event]) -> Vec<&str> {
    let mut venues: Vec<&str> = Vec::new();
    for event in events {
        if !venues.contains(&event.venue_series.as_str()) {
            venues.push(&event.venue_series);
        }
    }
    venues
}

// ── Tests ──
