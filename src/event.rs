use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

pub const TIME_TBA: &str = "Time TBA";
pub const LOCATION_TBA: &str = "Location TBA";
pub const UNKNOWN_VENUE: &str = "Unknown Venue";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Candidate record as it comes back from the model or the fallback parser.
/// Every field is optional at this stage; unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub venue_series: Option<String>,
}

/// Normalized record: parsed date, sentinel defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub date: NaiveDate,
    pub name: String,
    pub time: String,
    pub location: String,
    pub venue_series: String,
}

/// Drop records whose (date, event_name) key was already seen, keeping the
/// first occurrence. Missing values key as the empty string.
pub fn dedup_events(events: Vec<RawEvent>) -> Vec<RawEvent> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut unique = Vec::with_capacity(events.len());
    for event in events {
        let key = (
            event.date.clone().unwrap_or_default(),
            event.event_name.clone().unwrap_or_default(),
        );
        if seen.insert(key) {
            unique.push(event);
        }
    }
    unique
}

/// Fill sentinel defaults, parse dates, and sort chronologically (stable,
/// so equal dates keep their input order).
///
/// A record without a name is not a valid event and is dropped. A record
/// with a missing or unparsable date is also dropped with a warning rather
/// than failing the whole run.
pub fn normalize_events(events: Vec<RawEvent>) -> Vec<Event> {
    let mut normalized = Vec::with_capacity(events.len());
    for event in events {
        let Some(name) = event.event_name.filter(|n| !n.trim().is_empty()) else {
            warn!("Dropping record without an event name");
            continue;
        };
        let date = match event.date.as_deref() {
            Some(raw) => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                Ok(date) => date,
                Err(err) => {
                    warn!("Dropping {name:?}: unparsable date {raw:?} ({err})");
                    continue;
                }
            },
            None => {
                warn!("Dropping {name:?}: no date");
                continue;
            }
        };
        normalized.push(Event {
            date,
            name,
            time: event.time.unwrap_or_else(|| TIME_TBA.to_string()),
            location: event.location.unwrap_or_else(|| LOCATION_TBA.to_string()),
            venue_series: event.venue_series.unwrap_or_else(|| UNKNOWN_VENUE.to_string()),
        });
    }
    normalized.sort_by_key(|e| e.date);
    normalized
}

// ── Tests ──
