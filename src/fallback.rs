use std::sync::LazyLock;

use regex::Regex;

use crate::event::RawEvent;

static DATE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(June|July|August|September)\s+(\d{1,2}):\s*(.+)").unwrap());

const MONTHS: &[(&str, u32)] = &[
    ("June", 6),
    ("July", 7),
    ("August", 8),
    ("September", 9),
];

/// Venue markers in their fixed check order. Every matching check on a
/// line updates the current venue, so the last matching marker wins.
const VENUE_MARKERS: &[&str] = &["Bryant Park", "SummerStage", "Hudson Yards"];

/// Deterministic line-oriented extractor, used only when the model path
/// yields no records. Dates without a year get `year`.
pub fn parse_events(text: &str, year: i32) -> Vec<RawEvent> {
    let mut events = Vec::new();
    let mut current_venue = "Unknown".to_string();

    for line in text.lines() {
        let line = line.trim();

        for marker in VENUE_MARKERS {
            if line.contains(marker) {
                current_venue = (*marker).to_string();
            }
        }

        let Some(caps) = DATE_LINE_RE.captures(line) else {
            continue;
        };
        let month = match MONTHS.iter().find(|(name, _)| *name == &caps[1]) {
            Some((_, m)) => *m,
            None => continue,
        };
        let day: u32 = match caps[2].parse() {
            Ok(day) => day,
            Err(_) => continue,
        };

        events.push(RawEvent {
            date: Some(format!("{year}-{month:02}-{day:02}")),
            event_name: Some(caps[3].trim().to_string()),
            time: None,
            location: None,
            venue_series: Some(current_venue.clone()),
        });
    }

    events
}

// ── Tests ──
