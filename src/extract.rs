use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::event::RawEvent;
use crate::llm::AnthropicClient;

/// Prompt template for one chunk: names the five fields and their sentinel
/// defaults, shows two worked examples, and demands a bare JSON array.
pub fn build_prompt(chunk: &str, year: i32) -> String {
    format!(
        r#"Analyze the following text about NYC free summer concerts and extract structured event data.

Look for patterns like:
- "June 5:" or "July 10:" followed by event names
- Artist or band names
- Venue information

For each event, extract:
- date (in YYYY-MM-DD format, assume year {year})
- event_name (the name/title of the event or artist)
- time (if specified, otherwise use "Time TBA")
- location (venue/address if specified, otherwise use the venue series location)
- venue_series (the concert series name like "Bryant Park", "SummerStage", "Hudson Yards", etc.)

IMPORTANT: Return ONLY a valid JSON array, nothing else. Skip any text before or after the JSON.
Only include events with specific dates. Skip recurring descriptions and TBA events.

Example format:
[
    {{
        "date": "{year}-06-05",
        "event_name": "Contemporary Dance",
        "time": "Time TBA",
        "location": "Bryant Park",
        "venue_series": "Bryant Park"
    }},
    {{
        "date": "{year}-06-25",
        "event_name": "Marc Scibilia",
        "time": "18:00",
        "location": "Public Square & Gardens, Hudson Yards",
        "venue_series": "Hudson Yards"
    }}
]

Text to analyze:
{chunk}"#
    )
}

/// First substring spanning the outermost bracketed array: greedy from the
/// first `[` to the last `]`.
pub fn find_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

/// Parse one model response into candidate records. Any shape problem is
/// an error the caller absorbs.
pub fn parse_response(response: &str) -> Result<Vec<RawEvent>> {
    let json = find_json_array(response).context("No JSON array in response")?;
    serde_json::from_str(json).context("JSON array did not parse as event records")
}

/// Run every chunk through the model, sequentially, accumulating whatever
/// parses. A failed chunk contributes nothing and never aborts the run.
pub async fn extract_events(
    client: &AnthropicClient,
    chunks: &[String],
    year: i32,
) -> Vec<RawEvent> {
    let pb = ProgressBar::new(chunks.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len}")
            .unwrap()
            .progress_chars("=> "),
    );

    let mut events = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let prompt = build_prompt(chunk, year);
        match client.complete(&prompt).await {
            Ok(response) => match parse_response(&response) {
                Ok(parsed) => {
                    pb.println(format!(
                        "Chunk {}/{} parsed {} events",
                        i + 1,
                        chunks.len(),
                        parsed.len()
                    ));
                    events.extend(parsed);
                }
                Err(err) => warn!("Chunk {}/{}: {err:#}", i + 1, chunks.len()),
            },
            Err(err) => warn!("Chunk {}/{} request failed: {err:#}", i + 1, chunks.len()),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    events
}

// ── Tests ──
