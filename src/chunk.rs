use std::sync::LazyLock;

use regex::Regex;

/// Section markers for the known concert series, in the order they are
/// tried. Each marker is matched case-insensitively and at most once.
const SERIES_MARKERS: &[&str] = &[
    r"Bryant Park Picnic Performances",
    r"SummerStage",
    r"Backyard at Hudson Yards",
    r"Battery Park.*?River & Blues Festival",
    r"Lincoln Center.*?Summer for the City",
    r"TSQ Live",
    r"Hudson River Park",
    r"Carnegie Hall Citywide",
    r"DUMBO.*?Live at the Archway",
    r"BRIC Celebrate Brooklyn",
    r"Sounds at Sunset",
];

static MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SERIES_MARKERS
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
        .collect()
});

pub fn series_markers() -> &'static [Regex] {
    &MARKERS
}

/// Split the extracted text into chunks sized for one model request each.
///
/// The semantic pass splits on the first occurrence of each marker; if it
/// produces one chunk or none (no marker matched), the text is re-split
/// into fixed-size windows instead.
pub fn split_into_chunks(text: &str, markers: &[Regex], max_size: usize) -> Vec<String> {
    if text.trim().is_empty() || max_size == 0 {
        return Vec::new();
    }
    let semantic = split_by_markers(text, markers, max_size);
    if semantic.len() > 1 {
        return semantic;
    }
    split_fixed(text, max_size)
}

fn split_by_markers(text: &str, markers: &[Regex], max_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut remaining = text;

    for marker in markers {
        let Some(m) = marker.find(remaining) else {
            continue;
        };
        let before = &remaining[..m.start()];
        let section_end = advance_chars(remaining, m.start(), max_size);
        let section = &remaining[m.start()..section_end];

        if !before.trim().is_empty() {
            chunks.push(before.trim().to_string());
        }
        if !section.trim().is_empty() {
            chunks.push(section.trim().to_string());
        }
        remaining = &remaining[section_end..];
    }

    if !remaining.trim().is_empty() {
        chunks.push(remaining.trim().to_string());
    }
    chunks
}

fn split_fixed(text: &str, max_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let end = advance_chars(text, start, max_size);
        let window = text[start..end].trim();
        if !window.is_empty() {
            chunks.push(window.to_string());
        }
        start = end;
    }
    chunks
}

/// Byte index `count` characters past `start`, clamped to the end of `s`.
fn advance_chars(s: &str, start: usize, count: usize) -> usize {
    s[start..]
        .char_indices()
        .nth(count)
        .map(|(i, _)| start + i)
        .unwrap_or(s.len())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(patterns: &[&str]) -> Vec<Regex> {
        patterns
            .iter()
            .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
            .collect()
    }

    #[test]
    fn splits_on_markers_in_order() {
        let text = "intro text SummerStage first series Bryant Park Picnic Performances second";
        let chunks = split_into_chunks(text, series_markers(), 7000);
        // Bryant Park is tried before SummerStage, so the first match
        // consumes everything from "Bryant Park..." onward.
        assert!(chunks.len() > 1);
        assert_eq!(chunks[0], "intro text SummerStage first series");
        assert!(chunks[1].starts_with("Bryant Park Picnic Performances"));
    }

    #[test]
    fn marker_split_emits_before_and_section() {
        let ms = markers(&["BETA"]);
        let chunks = split_into_chunks("alpha alpha BETA beta beta GAMMA", &ms, 1000);
        assert_eq!(chunks, vec!["alpha alpha", "BETA beta beta GAMMA"]);
    }

    #[test]
    fn section_capped_at_max_size_with_remainder() {
        let ms = markers(&["MARK"]);
        let chunks = split_into_chunks("pre MARKabcdefghij", &ms, 8);
        assert_eq!(chunks, vec!["pre", "MARKabcd", "efghij"]);
    }

    #[test]
    fn marker_tried_only_once() {
        let ms = markers(&["MARK"]);
        let chunks = split_into_chunks("a MARK b MARK c", &ms, 1000);
        // The second occurrence is inside the first section, never re-split.
        assert_eq!(chunks, vec!["a", "MARK b MARK c"]);
    }

    #[test]
    fn no_marker_falls_back_to_fixed_windows() {
        let text = "abcdefghij".repeat(3);
        let chunks = split_into_chunks(&text, &markers(&["ZZZ"]), 10);
        assert_eq!(chunks, vec!["abcdefghij"; 3]);
    }

    #[test]
    fn fixed_mode_reconstructs_source() {
        let text = "abcdefghijklmnopqrstuvwxyz0123";
        let chunks = split_into_chunks(text, &markers(&["ZZZ"]), 7);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn fixed_mode_is_char_boundary_safe() {
        let text = "héllo wörld ünïcode tèxt hère";
        let chunks = split_into_chunks(text, &markers(&["ZZZ"]), 5);
        assert!(!chunks.is_empty());
        // Windows fall on char boundaries and lose nothing but boundary
        // whitespace.
        let expected: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let got: String = chunks.concat().chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn no_empty_chunks() {
        let ms = markers(&["MARK"]);
        for text in ["   MARK   ", "MARK", "  a  MARK  b  ", "", "   "] {
            for chunk in split_into_chunks(text, &ms, 4) {
                assert!(!chunk.trim().is_empty(), "empty chunk from {text:?}");
            }
        }
    }

    #[test]
    fn case_insensitive_match() {
        let ms = markers(&["SummerStage"]);
        let chunks = split_into_chunks("before summerstage after", &ms, 1000);
        assert_eq!(chunks, vec!["before", "summerstage after"]);
    }
}
