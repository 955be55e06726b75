use anyhow::{Context, Result};
use scraper::node::Node;
use scraper::{ElementRef, Html};
use tracing::info;

use crate::config::Config;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Fetch the raw HTML of the listing page. Non-2xx responses and network
/// errors abort the run.
pub async fn fetch_html(config: &Config) -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.fetch_timeout)
        .build()?;

    info!("Fetching {}", config.target_url);
    let body = client
        .get(&config.target_url)
        .send()
        .await
        .context("Failed to fetch listing page")?
        .error_for_status()
        .context("Listing page returned an error status")?
        .text()
        .await
        .context("Failed to read listing page body")?;

    info!("Fetched {} bytes", body.len());
    Ok(body)
}

/// Extract the visible text of a page: script and style subtrees are
/// dropped, everything else is joined with whitespace runs collapsed to
/// single spaces.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts: Vec<&str> = Vec::new();
    collect_text(document.root_element(), &mut parts);
    parts
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect_text<'a>(element: ElementRef<'a>, out: &mut Vec<&'a str>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push(text),
            Node::Element(el) => {
                let name = el.name();
                if name == "script" || name == "style" {
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(child_ref, out);
                }
            }
            _ => {}
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_and_style() {
        let html = "<html><head><style>body { color: red; }</style>\
                    <script>var x = 1;</script></head>\
                    <body><p>June 5: Jazz Night</p></body></html>";
        let text = extract_text(html);
        assert_eq!(text, "June 5: Jazz Night");
    }

    #[test]
    fn collapses_whitespace() {
        let html = "<body><p>June   5:\n\n   Jazz\tNight</p><p>at   dusk</p></body>";
        assert_eq!(extract_text(html), "June 5: Jazz Night at dusk");
    }

    #[test]
    fn nested_script_inside_body() {
        let html = "<body><div>before<script>document.write('hidden')</script>after</div></body>";
        assert_eq!(extract_text(html), "before after");
    }

    #[test]
    fn empty_page() {
        assert_eq!(extract_text(""), "");
    }

    #[test]
    fn concerts_fixture() {
        let html = std::fs::read_to_string("tests/fixtures/concerts.html").unwrap();
        let text = extract_text(html.as_str());
        assert!(text.contains("June 5: Contemporary Dance"));
        assert!(text.contains("SummerStage"));
        assert!(!text.contains("trackPageView"));
        assert!(!text.contains("font-family"));
    }
}
