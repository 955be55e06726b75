use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TARGET_URL: &str = "https://secretnyc.co/free-summer-concerts-2025-full-list/";
pub const DEFAULT_OUTPUT_FILE: &str = "nyc_events.csv";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
pub const DEFAULT_CHUNK_SIZE: usize = 7000;
pub const DEFAULT_SEASON_YEAR: i32 = 2025;

const FETCH_TIMEOUT_SECS: u64 = 30;
const MAX_COMPLETION_TOKENS: u32 = 4000;

/// Runtime configuration, built once at startup and passed into each stage.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub target_url: String,
    pub output_file: PathBuf,
    pub model: String,
    pub max_tokens: u32,
    pub chunk_size: usize,
    pub fetch_timeout: Duration,
    pub season_year: i32,
}

impl Config {
    pub fn new(
        api_key: String,
        target_url: String,
        output_file: PathBuf,
        model: String,
        chunk_size: usize,
        season_year: i32,
    ) -> Self {
        Self {
            api_key,
            target_url,
            output_file,
            model,
            max_tokens: MAX_COMPLETION_TOKENS,
            chunk_size,
            fetch_timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            season_year,
        }
    }
}
