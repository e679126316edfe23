use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::domain::ChannelMeta;
use crate::errors::{FeedError, FeedResult};

pub const DEFAULT_SOURCE_URL: &str = "https://www.whitehouse.gov/briefings-statements/";
pub const DEFAULT_OUTPUT_PATH: &str = "whitehouse_briefings.xml";
pub const DEFAULT_FEED_TITLE: &str = "White House Briefings & Statements";
pub const DEFAULT_FEED_DESCRIPTION: &str =
    "Official Briefings and Statements from the White House";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; whitehouse-rss/",
    env!("CARGO_PKG_VERSION"),
    "; +https://www.whitehouse.gov/briefings-statements/)"
);
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub source_url: String,
    /// Scheme and host (plus port, if any) that relative links resolve against
    pub base_url: String,
    pub output_path: PathBuf,
    pub user_agent: String,
    pub timeout: Duration,
    /// Public URL of the generated feed, advertised as atom:link rel="self"
    pub self_url: Option<String>,
    pub channel: ChannelMeta,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            base_url: "https://www.whitehouse.gov".to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            self_url: None,
            channel: ChannelMeta {
                title: DEFAULT_FEED_TITLE.to_string(),
                link: DEFAULT_SOURCE_URL.to_string(),
                description: DEFAULT_FEED_DESCRIPTION.to_string(),
                language: DEFAULT_LANGUAGE.to_string(),
            },
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> FeedResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(url) = std::env::var("WH_RSS_SOURCE_URL") {
            config = config
                .with_source_url(&url)
                .map_err(|e| env_error("WH_RSS_SOURCE_URL", e))?;
        }

        if let Ok(path) = std::env::var("WH_RSS_OUTPUT") {
            config = config.with_output_path(path);
        }

        if let Ok(agent) = std::env::var("WH_RSS_USER_AGENT") {
            config.user_agent = agent;
        }

        if let Ok(secs) = std::env::var("WH_RSS_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                FeedError::Config(format!("WH_RSS_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            config = config
                .with_timeout(secs)
                .map_err(|e| env_error("WH_RSS_TIMEOUT_SECS", e))?;
        }

        if let Ok(url) = std::env::var("WH_RSS_SELF_URL") {
            config = config
                .with_self_url(Some(url))
                .map_err(|e| env_error("WH_RSS_SELF_URL", e))?;
        }

        Ok(config)
    }

    /// Point the scraper at a different listing page; the base URL and channel link follow it
    pub fn with_source_url(mut self, url: &str) -> FeedResult<Self> {
        self.base_url = base_url_of(url)?;
        self.source_url = url.to_string();
        self.channel.link = url.to_string();
        Ok(self)
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> FeedResult<Self> {
        if secs == 0 {
            return Err(FeedError::Config("Timeout must be at least 1 second".to_string()));
        }
        self.timeout = Duration::from_secs(secs);
        Ok(self)
    }

    pub fn with_self_url(mut self, url: Option<String>) -> FeedResult<Self> {
        if let Some(ref url) = url {
            Url::parse(url).map_err(|e| FeedError::InvalidUrl(format!("{}: {}", url, e)))?;
        }
        self.self_url = url;
        Ok(self)
    }
}

/// Reduce a URL to its origin, e.g. `https://www.whitehouse.gov`
fn base_url_of(url: &str) -> FeedResult<String> {
    let parsed = Url::parse(url).map_err(|e| FeedError::InvalidUrl(format!("{}: {}", url, e)))?;

    if parsed.host_str().is_none() {
        return Err(FeedError::InvalidUrl(format!("{}: missing host", url)));
    }

    Ok(parsed.origin().ascii_serialization())
}

/// A bad environment value is a configuration problem, whatever check rejected it
fn env_error(var: &str, err: FeedError) -> FeedError {
    let detail = match err {
        FeedError::Config(msg) | FeedError::InvalidUrl(msg) => msg,
        other => other.to_string(),
    };
    FeedError::Config(format!("{}: {}", var, detail))
}
