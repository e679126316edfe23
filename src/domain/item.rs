use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One briefing or statement listed on the source page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub link: String,
    pub published: DateTime<Utc>,
    pub summary: String,
}

impl Item {
    pub fn new(title: String, link: String, published: DateTime<Utc>) -> Self {
        Self {
            title,
            link,
            published,
            summary: String::new(),
        }
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary.unwrap_or_default();
        self
    }
}
