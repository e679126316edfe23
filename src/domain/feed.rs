use serde::{Deserialize, Serialize};

use super::Item;

/// Fixed metadata describing the generated channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMeta {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    pub channel: ChannelMeta,
    pub items: Vec<Item>,
}

impl Feed {
    pub fn new(channel: ChannelMeta, items: Vec<Item>) -> Self {
        Self { channel, items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
