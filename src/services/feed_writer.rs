use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use rss::extension::atom::{self, AtomExtension, Link};
use rss::{Channel, ChannelBuilder, Guid, ItemBuilder};
use tracing::info;

use crate::domain::{Feed, Item};
use crate::errors::{FeedError, FeedResult};

const GENERATOR: &str = concat!("whitehouse-rss ", env!("CARGO_PKG_VERSION"));

/// Serializes a [`Feed`] as an RSS 2.0 document
pub struct FeedWriter {
    self_url: Option<String>,
}

impl FeedWriter {
    pub fn new(self_url: Option<String>) -> Self {
        Self { self_url }
    }

    pub fn build_channel(&self, feed: &Feed, built_at: DateTime<Utc>) -> Channel {
        let items: Vec<rss::Item> = feed.items.iter().map(Self::build_item).collect();

        let mut channel = ChannelBuilder::default()
            .title(feed.channel.title.clone())
            .link(feed.channel.link.clone())
            .description(feed.channel.description.clone())
            .language(feed.channel.language.clone())
            .last_build_date(built_at.to_rfc2822())
            .generator(GENERATOR.to_string())
            .items(items)
            .build();

        if let Some(self_url) = &self.self_url {
            let mut link = Link::default();
            link.set_href(self_url.clone());
            link.set_rel("self");
            link.set_mime_type(Some("application/rss+xml".to_string()));

            let mut namespaces = BTreeMap::new();
            namespaces.insert("atom".to_string(), atom::NAMESPACE.to_string());

            channel.set_namespaces(namespaces);
            channel.set_atom_ext(Some(AtomExtension { links: vec![link] }));
        }

        channel
    }

    /// Links on the source site are per-article URLs, so they double as permalink GUIDs
    fn build_item(item: &Item) -> rss::Item {
        ItemBuilder::default()
            .title(xml_text(&item.title))
            .link(item.link.clone())
            .guid(Guid {
                value: item.link.clone(),
                permalink: true,
            })
            .pub_date(item.published.to_rfc2822())
            .description(xml_text(&item.summary))
            .build()
    }

    pub fn render(&self, feed: &Feed, built_at: DateTime<Utc>) -> FeedResult<String> {
        let channel = self.build_channel(feed, built_at);
        let buf = channel.pretty_write_to(Vec::new(), b' ', 2)?;

        String::from_utf8(buf).map_err(|e| FeedError::Render(e.to_string()))
    }

    /// Replace whatever is at `path` with the rendered document
    pub fn write(&self, xml: &str, path: &Path) -> FeedResult<()> {
        let write_error = |source| FeedError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(path, xml).map_err(write_error)?;

        info!("RSS feed written to: {}", path.display());
        Ok(())
    }
}

/// Drop characters XML 1.0 cannot carry even when escaped
fn xml_text(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            matches!(c,
                '\t' | '\n' | '\r'
                | '\u{20}'..='\u{D7FF}'
                | '\u{E000}'..='\u{FFFD}'
                | '\u{10000}'..='\u{10FFFF}')
        })
        .collect()
}
