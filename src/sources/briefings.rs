use std::collections::HashSet;

use chrono::Utc;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};
use url::Url;

use crate::domain::Item;
use crate::errors::{FeedError, FeedResult, ParseWarning, Warning};
use crate::sources::dates::{find_display_date, parse_display_date};
use crate::sources::traits::{Extraction, Extractor};

/// Path segment shared by every briefing/statement detail page
const ENTRY_PATH_MARKER: &str = "/briefings-statements/";

/// Anchor texts that belong to pagination or navigation, not to entries
const NAV_WORDS: &[&str] = &["next", "previous", "older", "newer", "page", "»", "«"];

/// Anything shorter is a tag, a "Read more" link or similar
const MIN_TITLE_CHARS: usize = 10;

/// How far up from the title link an entry's container may be
const MAX_CONTAINER_DEPTH: usize = 5;

/// Elements that wrap exactly one listing entry
const ENTRY_ELEMENTS: &[&str] = &["li", "article"];

/// Elements that span the whole page, never a single entry
const PAGE_ELEMENTS: &[&str] = &["html", "body", "main"];

pub struct BriefingsExtractor {
    base_url: Url,
    listing_path: String,
    anchors: Selector,
    times: Selector,
    excerpts: Selector,
    paragraphs: Selector,
}

impl BriefingsExtractor {
    pub fn new(base_url: &str, source_url: &str) -> FeedResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FeedError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let source = Url::parse(source_url)
            .map_err(|e| FeedError::InvalidUrl(format!("{}: {}", source_url, e)))?;

        Ok(Self {
            base_url,
            listing_path: source.path().trim_end_matches('/').to_string(),
            anchors: selector("a[href]")?,
            times: selector("time")?,
            excerpts: selector("[class*='excerpt']")?,
            paragraphs: selector("p")?,
        })
    }

    /// Resolve an href and keep it only if it points at a single entry
    fn entry_url(&self, href: &str) -> Option<Url> {
        let href = href.trim();
        if href.is_empty() || href.contains("/page/") {
            return None;
        }

        let mut url = self.base_url.join(href).ok()?;
        url.set_fragment(None);

        let path = url.path();
        let trimmed = path.trim_end_matches('/');
        if !path.contains(ENTRY_PATH_MARKER)
            || trimmed == ENTRY_PATH_MARKER.trim_end_matches('/')
            || trimmed == self.listing_path
        {
            return None;
        }

        Some(url)
    }

    /// Link and title of an anchor that looks like an entry headline
    fn entry_link(&self, anchor: ElementRef<'_>) -> Option<(Url, String)> {
        let link = self.entry_url(anchor.value().attr("href")?)?;
        let title = collapse_whitespace(&anchor.text().collect::<String>());

        if title.chars().count() < MIN_TITLE_CHARS || looks_like_navigation(&title) {
            return None;
        }

        Some((link, title))
    }

    /// Ancestor of the title link that wraps this entry and no other.
    ///
    /// Climbing stops at the first `<li>`/`<article>`, and never reaches page-level
    /// elements, so footers and banners stay out of the entry.
    fn container<'a>(&self, anchor: ElementRef<'a>, link: &Url) -> Option<ElementRef<'a>> {
        let mut container = None;

        for ancestor in anchor
            .ancestors()
            .filter_map(ElementRef::wrap)
            .take(MAX_CONTAINER_DEPTH)
        {
            let name = ancestor.value().name();
            if PAGE_ELEMENTS.contains(&name) {
                break;
            }

            let holds_other_entry = ancestor
                .select(&self.anchors)
                .filter_map(|a| self.entry_link(a))
                .any(|(other, _)| other != *link);

            if holds_other_entry {
                break;
            }
            container = Some(ancestor);

            if ENTRY_ELEMENTS.contains(&name) {
                break;
            }
        }

        container
    }

    /// Displayed date text of an entry: a `<time>` element first, then free text
    fn date_text(&self, container: ElementRef<'_>) -> Option<String> {
        if let Some(time) = container.select(&self.times).next() {
            if let Some(datetime) = time.value().attr("datetime") {
                if parse_display_date(datetime).is_some() {
                    return Some(datetime.to_string());
                }
            }
            let text = collapse_whitespace(&time.text().collect::<String>());
            if parse_display_date(&text).is_some() {
                return Some(text);
            }
            if let Some(date) = find_display_date(&text) {
                return Some(date.to_string());
            }
            if !text.is_empty() {
                let surrounding = container.text().collect::<Vec<_>>().join(" ");
                return Some(find_display_date(&surrounding).map_or(text, str::to_string));
            }
        }

        let text = container.text().collect::<Vec<_>>().join(" ");
        find_display_date(&text).map(str::to_string)
    }

    fn summary(&self, container: ElementRef<'_>, title: &str) -> Option<String> {
        let is_summary = |text: &String| {
            !text.is_empty() && text != title && find_display_date(text) != Some(text.as_str())
        };

        container
            .select(&self.excerpts)
            .chain(container.select(&self.paragraphs))
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .find(is_summary)
    }
}

impl Extractor for BriefingsExtractor {
    fn extract(&self, markup: &str) -> Extraction {
        let document = Html::parse_document(markup);
        let now = Utc::now();

        let mut extraction = Extraction::default();
        let mut seen: HashSet<Url> = HashSet::new();

        for anchor in document.select(&self.anchors) {
            let Some((link, title)) = self.entry_link(anchor) else {
                continue;
            };

            if !seen.insert(link.clone()) {
                continue;
            }

            let container = self.container(anchor, &link);
            let date_text = container.and_then(|c| self.date_text(c));
            let summary = container.and_then(|c| self.summary(c, &title));

            let published = match date_text.as_deref().and_then(parse_display_date) {
                Some(published) => published,
                None => {
                    let parse_warning = ParseWarning {
                        title: title.clone(),
                        field: "published",
                        raw: date_text.clone().unwrap_or_default(),
                    };
                    warn!("{}", parse_warning);
                    extraction.warnings.push(Warning::Parse(parse_warning));
                    now
                }
            };

            info!(
                "Found: {}... ({})",
                truncate_chars(&title, 60),
                date_text.as_deref().unwrap_or("Unknown")
            );

            extraction
                .items
                .push(Item::new(title, link.to_string(), published).with_summary(summary));
        }

        extraction
    }
}

fn selector(css: &str) -> FeedResult<Selector> {
    Selector::parse(css).map_err(|e| FeedError::Config(format!("bad selector {}: {}", css, e)))
}

fn looks_like_navigation(title: &str) -> bool {
    let lower = title.to_lowercase();
    NAV_WORDS.iter().any(|word| lower.contains(word))
}

/// Single-spaced text with control characters (e.g. from `&#1;`) dropped
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.chars().filter(|c| !c.is_control()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
