use std::path::PathBuf;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::Feed;
use crate::errors::{FeedResult, Warning};
use crate::services::feed_writer::FeedWriter;
use crate::services::fetch_service::{FetchService, PageFetcher};
use crate::sources::{BriefingsExtractor, Extraction, Extractor};

/// Outcome of one pass over the listing page
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub item_count: usize,
    /// Where the feed was written; `None` for a dry run
    pub output_path: Option<PathBuf>,
    pub warnings: Vec<Warning>,
}

impl RunSummary {
    pub fn is_empty_result(&self) -> bool {
        self.warnings.contains(&Warning::EmptyResult)
    }
}

/// Fetch → extract → write, once per invocation
pub struct Pipeline<F: PageFetcher, E: Extractor> {
    config: Config,
    fetcher: F,
    extractor: E,
    writer: FeedWriter,
}

impl Pipeline<FetchService, BriefingsExtractor> {
    /// Pipeline against the live site described by `config`
    pub fn from_config(config: Config) -> FeedResult<Self> {
        let fetcher = FetchService::new(&config)?;
        let extractor = BriefingsExtractor::new(&config.base_url, &config.source_url)?;
        Ok(Self::new(config, fetcher, extractor))
    }
}

impl<F: PageFetcher, E: Extractor> Pipeline<F, E> {
    pub fn new(config: Config, fetcher: F, extractor: E) -> Self {
        let writer = FeedWriter::new(config.self_url.clone());
        Self {
            config,
            fetcher,
            extractor,
            writer,
        }
    }

    fn collect(&self) -> FeedResult<(Feed, Vec<Warning>)> {
        let markup = self.fetcher.fetch(&self.config.source_url)?;

        let Extraction {
            items,
            mut warnings,
        } = self.extractor.extract(&markup);
        info!("Found {} entries", items.len());

        let feed = Feed::new(self.config.channel.clone(), items);
        if feed.is_empty() {
            warn!("{}", Warning::EmptyResult);
            warnings.push(Warning::EmptyResult);
        }

        Ok((feed, warnings))
    }

    /// Build the document without touching the output file
    pub fn render(&self) -> FeedResult<(String, RunSummary)> {
        let (feed, warnings) = self.collect()?;
        let xml = self.writer.render(&feed, Utc::now())?;

        Ok((
            xml,
            RunSummary {
                item_count: feed.items.len(),
                output_path: None,
                warnings,
            },
        ))
    }

    /// Full run: the output file is only replaced once the fetch has succeeded
    pub fn run(&self) -> FeedResult<RunSummary> {
        let (xml, summary) = self.render()?;
        self.writer.write(&xml, &self.config.output_path)?;

        Ok(RunSummary {
            output_path: Some(self.config.output_path.clone()),
            ..summary
        })
    }
}
