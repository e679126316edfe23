pub mod feed_writer;
pub mod fetch_service;
pub mod pipeline;

pub use feed_writer::FeedWriter;
pub use fetch_service::{FetchService, PageFetcher};
pub use pipeline::{Pipeline, RunSummary};
