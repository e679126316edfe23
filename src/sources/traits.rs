use crate::domain::Item;
use crate::errors::Warning;

/// Items pulled from one listing page, plus the anomalies hit along the way
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub items: Vec<Item>,
    pub warnings: Vec<Warning>,
}

/// Turns listing-page markup into feed items, in document order.
///
/// This is the only layer that knows what the source site's HTML looks like.
pub trait Extractor {
    fn extract(&self, markup: &str) -> Extraction;
}
