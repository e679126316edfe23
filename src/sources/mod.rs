pub mod briefings;
pub mod dates;
pub mod traits;

pub use briefings::BriefingsExtractor;
pub use traits::{Extraction, Extractor};
