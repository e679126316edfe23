pub mod feed;
pub mod item;

pub use feed::{ChannelMeta, Feed};
pub use item::Item;
