//! Event image resolution and local caching.

mod asset;
mod fetcher;

pub use asset::{CachedImage, ImageAsset, ImageData, TempImageFile};
pub use fetcher::ResourceFetcher;
