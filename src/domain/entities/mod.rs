//! Domain entities.

mod attorney;
mod blog;
mod cached_asset;
mod practice_area;
mod record;

pub use attorney::Attorney;
pub use blog::Blog;
pub use cached_asset::{CacheKey, CacheOutcome, CachedAsset};
pub use practice_area::PracticeArea;
