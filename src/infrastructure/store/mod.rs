//! Local asset stores for mirrored images.

pub mod disk_store;
pub mod memory_store;

pub use disk_store::{DEFAULT_CACHE_DIR, DEFAULT_PUBLIC_PREFIX, DiskAssetStore};
pub use memory_store::MemoryAssetStore;
