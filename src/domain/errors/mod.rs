//! Domain error types.

mod api_error;
mod cache_error;

pub use api_error::ApiError;
pub use cache_error::{CacheError, CacheResult};
