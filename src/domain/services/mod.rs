//! Pure domain services.

pub mod content_addressor;

pub use content_addressor::{ALLOWED_EXTENSIONS, DEFAULT_EXTENSION, compute_key, extension_of};
