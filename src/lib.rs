//! lexmirror - build-time image mirroring for a law-firm site.
//!
//! Records fetched from the content API (attorneys, blog posts, practice
//! areas) reference remotely hosted images. This crate downloads each image
//! once into a content-addressed public directory and rewrites the records to
//! point at the local copies, so rendering never depends on the remote host.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the mirroring pipeline and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
