//! Common helpers shared across projects.
//!
//! This crate owns small, pure transformations over `serde_json` values
//! (safe codec, nested lookup, flattening), slice chunking, a retry policy
//! with exponential backoff, and a named-logger registry. It intentionally
//! excludes Lambda runtime and HTTP concerns; see the `sample_lambda` crate
//! for a composition of these helpers behind a handler.

pub mod chunk;
pub mod error;
pub mod flatten;
pub mod json;
pub mod logging;
pub mod nested;
pub mod retry;
pub mod version;

pub use error::FrameworkError;
pub use version::{get_version, get_version_tuple, VERSION};
