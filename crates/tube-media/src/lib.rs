//! # tube-media
//!
//! Media ingestion adapter. Takes a staged local temporary file, moves it into
//! object storage, and returns a canonical URL. The temporary file is removed
//! on every path - success and failure alike - so callers never have to clean
//! up after an upload attempt.

mod error;
mod store;

pub use error::MediaError;
pub use store::{LocalMediaStore, MediaStore, MediaUpload};
