//! Compression module.
//!
//! Provides a unified interface for the compression stage of the codec.
//! Currently supports gzip.

pub mod gzip;
pub mod traits;
