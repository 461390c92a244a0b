//! # menushare
//!
//! Compress application state into compact, URL-safe tokens and back.
//!
//! A token is built in three stages:
//!
//! 1. the state is serialized to JSON,
//! 2. the JSON is gzip-compressed (inline images dominate the size),
//! 3. the bytes are base64-encoded with the URL-safe substitutions
//!    (`+` → `-`, `/` → `_`) and without `=` padding.
//!
//! Decoding reverses the stages and checks that the payload has the expected
//! top-level shape before trusting it.
//!
//! ## Quick Start
//!
//! ```rust
//! use menushare::{ShareCodec, Shareable};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Board {
//!     title: String,
//!     items: Vec<String>,
//! }
//!
//! impl Shareable for Board {
//!     const REQUIRED_FIELDS: &'static [&'static str] = &["title", "items"];
//! }
//!
//! let codec = ShareCodec::new();
//! let board = Board { title: "CITY DELI".into(), items: vec!["WRAP".into()] };
//! let token = codec.encode(&board).unwrap();
//! assert!(token.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
//! assert_eq!(codec.decode::<Board>(&token).unwrap(), Some(board));
//! ```
//!
//! ## Modules
//!
//! - [`codec`] - The share codec
//! - [`compression`] - Compression algorithms (gzip)
//! - [`token`] - URL-safe text alphabet
//! - [`error`] - Error types and result definitions

#[macro_use]
extern crate log;

/// The share codec.
pub mod codec;

/// Compression algorithms support (gzip).
pub mod compression;

/// Error types and result definitions.
pub mod error;

/// URL-safe text encoding of compressed bytes.
pub mod token;

pub use codec::{DEFAULT_MAX_PAYLOAD, ShareCodec, Shareable};
pub use compression::gzip::GzipCompressor;
pub use compression::traits::CompressionInterface;
pub use error::{Result, ShareError};
