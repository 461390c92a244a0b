//! Error types and result definitions for share token operations.

use thiserror::Error;

/// Result type used throughout `menushare`.
pub type Result<T> = std::result::Result<T, ShareError>;

/// Errors raised while turning state into a token or back.
#[derive(Debug, Error)]
pub enum ShareError {
    /// The serialized state is larger than the codec accepts.
    #[error("shared state is too large: {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge {
        /// Size of the serialized state in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// Serialization or compression did not complete.
    #[error("failed to encode shared state: {0}")]
    EncodingFailed(String),

    /// The token is malformed, truncated, or does not describe valid state.
    #[error("failed to decode shared state: {0}")]
    DecodeFailed(String),

    /// A compressor reported an error.
    #[error("compression error: {0}")]
    Compression(String),
}

impl ShareError {
    /// Creates a compression error from any message.
    pub fn compression_error(msg: impl Into<String>) -> Self {
        Self::Compression(msg.into())
    }

    /// Creates a decode error from any message.
    pub fn decode_failed(msg: impl Into<String>) -> Self {
        Self::DecodeFailed(msg.into())
    }

    /// Returns `true` when the error came from the encode direction.
    ///
    /// Callers use this to pick the "shrink your menu" message instead of the
    /// silent fallback used for decode failures.
    pub fn is_encode_error(&self) -> bool {
        matches!(self, Self::PayloadTooLarge { .. } | Self::EncodingFailed(_))
    }
}
