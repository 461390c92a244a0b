//! The share codec: state → JSON → compressed bytes → URL-safe token.

use serde::{Serialize, de::DeserializeOwned};

use crate::compression::{gzip::GzipCompressor, traits::CompressionInterface};
use crate::error::{Result, ShareError};
use crate::token;

/// Default ceiling for the serialized JSON form (32 MiB).
pub const DEFAULT_MAX_PAYLOAD: usize = 32 * 1024 * 1024;

/// State that can travel inside a share token.
///
/// `REQUIRED_FIELDS` lists the top-level JSON keys a decoded object must
/// carry before it is trusted as this type.
pub trait Shareable: Serialize + DeserializeOwned {
    /// Top-level keys checked before typed deserialization.
    const REQUIRED_FIELDS: &'static [&'static str];
}

/// Converts [`Shareable`] state to tokens and back.
///
/// Both directions are pure: the codec keeps no state between calls and
/// never returns partial output.
#[derive(Debug, Clone)]
pub struct ShareCodec<C = GzipCompressor> {
    compressor: C,
    max_payload: usize,
}

impl ShareCodec<GzipCompressor> {
    /// Creates a gzip codec with default limits.
    pub fn new() -> Self {
        Self::with_compressor(GzipCompressor::default())
    }
}

impl Default for ShareCodec<GzipCompressor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CompressionInterface> ShareCodec<C> {
    /// Creates a codec around the given compressor.
    pub fn with_compressor(compressor: C) -> Self {
        Self {
            compressor,
            max_payload: DEFAULT_MAX_PAYLOAD,
        }
    }

    /// Sets the largest serialized payload `encode` accepts.
    pub fn with_max_payload(mut self, max_payload: usize) -> Self {
        self.max_payload = max_payload;
        self
    }

    /// Returns the configured payload limit.
    pub fn max_payload(&self) -> usize {
        self.max_payload
    }

    /// Encodes `state` into a URL-safe token.
    ///
    /// # Errors
    ///
    /// [`ShareError::PayloadTooLarge`] if the serialized state exceeds the
    /// limit, [`ShareError::EncodingFailed`] if serialization or compression
    /// fails.
    pub fn encode<T: Shareable>(&self, state: &T) -> Result<String> {
        let json = serde_json::to_vec(state)
            .map_err(|e| ShareError::EncodingFailed(format!("serialization failed: {e}")))?;

        if json.len() > self.max_payload {
            return Err(ShareError::PayloadTooLarge {
                size: json.len(),
                limit: self.max_payload,
            });
        }

        let compressed = self
            .compressor
            .compress(&json)
            .map_err(|e| ShareError::EncodingFailed(e.to_string()))?;

        let token = token::encode_bytes(&compressed);
        debug!(
            "encoded {} bytes of state into a {} character token ({})",
            json.len(),
            token.len(),
            self.compressor.get_name()
        );
        Ok(token)
    }

    /// Decodes a token back into state.
    ///
    /// Returns `Ok(None)` for an empty or whitespace-only token.
    ///
    /// # Errors
    ///
    /// [`ShareError::DecodeFailed`] for anything that is not a token produced
    /// by [`encode`](Self::encode) for a compatible type.
    pub fn decode<T: Shareable>(&self, token: &str) -> Result<Option<T>> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }

        let compressed = token::decode_bytes(token)?;
        let json = self
            .compressor
            .decompress(&compressed)
            .map_err(|e| ShareError::decode_failed(e.to_string()))?;

        let value: serde_json::Value = serde_json::from_slice(&json)
            .map_err(|e| ShareError::decode_failed(format!("invalid JSON: {e}")))?;

        let Some(object) = value.as_object() else {
            return Err(ShareError::decode_failed("payload is not an object"));
        };
        if let Some(missing) = T::REQUIRED_FIELDS
            .iter()
            .find(|key| !object.contains_key(**key))
        {
            return Err(ShareError::decode_failed(format!(
                "payload is missing `{missing}`"
            )));
        }

        let state = serde_json::from_value(value)
            .map_err(|e| ShareError::decode_failed(format!("unexpected shape: {e}")))?;
        Ok(Some(state))
    }
}

impl<C> ShareCodec<C>
where
    C: CompressionInterface + Clone + Send + 'static,
{
    /// Runs [`encode`](Self::encode) on the blocking thread pool.
    ///
    /// Large inline images make compression slow enough that it should not
    /// stall an async executor.
    pub async fn encode_async<T>(&self, state: T) -> Result<String>
    where
        T: Shareable + Send + 'static,
    {
        let codec = self.clone();
        tokio::task::spawn_blocking(move || codec.encode(&state))
            .await
            .map_err(|e| ShareError::EncodingFailed(format!("encode task failed: {e}")))?
    }

    /// Runs [`decode`](Self::decode) on the blocking thread pool.
    pub async fn decode_async<T>(&self, token: String) -> Result<Option<T>>
    where
        T: Shareable + Send + 'static,
    {
        let codec = self.clone();
        tokio::task::spawn_blocking(move || codec.decode(&token))
            .await
            .map_err(|e| ShareError::decode_failed(format!("decode task failed: {e}")))?
    }
}
