//! Gzip compression implementation.
//!
//! Produces the same stream as a browser `CompressionStream("gzip")`, so
//! tokens stay readable by the web editor.

use std::io::{Read, Write};

use flate2::{Compression as GzipLevel, bufread::GzDecoder, write::GzEncoder};

use crate::compression::traits::CompressionInterface;
use crate::error::{Result, ShareError};

/// Default ceiling for decompressed output (64 MiB).
pub const DEFAULT_MAX_OUTPUT: usize = 64 * 1024 * 1024;

/// Gzip compressor with configurable compression level.
#[derive(Debug, Clone, Copy)]
pub struct GzipCompressor {
    /// Compression level (0-9, where 0 means no compression).
    level: u8,
    /// Whether compression is enabled (false means data is copied directly).
    enabled: bool,
    /// Upper bound on decompressed bytes.
    max_output: usize,
}

impl Default for GzipCompressor {
    fn default() -> Self {
        Self::new(9)
    }
}

impl GzipCompressor {
    /// Creates a new gzip compressor with the specified compression level.
    ///
    /// # Arguments
    ///
    /// * `level` - Compression level from 0 to 9. Level 0 disables compression.
    pub fn new(level: u8) -> Self {
        Self {
            level: level.clamp(0, 9),
            enabled: level > 0,
            max_output: DEFAULT_MAX_OUTPUT,
        }
    }

    /// Creates a disabled compressor instance that passes data through unchanged.
    ///
    /// Handy for inspecting tokens: the payload is plain base64 JSON.
    pub fn new_disabled() -> Self {
        Self {
            level: 0,
            enabled: false,
            max_output: DEFAULT_MAX_OUTPUT,
        }
    }

    /// Sets the maximum number of bytes `decompress` may produce.
    pub fn with_max_output(mut self, max_output: usize) -> Self {
        self.max_output = max_output;
        self
    }

    fn get_compression_level(&self) -> GzipLevel {
        if !self.enabled {
            return GzipLevel::none();
        }
        match self.level {
            0 => GzipLevel::none(),
            1 => GzipLevel::fast(),
            9 => GzipLevel::best(),
            n => GzipLevel::new(n as u32),
        }
    }
}

impl CompressionInterface for GzipCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        if !self.enabled {
            return Ok(data.to_vec());
        }

        let mut encoder = GzEncoder::new(Vec::new(), self.get_compression_level());

        encoder.write_all(data).map_err(|e| {
            ShareError::compression_error(format!("Gzip compression failed: {e}"))
        })?;

        encoder
            .finish()
            .map_err(|e| ShareError::compression_error(format!("Gzip finish failed: {e}")))
    }

    fn decompress(&self, compressed_data: &[u8]) -> Result<Vec<u8>> {
        if !self.enabled {
            if compressed_data.len() > self.max_output {
                return Err(ShareError::compression_error(format!(
                    "payload exceeds {} bytes",
                    self.max_output
                )));
            }
            return Ok(compressed_data.to_vec());
        }

        // 多读一个字节，用于判断是否超过上限
        let limit = self.max_output as u64 + 1;
        let mut decoder = GzDecoder::new(compressed_data).take(limit);
        let mut buffer = Vec::new();

        decoder.read_to_end(&mut buffer).map_err(|e| {
            ShareError::compression_error(format!("Gzip decompression failed: {e}"))
        })?;

        if buffer.len() > self.max_output {
            return Err(ShareError::compression_error(format!(
                "decompressed payload exceeds {} bytes",
                self.max_output
            )));
        }

        // 只接受单个 gzip 流，后面不能再有数据
        if !decoder.get_ref().get_ref().is_empty() {
            return Err(ShareError::compression_error(
                "trailing data after gzip stream",
            ));
        }

        Ok(buffer)
    }

    fn get_name(&self) -> &'static str {
        if self.enabled { "gzip" } else { "none" }
    }
}
