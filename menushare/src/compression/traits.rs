//! Compression interface definitions.

use crate::error::Result;

/// Compressor capability used by [`ShareCodec`](crate::ShareCodec).
///
/// Any general-purpose lossless compressor satisfies the contract, as long as
/// `decompress(compress(x)) == x` and malformed input is reported as an error
/// rather than a panic.
pub trait CompressionInterface {
    /// Compresses data.
    ///
    /// # Arguments
    ///
    /// * `data` - The raw data to compress
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompresses data produced by [`compress`](Self::compress).
    ///
    /// # Arguments
    ///
    /// * `compressed_data` - The compressed data, possibly truncated or forged
    fn decompress(&self, compressed_data: &[u8]) -> Result<Vec<u8>>;

    /// Returns the name of the compression algorithm.
    fn get_name(&self) -> &'static str;
}
