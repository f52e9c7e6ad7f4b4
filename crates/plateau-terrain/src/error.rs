//! Terrain generation error types.

/// Errors surfaced by terrain generation and debug export.
///
/// Edge-length variants are raised before any grid is allocated.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// The edge length was zero.
    #[error("edge length must be positive")]
    EdgeLengthZero,

    /// The edge length was not a power of two.
    #[error("edge length {0} is not a power of two")]
    EdgeLengthNotPowerOfTwo(u32),

    /// The edge length exceeds [`crate::MAX_EDGE_LENGTH`].
    #[error("edge length {length} exceeds the maximum of {max}")]
    EdgeLengthTooLarge {
        /// Requested edge length.
        length: u32,
        /// Largest accepted edge length.
        max: u32,
    },

    /// Failed to create or write an export file.
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode a debug image.
    #[error("failed to encode png: {0}")]
    PngEncoding(#[from] png::EncodingError),
}
