use recon_scene::SceneError;

/// Error types for the binary and text codecs.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Error reading or writing a file.
    #[error("error reading or writing file")]
    Io(#[from] std::io::Error),

    /// The binary buffer ended before a record was complete.
    ///
    /// Fatal: the whole file must be rejected as truncated or corrupt.
    #[error("unexpected end of buffer at offset {offset}, {needed} more bytes needed")]
    UnexpectedEof {
        /// Read cursor when the shortfall was detected.
        offset: usize,
        /// Bytes the current read still required.
        needed: usize,
    },

    /// An image declares more observations than it carries.
    ///
    /// Produced when encoding images loaded by the lite parser; re-read
    /// the file with the full parser before writing.
    #[error("image {image_id} declares {declared} observations but carries {materialized}")]
    UnmaterializedObservations {
        /// Id of the offending image.
        image_id: u32,
        /// Observation count declared by the image header.
        declared: u64,
        /// Observations actually present in memory.
        materialized: usize,
    },

    /// A record referenced an entity the registry does not know.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// The CSR track arrays are inconsistent with each other.
    #[error("invalid CSR track arrays: {0}")]
    InvalidCsr(String),
}
