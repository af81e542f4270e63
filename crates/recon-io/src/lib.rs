#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Binary entity codecs.
pub mod binary;

/// Error types for the codecs.
pub mod error;

/// Float formatting for the text codecs.
pub(crate) mod fmt;

/// Reconstruction directory I/O and the CSR track assembler.
pub mod reconstruction;

/// Little-endian byte stream reader and writer.
pub mod stream;

/// Text entity codecs.
pub mod text;

pub use crate::error::CodecError;
pub use crate::stream::{ByteReader, ByteWriter};
