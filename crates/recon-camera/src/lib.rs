#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Conversion compatibility lattice between camera models.
pub mod compat;

/// Parameter conversion between camera models.
pub mod convert;

/// Forward and inverse lens distortion.
pub mod distortion;

/// Per-model pixel projection and unprojection.
pub mod projection;

/// Empirical reprojection validation of conversions.
pub mod validate;

pub use crate::compat::{can_convert, Convertibility};
pub use crate::convert::{
    convert_camera, convert_camera_with_threshold, ConversionResult, DEFAULT_NEGLIGIBLE_THRESHOLD,
};
pub use crate::validate::{validate_conversion, ValidationError, ValidationReport};
