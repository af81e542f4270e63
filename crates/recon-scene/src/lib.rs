#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Camera entity and the static camera model registry.
pub mod camera;

/// Error types for the scene module.
pub mod error;

/// Posed image entity and 2D observations.
pub mod image;

/// Sparse 3D point entity and observation tracks.
pub mod point3d;

/// Reconstruction aggregate and derived statistics.
pub mod reconstruction;

/// Multi-sensor rigs and capture frames.
pub mod rig;

pub use crate::camera::{Camera, CameraModelId};
pub use crate::error::SceneError;
pub use crate::image::{Image, Point2d, INVALID_POINT3D_ID};
pub use crate::point3d::{Point3d, TrackElement};
pub use crate::reconstruction::Reconstruction;
pub use crate::rig::{Frame, Rig, RigSensor, SensorId, SensorType};
