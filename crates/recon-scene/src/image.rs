use serde::{Deserialize, Serialize};

/// Reserved point3d id meaning "this observation has no 3D point".
///
/// Stored as `-1` internally and in the text format; the binary format
/// writes the same bit pattern as `u64::MAX`.
pub const INVALID_POINT3D_ID: i64 = -1;

/// A 2D observation in an image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2d {
    /// x pixel coordinate.
    pub x: f64,
    /// y pixel coordinate.
    pub y: f64,
    /// Id of the triangulated 3D point, or [`INVALID_POINT3D_ID`].
    pub point3d_id: i64,
}

impl Point2d {
    /// Whether the observation is linked to a 3D point.
    pub fn has_point3d(&self) -> bool {
        self.point3d_id != INVALID_POINT3D_ID
    }
}

/// A posed image with its 2D observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Image id.
    pub image_id: u32,
    /// World-to-camera rotation quaternion (w, x, y, z).
    pub rotation: [f64; 4],
    /// World-to-camera translation (x, y, z).
    pub translation: [f64; 3],
    /// Id of the camera that captured the image.
    pub camera_id: u32,
    /// Image name, usually a relative file path.
    pub name: String,
    /// 2D observations. May be empty when the image was parsed without
    /// its observation payload; `num_points2d` still carries the count.
    pub points2d: Vec<Point2d>,
    /// Authoritative observation count. The codecs refuse to encode an
    /// image whose count disagrees with `points2d.len()`.
    pub num_points2d: u64,
}

impl Image {
    /// Number of observations linked to a 3D point.
    ///
    /// When the observation payload was skipped at parse time this falls
    /// back to `num_points2d`, which is an upper bound.
    pub fn num_valid_points2d(&self) -> u64 {
        if self.points2d.is_empty() {
            return self.num_points2d;
        }
        self.points2d.iter().filter(|p| p.has_point3d()).count() as u64
    }
}
