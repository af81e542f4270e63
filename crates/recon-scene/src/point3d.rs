use serde::{Deserialize, Serialize};

/// One observation of a 3D point in an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackElement {
    /// Id of the observing image.
    pub image_id: u32,
    /// Index into the observing image's 2D points.
    pub point2d_idx: u32,
}

/// A sparse 3D point with its observation track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point3d {
    /// Point id.
    pub point3d_id: i64,
    /// Position in world coordinates.
    pub xyz: [f64; 3],
    /// Color, one byte per channel.
    pub rgb: [u8; 3],
    /// Mean reprojection error in pixels. Negative means unknown.
    pub error: f64,
    /// Images observing this point. Track length is the point's degree.
    pub track: Vec<TrackElement>,
}

impl Point3d {
    /// Number of images observing this point.
    pub fn track_length(&self) -> usize {
        self.track.len()
    }
}
