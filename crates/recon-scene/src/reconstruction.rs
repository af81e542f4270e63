use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::image::Image;
use crate::point3d::Point3d;
use crate::rig::{Frame, Rig};

/// A complete sparse reconstruction.
///
/// Entities live in `BTreeMap`s keyed by id so that iteration, and with
/// it every serialized form, is in ascending id order regardless of
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reconstruction {
    /// Cameras by camera id.
    pub cameras: BTreeMap<u32, Camera>,
    /// Images by image id.
    pub images: BTreeMap<u32, Image>,
    /// 3D points by point id.
    pub points3d: BTreeMap<i64, Point3d>,
    /// Rigs by rig id. Empty for single-sensor datasets.
    pub rigs: BTreeMap<u32, Rig>,
    /// Frames by frame id. Empty for single-sensor datasets.
    pub frames: BTreeMap<u32, Frame>,
}

impl Reconstruction {
    /// Mean number of 3D-point-linked observations per image.
    ///
    /// Used by the text format's summary header. Images without a
    /// materialized observation payload contribute their stored count.
    pub fn mean_observations_per_image(&self) -> f64 {
        if self.images.is_empty() {
            return 0.0;
        }
        let total: u64 = self.images.values().map(|i| i.num_valid_points2d()).sum();
        total as f64 / self.images.len() as f64
    }

    /// Mean track length over all 3D points.
    pub fn mean_track_length(&self) -> f64 {
        if self.points3d.is_empty() {
            return 0.0;
        }
        let total: usize = self.points3d.values().map(|p| p.track_length()).sum();
        total as f64 / self.points3d.len() as f64
    }

    /// Mean reprojection error over points with a known (non-negative) error.
    pub fn mean_reprojection_error(&self) -> f64 {
        let known = self
            .points3d
            .values()
            .filter(|p| p.error >= 0.0)
            .collect::<Vec<_>>();
        if known.is_empty() {
            return 0.0;
        }
        known.iter().map(|p| p.error).sum::<f64>() / known.len() as f64
    }
}
