use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Camera model ids, matching the numeric ids of the external format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraModelId {
    /// Simple pinhole camera model: f, cx, cy
    SimplePinhole = 0,
    /// Pinhole camera model: fx, fy, cx, cy
    Pinhole = 1,
    /// Simple radial camera model: f, cx, cy, k
    SimpleRadial = 2,
    /// Radial camera model: f, cx, cy, k1, k2
    Radial = 3,
    /// OpenCV camera model: fx, fy, cx, cy, k1, k2, p1, p2
    OpenCV = 4,
    /// OpenCV fisheye camera model: fx, fy, cx, cy, k1, k2, k3, k4
    OpenCVFisheye = 5,
    /// Full OpenCV camera model: fx, fy, cx, cy, k1, k2, p1, p2, k3, k4, k5, k6
    FullOpenCV = 6,
    /// Field-of-view camera model: fx, fy, cx, cy, omega
    Fov = 7,
    /// Simple radial fisheye camera model: f, cx, cy, k
    SimpleRadialFisheye = 8,
    /// Radial fisheye camera model: f, cx, cy, k1, k2
    RadialFisheye = 9,
    /// Thin prism fisheye camera model: fx, fy, cx, cy, k1, k2, p1, p2, k3, k4, sx1, sy1
    ThinPrismFisheye = 10,
    /// Rational-polynomial thin prism fisheye model with 16 parameters.
    /// Conversion sink only: no outgoing conversions exist.
    RadTanThinPrismFisheye = 11,
}

/// All camera models, in id order.
pub const CAMERA_MODELS: [CameraModelId; 12] = [
    CameraModelId::SimplePinhole,
    CameraModelId::Pinhole,
    CameraModelId::SimpleRadial,
    CameraModelId::Radial,
    CameraModelId::OpenCV,
    CameraModelId::OpenCVFisheye,
    CameraModelId::FullOpenCV,
    CameraModelId::Fov,
    CameraModelId::SimpleRadialFisheye,
    CameraModelId::RadialFisheye,
    CameraModelId::ThinPrismFisheye,
    CameraModelId::RadTanThinPrismFisheye,
];

impl CameraModelId {
    /// Look up a camera model by its numeric id.
    pub fn from_id(id: i32) -> Result<Self, SceneError> {
        CAMERA_MODELS
            .iter()
            .find(|m| **m as i32 == id)
            .copied()
            .ok_or(SceneError::UnknownModelId(id))
    }

    /// Look up a camera model by its upper-case text name.
    pub fn from_name(name: &str) -> Result<Self, SceneError> {
        CAMERA_MODELS
            .iter()
            .find(|m| m.name() == name)
            .copied()
            .ok_or_else(|| SceneError::UnknownModelName(name.to_string()))
    }

    /// The model name as written in the text format.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SimplePinhole => "SIMPLE_PINHOLE",
            Self::Pinhole => "PINHOLE",
            Self::SimpleRadial => "SIMPLE_RADIAL",
            Self::Radial => "RADIAL",
            Self::OpenCV => "OPENCV",
            Self::OpenCVFisheye => "OPENCV_FISHEYE",
            Self::FullOpenCV => "FULL_OPENCV",
            Self::Fov => "FOV",
            Self::SimpleRadialFisheye => "SIMPLE_RADIAL_FISHEYE",
            Self::RadialFisheye => "RADIAL_FISHEYE",
            Self::ThinPrismFisheye => "THIN_PRISM_FISHEYE",
            Self::RadTanThinPrismFisheye => "RAD_TAN_THIN_PRISM_FISHEYE",
        }
    }

    /// The ordered parameter names of the model.
    pub fn param_names(&self) -> &'static [&'static str] {
        match self {
            Self::SimplePinhole => &["f", "cx", "cy"],
            Self::Pinhole => &["fx", "fy", "cx", "cy"],
            Self::SimpleRadial => &["f", "cx", "cy", "k"],
            Self::Radial => &["f", "cx", "cy", "k1", "k2"],
            Self::OpenCV => &["fx", "fy", "cx", "cy", "k1", "k2", "p1", "p2"],
            Self::OpenCVFisheye => &["fx", "fy", "cx", "cy", "k1", "k2", "k3", "k4"],
            Self::FullOpenCV => &[
                "fx", "fy", "cx", "cy", "k1", "k2", "p1", "p2", "k3", "k4", "k5", "k6",
            ],
            Self::Fov => &["fx", "fy", "cx", "cy", "omega"],
            Self::SimpleRadialFisheye => &["f", "cx", "cy", "k"],
            Self::RadialFisheye => &["f", "cx", "cy", "k1", "k2"],
            Self::ThinPrismFisheye => &[
                "fx", "fy", "cx", "cy", "k1", "k2", "p1", "p2", "k3", "k4", "sx1", "sy1",
            ],
            Self::RadTanThinPrismFisheye => &[
                "fx", "fy", "cx", "cy", "k1", "k2", "k3", "k4", "k5", "k6", "p1", "p2", "s1",
                "s2", "s3", "s4",
            ],
        }
    }

    /// Number of parameters the model carries.
    pub fn num_params(&self) -> usize {
        self.param_names().len()
    }

    /// Whether the model uses a single focal length for both axes.
    pub fn has_single_focal(&self) -> bool {
        matches!(
            self,
            Self::SimplePinhole | Self::SimpleRadial | Self::Radial | Self::SimpleRadialFisheye
                | Self::RadialFisheye
        )
    }

    /// Whether the model belongs to the fisheye family.
    pub fn is_fisheye(&self) -> bool {
        matches!(
            self,
            Self::OpenCVFisheye
                | Self::SimpleRadialFisheye
                | Self::RadialFisheye
                | Self::ThinPrismFisheye
        )
    }

    /// Whether the model belongs to the perspective family.
    ///
    /// The 16-parameter sink model is outside both families.
    pub fn is_perspective(&self) -> bool {
        !self.is_fisheye() && *self != Self::RadTanThinPrismFisheye
    }
}

/// A camera with intrinsics described by one of the registered models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Camera id.
    pub camera_id: u32,
    /// Camera model id.
    pub model_id: CameraModelId,
    /// Image width in pixels.
    pub width: u64,
    /// Image height in pixels.
    pub height: u64,
    /// Model parameters, ordered per the registry.
    pub params: Vec<f64>,
}

impl Camera {
    /// Create a camera, checking the parameter count against the model.
    pub fn new(
        camera_id: u32,
        model_id: CameraModelId,
        width: u64,
        height: u64,
        params: Vec<f64>,
    ) -> Result<Self, SceneError> {
        if params.len() != model_id.num_params() {
            return Err(SceneError::CameraParamsMismatch {
                model: model_id.name(),
                expected: model_id.num_params(),
                got: params.len(),
            });
        }
        Ok(Self {
            camera_id,
            model_id,
            width,
            height,
            params,
        })
    }
}
