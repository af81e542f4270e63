//! Parameter conversion between camera models.
//!
//! Conversions go through a canonical per-family coefficient layout
//! (FULL_OPENCV order for perspective models, THIN_PRISM_FISHEYE order
//! for fisheye models), so expansions append zeros and reductions drop
//! slots; the OPENCV_FISHEYE ⇄ THIN_PRISM_FISHEYE index remapping falls
//! out of the slot assignment. FOV and the 16-parameter sink model take
//! dedicated paths.

use recon_scene::{Camera, CameraModelId};

use crate::compat::{can_convert, coeff_slots, Convertibility, SINK_SOURCES};
use crate::projection::pinhole_intrinsics;

/// Default magnitude below which a dropped parameter counts as zero.
pub const DEFAULT_NEGLIGIBLE_THRESHOLD: f64 = 1e-6;

/// Relative fx/fy difference above which a focal merge uses the mean.
const FOCAL_RATIO_TOLERANCE: f64 = 0.01;

/// Result of converting a camera to another model.
///
/// Callers branch on the variant; conversions never panic and never
/// throw. An incompatible pair carries a human-readable reason meant to
/// be shown verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionResult {
    /// The converted camera represents the source without loss.
    Exact(Camera),
    /// The converted camera loses information.
    Approximate {
        /// The converted camera.
        camera: Camera,
        /// One warning per lossy step, naming the values involved.
        warnings: Vec<String>,
        /// Upper estimate of the largest dropped or approximated magnitude.
        max_error: f64,
    },
    /// No conversion exists.
    Incompatible {
        /// Why the conversion is impossible.
        reason: String,
    },
}

impl ConversionResult {
    /// The compatibility class of this result.
    pub fn convertibility(&self) -> Convertibility {
        match self {
            Self::Exact(_) => Convertibility::Exact,
            Self::Approximate { .. } => Convertibility::Approximate,
            Self::Incompatible { .. } => Convertibility::Incompatible,
        }
    }

    /// The converted camera, unless the conversion was impossible.
    pub fn camera(&self) -> Option<&Camera> {
        match self {
            Self::Exact(camera) | Self::Approximate { camera, .. } => Some(camera),
            Self::Incompatible { .. } => None,
        }
    }
}

/// Canonical intrinsics plus family coefficient slots.
struct Canonical {
    fx: f64,
    fy: f64,
    cx: f64,
    cy: f64,
    single_focal: bool,
    coeffs: [f64; 8],
}

fn to_canonical(camera: &Camera) -> Canonical {
    let (fx, fy, cx, cy) = pinhole_intrinsics(camera);
    let base = if camera.model_id.has_single_focal() { 3 } else { 4 };
    let mut coeffs = [0.0; 8];
    for (j, slot) in coeff_slots(camera.model_id).iter().enumerate() {
        coeffs[*slot] = camera.params[base + j];
    }
    Canonical {
        fx,
        fy,
        cx,
        cy,
        single_focal: camera.model_id.has_single_focal(),
        coeffs,
    }
}

fn coeff_name(fisheye: bool, slot: usize) -> &'static str {
    const PERSPECTIVE: [&str; 8] = ["k1", "k2", "p1", "p2", "k3", "k4", "k5", "k6"];
    const FISHEYE: [&str; 8] = ["k1", "k2", "p1", "p2", "k3", "k4", "sx1", "sy1"];
    if fisheye {
        FISHEYE[slot]
    } else {
        PERSPECTIVE[slot]
    }
}

fn incompatibility_reason(from: CameraModelId, to: CameraModelId) -> String {
    if (from.is_perspective() && to.is_fisheye()) || (from.is_fisheye() && to.is_perspective()) {
        format!(
            "cannot convert between perspective and fisheye camera models ({} -> {})",
            from.name(),
            to.name()
        )
    } else if from == CameraModelId::RadTanThinPrismFisheye {
        format!("{} supports no outgoing conversions", from.name())
    } else if to == CameraModelId::RadTanThinPrismFisheye {
        format!(
            "{} only accepts conversions from basic pinhole and radial models",
            to.name()
        )
    } else if from == CameraModelId::Fov || to == CameraModelId::Fov {
        "FOV converts only to and from SIMPLE_RADIAL and RADIAL".to_string()
    } else {
        format!("no conversion from {} to {}", from.name(), to.name())
    }
}

/// Merge fx/fy into a single focal length where the target demands it.
///
/// Returns the focal pair to use and whether the merge was lossy.
fn merge_focal(
    can: &Canonical,
    target: CameraModelId,
    warnings: &mut Vec<String>,
    max_error: &mut f64,
) -> (f64, f64, bool) {
    if !target.has_single_focal() || can.single_focal {
        return (can.fx, can.fy, false);
    }
    let rel = (can.fx - can.fy).abs() / can.fx.abs().max(can.fy.abs());
    if rel > FOCAL_RATIO_TOLERANCE {
        // the mean minimizes the worst-case error in either axis
        let f = 0.5 * (can.fx + can.fy);
        warnings.push(format!(
            "merging fx={} and fy={} into mean focal length {} (aspect mismatch {:.2}%)",
            can.fx,
            can.fy,
            f,
            rel * 100.0
        ));
        *max_error = max_error.max((can.fx - can.fy).abs() / 2.0);
        (f, f, true)
    } else {
        (can.fx, can.fx, false)
    }
}

fn assemble_params(
    target: CameraModelId,
    fx: f64,
    fy: f64,
    cx: f64,
    cy: f64,
    coeffs: &[f64; 8],
) -> Vec<f64> {
    let mut params = if target.has_single_focal() {
        vec![fx, cx, cy]
    } else {
        vec![fx, fy, cx, cy]
    };
    for slot in coeff_slots(target) {
        params.push(coeffs[*slot]);
    }
    params
}

fn finish(
    camera: &Camera,
    target: CameraModelId,
    params: Vec<f64>,
    exact: bool,
    warnings: Vec<String>,
    max_error: f64,
) -> ConversionResult {
    let converted = Camera {
        camera_id: camera.camera_id,
        model_id: target,
        width: camera.width,
        height: camera.height,
        params,
    };
    if exact {
        ConversionResult::Exact(converted)
    } else {
        ConversionResult::Approximate { camera: converted, warnings, max_error }
    }
}

fn convert_lattice(camera: &Camera, target: CameraModelId, threshold: f64) -> ConversionResult {
    let can = to_canonical(camera);
    let mut warnings = Vec::new();
    let mut max_error = 0.0f64;

    let (fx, fy, focal_lossy) = merge_focal(&can, target, &mut warnings, &mut max_error);

    let mut exact = !focal_lossy;
    let kept = coeff_slots(target);
    for (slot, value) in can.coeffs.iter().enumerate() {
        if kept.contains(&slot) || value.abs() <= threshold {
            continue;
        }
        warnings.push(format!(
            "dropping {}={}",
            coeff_name(target.is_fisheye(), slot),
            value
        ));
        max_error = max_error.max(value.abs());
        exact = false;
    }

    let params = assemble_params(target, fx, fy, can.cx, can.cy, &can.coeffs);
    finish(camera, target, params, exact, warnings, max_error)
}

fn fov_quality(omega: f64) -> &'static str {
    if omega.abs() < 0.5 {
        "good"
    } else if omega.abs() < 1.0 {
        "rough"
    } else {
        "poor"
    }
}

/// Truncation estimate of the ω²/3 Taylor link (next series term).
fn fov_truncation_error(omega: f64) -> f64 {
    omega.powi(4) / 5.0
}

fn convert_from_fov(camera: &Camera, target: CameraModelId, _threshold: f64) -> ConversionResult {
    let can = to_canonical(camera);
    let omega = camera.params[4];
    let mut warnings = Vec::new();
    let mut max_error = 0.0f64;
    let (f, _, _) = merge_focal(&can, target, &mut warnings, &mut max_error);

    let k1 = omega * omega / 3.0;
    warnings.push(format!(
        "FOV omega={omega} approximated by k1={k1} (Taylor series, {} fit)",
        fov_quality(omega)
    ));
    max_error = max_error.max(fov_truncation_error(omega));

    let mut coeffs = [0.0; 8];
    coeffs[0] = k1;
    let params = assemble_params(target, f, f, can.cx, can.cy, &coeffs);
    finish(camera, target, params, false, warnings, max_error)
}

fn convert_to_fov(camera: &Camera, threshold: f64) -> ConversionResult {
    let can = to_canonical(camera);
    let k1 = can.coeffs[0];
    if k1 <= 0.0 {
        return ConversionResult::Incompatible {
            reason: format!(
                "FOV cannot represent non-positive radial distortion curvature (k1={k1})"
            ),
        };
    }
    let omega = (3.0 * k1).sqrt();
    let mut warnings = vec![format!(
        "k1={k1} approximated by FOV omega={omega} (Taylor series, {} fit)",
        fov_quality(omega)
    )];
    let mut max_error = fov_truncation_error(omega);
    let k2 = can.coeffs[1];
    if k2.abs() > threshold {
        warnings.push(format!("dropping k2={k2}"));
        max_error = max_error.max(k2.abs());
    }
    let params = vec![can.fx, can.fy, can.cx, can.cy, omega];
    finish(camera, CameraModelId::Fov, params, false, warnings, max_error)
}

fn convert_to_sink(camera: &Camera) -> ConversionResult {
    let can = to_canonical(camera);
    let mut params = vec![can.fx, can.fy, can.cx, can.cy];
    // k1..k6, then p1, p2, s1..s4; sources carry at most k1, k2
    params.extend_from_slice(&[can.coeffs[0], can.coeffs[1], 0.0, 0.0, 0.0, 0.0]);
    params.extend_from_slice(&[0.0; 6]);
    // structurally lossy even when numerically lossless
    let warnings = vec![format!(
        "{} uses a rational-polynomial distortion with no inverse; the conversion cannot be undone",
        CameraModelId::RadTanThinPrismFisheye.name()
    )];
    finish(camera, CameraModelId::RadTanThinPrismFisheye, params, false, warnings, 0.0)
}

/// Convert a camera to another model with the default threshold.
pub fn convert_camera(camera: &Camera, target: CameraModelId) -> ConversionResult {
    convert_camera_with_threshold(camera, target, DEFAULT_NEGLIGIBLE_THRESHOLD)
}

/// Convert a camera to another model.
///
/// `threshold` is the magnitude below which a dropped parameter is
/// treated as zero, letting a generically approximate reduction come
/// out exact for a particular camera.
pub fn convert_camera_with_threshold(
    camera: &Camera,
    target: CameraModelId,
    threshold: f64,
) -> ConversionResult {
    let from = camera.model_id;
    if can_convert(from, target) == Convertibility::Incompatible {
        return ConversionResult::Incompatible {
            reason: incompatibility_reason(from, target),
        };
    }
    if from == target {
        return ConversionResult::Exact(camera.clone());
    }
    if target == CameraModelId::RadTanThinPrismFisheye {
        debug_assert!(SINK_SOURCES.contains(&from));
        return convert_to_sink(camera);
    }
    if from == CameraModelId::Fov {
        return convert_from_fov(camera, target, threshold);
    }
    if target == CameraModelId::Fov {
        return convert_to_fov(camera, threshold);
    }
    convert_lattice(camera, target, threshold)
}
