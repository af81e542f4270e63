//! Pixel-space projection and unprojection per camera model.

use recon_scene::{Camera, CameraModelId};

use crate::distortion::{distort_fov, undistort_fov, Fisheye, RadTan};

/// Focal lengths and principal point of a camera, with single-focal
/// models expanded to fx = fy.
pub(crate) fn pinhole_intrinsics(camera: &Camera) -> (f64, f64, f64, f64) {
    let p = &camera.params;
    if camera.model_id.has_single_focal() {
        (p[0], p[0], p[1], p[2])
    } else {
        (p[0], p[1], p[2], p[3])
    }
}

fn radtan_of(camera: &Camera) -> RadTan {
    let p = &camera.params;
    match camera.model_id {
        CameraModelId::SimpleRadial => RadTan { k1: p[3], ..Default::default() },
        CameraModelId::Radial => RadTan { k1: p[3], k2: p[4], ..Default::default() },
        CameraModelId::OpenCV | CameraModelId::FullOpenCV => {
            RadTan { k1: p[4], k2: p[5], p1: p[6], p2: p[7] }
        }
        _ => RadTan::default(),
    }
}

fn fisheye_of(camera: &Camera) -> Fisheye {
    let p = &camera.params;
    match camera.model_id {
        CameraModelId::SimpleRadialFisheye => Fisheye { k1: p[3], ..Default::default() },
        CameraModelId::RadialFisheye => Fisheye { k1: p[3], k2: p[4], ..Default::default() },
        CameraModelId::OpenCVFisheye => Fisheye { k1: p[4], k2: p[5], k3: p[6], k4: p[7] },
        CameraModelId::ThinPrismFisheye => Fisheye { k1: p[4], k2: p[5], k3: p[8], k4: p[9] },
        _ => Fisheye::default(),
    }
}

fn distort_rational(k: [f64; 6], p1: f64, p2: f64, s: [f64; 4], x: f64, y: f64) -> (f64, f64) {
    let r2 = x * x + y * y;
    let r4 = r2 * r2;
    let r6 = r4 * r2;
    let radial = (1.0 + k[0] * r2 + k[1] * r4 + k[2] * r6)
        / (1.0 + k[3] * r2 + k[4] * r4 + k[5] * r6);
    let xd = x * radial + 2.0 * p1 * x * y + p2 * (r2 + 2.0 * x * x) + s[0] * r2 + s[1] * r4;
    let yd = y * radial + 2.0 * p2 * x * y + p1 * (r2 + 2.0 * y * y) + s[2] * r2 + s[3] * r4;
    (xd, yd)
}

/// Apply the model's forward distortion in normalized coordinates.
fn distort(camera: &Camera, x: f64, y: f64) -> (f64, f64) {
    let p = &camera.params;
    match camera.model_id {
        CameraModelId::SimplePinhole | CameraModelId::Pinhole => (x, y),
        CameraModelId::SimpleRadial | CameraModelId::Radial | CameraModelId::OpenCV => {
            radtan_of(camera).distort(x, y)
        }
        CameraModelId::FullOpenCV => distort_rational(
            [p[4], p[5], p[8], p[9], p[10], p[11]],
            p[6],
            p[7],
            [0.0; 4],
            x,
            y,
        ),
        CameraModelId::Fov => distort_fov(p[4], x, y),
        CameraModelId::SimpleRadialFisheye
        | CameraModelId::RadialFisheye
        | CameraModelId::OpenCVFisheye => fisheye_of(camera).distort(x, y),
        CameraModelId::ThinPrismFisheye => {
            let (xf, yf) = fisheye_of(camera).distort(x, y);
            let r2 = xf * xf + yf * yf;
            let (p1, p2, sx1, sy1) = (p[6], p[7], p[10], p[11]);
            (
                xf + 2.0 * p1 * xf * yf + p2 * (r2 + 2.0 * xf * xf) + sx1 * r2,
                yf + 2.0 * p2 * xf * yf + p1 * (r2 + 2.0 * yf * yf) + sy1 * r2,
            )
        }
        CameraModelId::RadTanThinPrismFisheye => distort_rational(
            [p[4], p[5], p[6], p[7], p[8], p[9]],
            p[10],
            p[11],
            [p[12], p[13], p[14], p[15]],
            x,
            y,
        ),
    }
}

/// Invert the model's distortion in normalized coordinates.
///
/// The iterative inversions run on the shared radial-tangential and
/// fisheye cores; the higher-order terms of FULL_OPENCV and the prism
/// terms of THIN_PRISM_FISHEYE are forward-only. The sink model has no
/// inverse at all.
fn undistort(camera: &Camera, xd: f64, yd: f64) -> Option<(f64, f64)> {
    match camera.model_id {
        CameraModelId::SimplePinhole | CameraModelId::Pinhole => Some((xd, yd)),
        CameraModelId::SimpleRadial
        | CameraModelId::Radial
        | CameraModelId::OpenCV
        | CameraModelId::FullOpenCV => Some(radtan_of(camera).undistort(xd, yd)),
        CameraModelId::Fov => Some(undistort_fov(camera.params[4], xd, yd)),
        CameraModelId::SimpleRadialFisheye
        | CameraModelId::RadialFisheye
        | CameraModelId::OpenCVFisheye
        | CameraModelId::ThinPrismFisheye => Some(fisheye_of(camera).undistort(xd, yd)),
        CameraModelId::RadTanThinPrismFisheye => None,
    }
}

/// Project a normalized camera-plane point to pixel coordinates.
pub fn img_from_cam(camera: &Camera, x: f64, y: f64) -> Option<(f64, f64)> {
    let (fx, fy, cx, cy) = pinhole_intrinsics(camera);
    let (xd, yd) = distort(camera, x, y);
    let u = fx * xd + cx;
    let v = fy * yd + cy;
    (u.is_finite() && v.is_finite()).then_some((u, v))
}

/// Unproject pixel coordinates to the normalized camera plane.
pub fn cam_from_img(camera: &Camera, u: f64, v: f64) -> Option<(f64, f64)> {
    let (fx, fy, cx, cy) = pinhole_intrinsics(camera);
    if fx == 0.0 || fy == 0.0 {
        return None;
    }
    let xd = (u - cx) / fx;
    let yd = (v - cy) / fy;
    let (x, y) = undistort(camera, xd, yd)?;
    (x.is_finite() && y.is_finite()).then_some((x, y))
}
