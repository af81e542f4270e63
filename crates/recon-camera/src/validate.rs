//! Empirical validation of camera conversions by reprojection.

use recon_scene::Camera;

use crate::projection::{cam_from_img, img_from_cam};

/// Error types for conversion validation.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The cameras image different pixel grids.
    #[error("cameras have different dimensions ({0}x{1} vs {2}x{3})")]
    DimensionMismatch(u64, u64, u64, u64),

    /// A zero-sized sample grid was requested.
    #[error("validation grid size must be at least 1")]
    EmptyGrid,
}

/// Reprojection error statistics over the sample grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationReport {
    /// Largest pixel error among valid samples.
    pub max_error: f64,
    /// Mean pixel error over valid samples.
    pub avg_error: f64,
    /// Samples where both unprojection and reprojection succeeded.
    pub num_valid: usize,
    /// Total samples on the grid.
    pub num_samples: usize,
}

/// Measure how well a converted camera reproduces the source projection.
///
/// Samples a `grid_size` × `grid_size` grid of pixel centers, unprojects
/// each through the source model and reprojects through the target,
/// reporting the Euclidean pixel error. Samples that fail either
/// direction are counted in `num_samples` but excluded from the error
/// statistics.
pub fn validate_conversion(
    source: &Camera,
    target: &Camera,
    grid_size: usize,
) -> Result<ValidationReport, ValidationError> {
    if source.width != target.width || source.height != target.height {
        return Err(ValidationError::DimensionMismatch(
            source.width,
            source.height,
            target.width,
            target.height,
        ));
    }
    if grid_size == 0 {
        return Err(ValidationError::EmptyGrid);
    }

    let mut max_error = 0.0f64;
    let mut sum_error = 0.0f64;
    let mut num_valid = 0usize;
    let num_samples = grid_size * grid_size;

    for i in 0..grid_size {
        for j in 0..grid_size {
            let u = (i as f64 + 0.5) * source.width as f64 / grid_size as f64;
            let v = (j as f64 + 0.5) * source.height as f64 / grid_size as f64;
            let Some((x, y)) = cam_from_img(source, u, v) else {
                continue;
            };
            let Some((u2, v2)) = img_from_cam(target, x, y) else {
                continue;
            };
            let error = ((u2 - u).powi(2) + (v2 - v).powi(2)).sqrt();
            if !error.is_finite() {
                continue;
            }
            max_error = max_error.max(error);
            sum_error += error;
            num_valid += 1;
        }
    }

    let avg_error = if num_valid > 0 { sum_error / num_valid as f64 } else { 0.0 };
    Ok(ValidationReport { max_error, avg_error, num_valid, num_samples })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{convert_camera, ConversionResult};
    use recon_scene::CameraModelId;

    fn camera(model_id: CameraModelId, params: Vec<f64>) -> Camera {
        Camera { camera_id: 1, model_id, width: 1920, height: 1080, params }
    }

    #[test]
    fn exact_expansion_validates_to_zero_error() -> Result<(), ValidationError> {
        let source = camera(CameraModelId::SimplePinhole, vec![1000.0, 960.0, 540.0]);
        let ConversionResult::Exact(target) = convert_camera(&source, CameraModelId::Pinhole)
        else {
            panic!("expected exact conversion");
        };
        let report = validate_conversion(&source, &target, 10)?;
        assert_eq!(report.num_valid, 100);
        assert!(report.max_error < 1e-9, "max error {}", report.max_error);
        Ok(())
    }

    #[test]
    fn negligible_reduction_validates_to_small_error() -> Result<(), ValidationError> {
        let source = camera(CameraModelId::Radial, vec![1000.0, 960.0, 540.0, 0.05, 1e-8]);
        let Some(target) = convert_camera(&source, CameraModelId::SimpleRadial)
            .camera()
            .cloned()
        else {
            panic!("expected convertible pair");
        };
        let report = validate_conversion(&source, &target, 8)?;
        assert_eq!(report.num_valid, 64);
        assert!(report.max_error < 0.1, "max error {}", report.max_error);
        assert!(report.avg_error <= report.max_error);
        Ok(())
    }

    #[test]
    fn lossy_reduction_shows_measurable_error() -> Result<(), ValidationError> {
        let source = camera(CameraModelId::Radial, vec![1000.0, 960.0, 540.0, 0.05, 0.08]);
        let Some(target) = convert_camera(&source, CameraModelId::SimpleRadial)
            .camera()
            .cloned()
        else {
            panic!("expected convertible pair");
        };
        let report = validate_conversion(&source, &target, 8)?;
        assert!(report.max_error > 1.0, "max error {}", report.max_error);
        Ok(())
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let source = camera(CameraModelId::SimplePinhole, vec![1000.0, 960.0, 540.0]);
        let mut target = source.clone();
        target.width = 640;
        assert!(matches!(
            validate_conversion(&source, &target, 4),
            Err(ValidationError::DimensionMismatch(..))
        ));
    }
}
