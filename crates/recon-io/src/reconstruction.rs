//! Whole-reconstruction directory I/O and the CSR track assembler.

use std::collections::BTreeMap;
use std::path::Path;

use recon_scene::{Point3d, Reconstruction, TrackElement};

use crate::binary;
use crate::error::CodecError;
use crate::text;

/// Read a reconstruction from a directory of binary files.
///
/// `cameras.bin`, `images.bin` and `points3D.bin` are required;
/// `rigs.bin` and `frames.bin` are optional and yield empty maps when
/// absent.
pub fn read_reconstruction_bin(dir: impl AsRef<Path>) -> Result<Reconstruction, CodecError> {
    let dir = dir.as_ref();
    let cameras = binary::read_cameras_bin(dir.join("cameras.bin"))?;
    let images = binary::read_images_bin(dir.join("images.bin"))?;
    let points3d = binary::read_points3d_bin(dir.join("points3D.bin"))?;
    let rigs_path = dir.join("rigs.bin");
    let rigs = if rigs_path.exists() {
        binary::read_rigs_bin(rigs_path)?
    } else {
        BTreeMap::new()
    };
    let frames_path = dir.join("frames.bin");
    let frames = if frames_path.exists() {
        binary::read_frames_bin(frames_path)?
    } else {
        BTreeMap::new()
    };
    Ok(Reconstruction { cameras, images, points3d, rigs, frames })
}

/// Write a reconstruction as binary files into a directory.
///
/// Rig and frame files are written only when the respective maps are
/// non-empty.
pub fn write_reconstruction_bin(
    dir: impl AsRef<Path>,
    recon: &Reconstruction,
) -> Result<(), CodecError> {
    let dir = dir.as_ref();
    binary::write_cameras_bin(dir.join("cameras.bin"), &recon.cameras)?;
    binary::write_images_bin(dir.join("images.bin"), &recon.images)?;
    binary::write_points3d_bin(dir.join("points3D.bin"), &recon.points3d)?;
    if !recon.rigs.is_empty() {
        binary::write_rigs_bin(dir.join("rigs.bin"), &recon.rigs)?;
    }
    if !recon.frames.is_empty() {
        binary::write_frames_bin(dir.join("frames.bin"), &recon.frames)?;
    }
    Ok(())
}

/// Read a reconstruction from a directory of text files.
pub fn read_reconstruction_txt(dir: impl AsRef<Path>) -> Result<Reconstruction, CodecError> {
    let dir = dir.as_ref();
    let cameras = text::read_cameras_txt(dir.join("cameras.txt"))?;
    let images = text::read_images_txt(dir.join("images.txt"))?;
    let points3d = text::read_points3d_txt(dir.join("points3D.txt"))?;
    let rigs_path = dir.join("rigs.txt");
    let rigs = if rigs_path.exists() {
        text::read_rigs_txt(rigs_path)?
    } else {
        BTreeMap::new()
    };
    let frames_path = dir.join("frames.txt");
    let frames = if frames_path.exists() {
        text::read_frames_txt(frames_path)?
    } else {
        BTreeMap::new()
    };
    Ok(Reconstruction { cameras, images, points3d, rigs, frames })
}

/// Write a reconstruction as text files into a directory.
pub fn write_reconstruction_txt(
    dir: impl AsRef<Path>,
    recon: &Reconstruction,
) -> Result<(), CodecError> {
    let dir = dir.as_ref();
    text::write_cameras_txt(dir.join("cameras.txt"), &recon.cameras)?;
    text::write_images_txt(dir.join("images.txt"), &recon.images)?;
    text::write_points3d_txt(dir.join("points3D.txt"), &recon.points3d)?;
    if !recon.rigs.is_empty() {
        text::write_rigs_txt(dir.join("rigs.txt"), &recon.rigs)?;
    }
    if !recon.frames.is_empty() {
        text::write_frames_txt(dir.join("frames.txt"), &recon.frames)?;
    }
    Ok(())
}

/// CSR-encoded observation tracks, as exposed by external lazy
/// typed-array reconstruction providers.
///
/// Point `i` observes images `image_ids[offsets[i]..offsets[i + 1]]`,
/// with the matching 2D point indices in `point2d_idxs`.
#[derive(Debug, Clone, Copy)]
pub struct CsrTracks<'a> {
    /// Per-point offsets into the flattened arrays, length `n + 1`.
    pub offsets: &'a [u32],
    /// Flattened observing image ids.
    pub image_ids: &'a [u32],
    /// Flattened 2D point indices, parallel to `image_ids`.
    pub point2d_idxs: &'a [u32],
}

/// Assemble a full 3D point map from flat per-point arrays and CSR tracks.
///
/// `positions` holds xyz triplets, `colors` rgb triplets, both parallel
/// to `ids`; `errors` one value per point.
pub fn points3d_from_csr(
    ids: &[i64],
    positions: &[f64],
    colors: &[u8],
    errors: &[f64],
    tracks: CsrTracks,
) -> Result<BTreeMap<i64, Point3d>, CodecError> {
    let n = ids.len();
    if positions.len() != n * 3 {
        return Err(CodecError::InvalidCsr(format!(
            "expected {} position values, got {}",
            n * 3,
            positions.len()
        )));
    }
    if colors.len() != n * 3 {
        return Err(CodecError::InvalidCsr(format!(
            "expected {} color values, got {}",
            n * 3,
            colors.len()
        )));
    }
    if errors.len() != n {
        return Err(CodecError::InvalidCsr(format!(
            "expected {} error values, got {}",
            n,
            errors.len()
        )));
    }
    if tracks.offsets.len() != n + 1 {
        return Err(CodecError::InvalidCsr(format!(
            "expected {} track offsets, got {}",
            n + 1,
            tracks.offsets.len()
        )));
    }
    if tracks.image_ids.len() != tracks.point2d_idxs.len() {
        return Err(CodecError::InvalidCsr(
            "track image id and point2d index arrays differ in length".to_string(),
        ));
    }

    let mut points = BTreeMap::new();
    for (i, point3d_id) in ids.iter().copied().enumerate() {
        let start = tracks.offsets[i] as usize;
        let end = tracks.offsets[i + 1] as usize;
        if start > end || end > tracks.image_ids.len() {
            return Err(CodecError::InvalidCsr(format!(
                "track offsets {start}..{end} out of bounds for point {point3d_id}"
            )));
        }
        let track = (start..end)
            .map(|j| TrackElement {
                image_id: tracks.image_ids[j],
                point2d_idx: tracks.point2d_idxs[j],
            })
            .collect();
        points.insert(
            point3d_id,
            Point3d {
                point3d_id,
                xyz: [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]],
                rgb: [colors[i * 3], colors[i * 3 + 1], colors[i * 3 + 2]],
                error: errors[i],
                track,
            },
        );
    }
    Ok(points)
}
