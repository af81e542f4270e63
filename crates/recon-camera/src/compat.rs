use recon_scene::CameraModelId;

/// Outcome class of converting between two camera models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convertibility {
    /// The target represents the source without loss.
    Exact,
    /// The target loses or approximates information; a warning applies.
    Approximate,
    /// No meaningful conversion exists between the models.
    Incompatible,
}

/// Models allowed to convert into the 16-parameter sink model.
pub(crate) const SINK_SOURCES: [CameraModelId; 4] = [
    CameraModelId::SimplePinhole,
    CameraModelId::Pinhole,
    CameraModelId::SimpleRadial,
    CameraModelId::Radial,
];

/// Canonical distortion coefficient indices a model can represent.
///
/// Perspective models index into the FULL_OPENCV coefficient order
/// (k1, k2, p1, p2, k3, k4, k5, k6); fisheye models into the
/// THIN_PRISM_FISHEYE order (k1, k2, p1, p2, k3, k4, sx1, sy1). The
/// shared layout is what turns the OPENCV_FISHEYE ⇄ THIN_PRISM_FISHEYE
/// index remapping into plain slot assignment.
pub(crate) fn coeff_slots(model: CameraModelId) -> &'static [usize] {
    match model {
        CameraModelId::SimplePinhole | CameraModelId::Pinhole => &[],
        CameraModelId::SimpleRadial | CameraModelId::SimpleRadialFisheye => &[0],
        CameraModelId::Radial | CameraModelId::RadialFisheye => &[0, 1],
        CameraModelId::OpenCV => &[0, 1, 2, 3],
        CameraModelId::OpenCVFisheye => &[0, 1, 4, 5],
        CameraModelId::FullOpenCV | CameraModelId::ThinPrismFisheye => {
            &[0, 1, 2, 3, 4, 5, 6, 7]
        }
        // FOV and the sink never take the lattice path
        CameraModelId::Fov | CameraModelId::RadTanThinPrismFisheye => &[],
    }
}

fn slots_contain(superset: &[usize], subset: &[usize]) -> bool {
    subset.iter().all(|s| superset.contains(s))
}

/// Classify the conversion from one camera model to another.
///
/// Precedence: identity, perspective/fisheye family split, sink rules,
/// FOV Taylor links, then the expansion/reduction lattice. Within a
/// family every pair is at worst approximate; `Approximate` here is the
/// generic class, an individual camera may still convert exactly when
/// its dropped parameters are negligible.
pub fn can_convert(from: CameraModelId, to: CameraModelId) -> Convertibility {
    if from == to {
        return Convertibility::Exact;
    }
    if (from.is_perspective() && to.is_fisheye()) || (from.is_fisheye() && to.is_perspective()) {
        return Convertibility::Incompatible;
    }
    if from == CameraModelId::RadTanThinPrismFisheye {
        return Convertibility::Incompatible;
    }
    if to == CameraModelId::RadTanThinPrismFisheye {
        return if SINK_SOURCES.contains(&from) {
            Convertibility::Approximate
        } else {
            Convertibility::Incompatible
        };
    }
    if from == CameraModelId::Fov || to == CameraModelId::Fov {
        let other = if from == CameraModelId::Fov { to } else { from };
        return if matches!(other, CameraModelId::SimpleRadial | CameraModelId::Radial) {
            Convertibility::Approximate
        } else {
            Convertibility::Incompatible
        };
    }
    let expands = slots_contain(coeff_slots(to), coeff_slots(from))
        && (from.has_single_focal() || !to.has_single_focal());
    if expands {
        Convertibility::Exact
    } else {
        Convertibility::Approximate
    }
}
