use std::collections::BTreeMap;

use recon_io::reconstruction::{
    read_reconstruction_bin, read_reconstruction_txt, write_reconstruction_bin,
    write_reconstruction_txt,
};
use recon_io::CodecError;
use recon_scene::{
    Camera, CameraModelId, Frame, Image, Point2d, Point3d, Reconstruction, Rig, RigSensor,
    SensorId, SensorType, TrackElement, INVALID_POINT3D_ID,
};

fn sample_reconstruction() -> Reconstruction {
    let mut cameras = BTreeMap::new();
    cameras.insert(
        1,
        Camera {
            camera_id: 1,
            model_id: CameraModelId::SimpleRadial,
            width: 3072,
            height: 2304,
            params: vec![2559.81, 1536.0, 1152.0, 0.0394],
        },
    );
    cameras.insert(
        2,
        Camera {
            camera_id: 2,
            model_id: CameraModelId::OpenCVFisheye,
            width: 1280,
            height: 1024,
            params: vec![610.2, 611.7, 640.0, 512.0, 0.02, -0.004, 0.0006, -0.0001],
        },
    );

    let mut images = BTreeMap::new();
    images.insert(
        1,
        Image {
            image_id: 1,
            rotation: [0.851773, 0.047792, -0.287209, -0.436503],
            translation: [-0.110789, 0.957251, 2.79227],
            camera_id: 1,
            name: "P1180141.JPG".to_string(),
            points2d: vec![
                Point2d { x: 800.25, y: 600.125, point3d_id: 5 },
                Point2d { x: 12.0, y: 15.5, point3d_id: INVALID_POINT3D_ID },
                Point2d { x: 1024.0, y: 768.0, point3d_id: 6 },
            ],
            num_points2d: 3,
        },
    );
    images.insert(
        2,
        Image {
            image_id: 2,
            rotation: [1.0, 0.0, 0.0, 0.0],
            translation: [0.0, 0.0, 0.0],
            camera_id: 2,
            name: "rig/cam2/000001.png".to_string(),
            points2d: Vec::new(),
            num_points2d: 0,
        },
    );

    let mut points3d = BTreeMap::new();
    points3d.insert(
        5,
        Point3d {
            point3d_id: 5,
            xyz: [1.0123, -2.345, 7.89],
            rgb: [128, 64, 255],
            error: 0.721,
            track: vec![
                TrackElement { image_id: 1, point2d_idx: 0 },
                TrackElement { image_id: 2, point2d_idx: 1 },
            ],
        },
    );
    points3d.insert(
        6,
        Point3d {
            point3d_id: 6,
            xyz: [-0.5, 0.25, 3.5],
            rgb: [0, 0, 0],
            error: -1.0,
            track: vec![TrackElement { image_id: 1, point2d_idx: 2 }],
        },
    );

    let mut rigs = BTreeMap::new();
    rigs.insert(
        1,
        Rig {
            rig_id: 1,
            ref_sensor: SensorId { sensor_type: SensorType::Camera, id: 1 },
            sensors: vec![RigSensor {
                sensor: SensorId { sensor_type: SensorType::Camera, id: 2 },
                sensor_from_rig: Some([0.9998, 0.0, 0.02, 0.0, 0.12, 0.0, 0.01]),
            }],
        },
    );

    let mut frames = BTreeMap::new();
    frames.insert(
        1,
        Frame {
            frame_id: 1,
            rig_id: 1,
            rig_from_world: [0.851773, 0.047792, -0.287209, -0.436503, -0.11, 0.95, 2.79],
            data_ids: vec![
                (SensorId { sensor_type: SensorType::Camera, id: 1 }, 1),
                (SensorId { sensor_type: SensorType::Camera, id: 2 }, 2),
            ],
        },
    );

    Reconstruction { cameras, images, points3d, rigs, frames }
}

#[test]
fn binary_directory_round_trip() -> Result<(), CodecError> {
    let recon = sample_reconstruction();
    let dir = tempfile::tempdir()?;
    write_reconstruction_bin(dir.path(), &recon)?;
    let loaded = read_reconstruction_bin(dir.path())?;
    assert_eq!(loaded, recon);
    Ok(())
}

#[test]
fn text_directory_round_trip() -> Result<(), CodecError> {
    let recon = sample_reconstruction();
    let dir = tempfile::tempdir()?;
    write_reconstruction_txt(dir.path(), &recon)?;
    let loaded = read_reconstruction_txt(dir.path())?;
    assert_eq!(loaded, recon);
    Ok(())
}

#[test]
fn rig_and_frame_files_are_optional() -> Result<(), CodecError> {
    let mut recon = sample_reconstruction();
    recon.rigs.clear();
    recon.frames.clear();
    let dir = tempfile::tempdir()?;
    write_reconstruction_bin(dir.path(), &recon)?;
    assert!(!dir.path().join("rigs.bin").exists());
    let loaded = read_reconstruction_bin(dir.path())?;
    assert!(loaded.rigs.is_empty() && loaded.frames.is_empty());
    Ok(())
}

#[test]
fn binary_and_text_agree_on_derived_statistics() {
    let recon = sample_reconstruction();
    // 2 valid observations in image 1, none in image 2
    assert_eq!(recon.mean_observations_per_image(), 1.0);
    assert_eq!(recon.mean_track_length(), 1.5);
}
