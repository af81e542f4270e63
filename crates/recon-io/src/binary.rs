//! Binary entity codecs matching the external on-disk layout.
//!
//! All integers are little-endian; leading entity counts are u64. A
//! buffer that ends before a record is complete surfaces as
//! [`CodecError::UnexpectedEof`] and aborts the whole parse.

use std::collections::BTreeMap;
use std::path::Path;

use recon_scene::{
    Camera, CameraModelId, Frame, Image, Point2d, Point3d, Rig, RigSensor, SensorId, SensorType,
    TrackElement,
};

use crate::error::CodecError;
use crate::stream::{ByteReader, ByteWriter};

/// Bytes per binary 2D observation: f64 x, f64 y, u64 point3d id.
const POINT2D_RECORD_SIZE: usize = 24;

/// Decode a cameras binary buffer.
pub fn decode_cameras_bin(data: &[u8]) -> Result<BTreeMap<u32, Camera>, CodecError> {
    let mut r = ByteReader::new(data);
    let num_cameras = r.read_u64()?;
    let mut cameras = BTreeMap::new();
    for _ in 0..num_cameras {
        let camera_id = r.read_u32()?;
        let model_id = CameraModelId::from_id(r.read_i32()?)?;
        let width = r.read_u64()?;
        let height = r.read_u64()?;
        let mut params = Vec::with_capacity(model_id.num_params());
        for _ in 0..model_id.num_params() {
            params.push(r.read_f64()?);
        }
        cameras.insert(
            camera_id,
            Camera { camera_id, model_id, width, height, params },
        );
    }
    Ok(cameras)
}

/// Encode cameras into the binary layout, in ascending id order.
pub fn encode_cameras_bin(cameras: &BTreeMap<u32, Camera>) -> Vec<u8> {
    let mut w = ByteWriter::new();
    w.write_u64(cameras.len() as u64);
    for camera in cameras.values() {
        w.write_u32(camera.camera_id);
        w.write_i32(camera.model_id as i32);
        w.write_u64(camera.width);
        w.write_u64(camera.height);
        for param in &camera.params {
            w.write_f64(*param);
        }
    }
    w.into_bytes()
}

fn read_image_header(r: &mut ByteReader) -> Result<Image, CodecError> {
    let image_id = r.read_u32()?;
    let mut rotation = [0.0; 4];
    for q in rotation.iter_mut() {
        *q = r.read_f64()?;
    }
    let mut translation = [0.0; 3];
    for t in translation.iter_mut() {
        *t = r.read_f64()?;
    }
    let camera_id = r.read_u32()?;
    let name = r.read_cstr()?;
    let num_points2d = r.read_u64()?;
    Ok(Image {
        image_id,
        rotation,
        translation,
        camera_id,
        name,
        points2d: Vec::new(),
        num_points2d,
    })
}

/// Decode an images binary buffer, materializing all 2D observations.
pub fn decode_images_bin(data: &[u8]) -> Result<BTreeMap<u32, Image>, CodecError> {
    let mut r = ByteReader::new(data);
    let num_images = r.read_u64()?;
    let mut images = BTreeMap::new();
    for _ in 0..num_images {
        let mut image = read_image_header(&mut r)?;
        let mut points2d = Vec::with_capacity(image.num_points2d as usize);
        for _ in 0..image.num_points2d {
            let x = r.read_f64()?;
            let y = r.read_f64()?;
            // u64::MAX reinterprets as the -1 sentinel
            let point3d_id = r.read_u64()? as i64;
            points2d.push(Point2d { x, y, point3d_id });
        }
        image.points2d = points2d;
        images.insert(image.image_id, image);
    }
    Ok(images)
}

/// Decode an images binary buffer without materializing observations.
///
/// Skips `num_points2d * 24` bytes per image instead of building
/// [`Point2d`] values; the returned images carry an empty `points2d`
/// and the true `num_points2d`.
pub fn decode_images_bin_lite(data: &[u8]) -> Result<BTreeMap<u32, Image>, CodecError> {
    let mut r = ByteReader::new(data);
    let num_images = r.read_u64()?;
    let mut images = BTreeMap::new();
    for _ in 0..num_images {
        let image = read_image_header(&mut r)?;
        r.skip(image.num_points2d as usize * POINT2D_RECORD_SIZE)?;
        images.insert(image.image_id, image);
    }
    Ok(images)
}

/// Encode images into the binary layout, in ascending id order.
///
/// Every image must carry its full observation payload: an image whose
/// declared `num_points2d` differs from the materialized observations
/// (as produced by [`decode_images_bin_lite`]) is refused, since
/// writing either count would drop data or corrupt the layout.
pub fn encode_images_bin(images: &BTreeMap<u32, Image>) -> Result<Vec<u8>, CodecError> {
    let mut w = ByteWriter::new();
    w.write_u64(images.len() as u64);
    for image in images.values() {
        if image.num_points2d != image.points2d.len() as u64 {
            return Err(CodecError::UnmaterializedObservations {
                image_id: image.image_id,
                declared: image.num_points2d,
                materialized: image.points2d.len(),
            });
        }
        w.write_u32(image.image_id);
        for q in image.rotation {
            w.write_f64(q);
        }
        for t in image.translation {
            w.write_f64(t);
        }
        w.write_u32(image.camera_id);
        w.write_cstr(&image.name);
        w.write_u64(image.points2d.len() as u64);
        for point in &image.points2d {
            w.write_f64(point.x);
            w.write_f64(point.y);
            // the -1 sentinel becomes u64::MAX
            w.write_u64(point.point3d_id as u64);
        }
    }
    Ok(w.into_bytes())
}

/// Decode a points3D binary buffer.
pub fn decode_points3d_bin(data: &[u8]) -> Result<BTreeMap<i64, Point3d>, CodecError> {
    let mut r = ByteReader::new(data);
    let num_points = r.read_u64()?;
    let mut points = BTreeMap::new();
    for _ in 0..num_points {
        let point3d_id = r.read_u64()? as i64;
        let mut xyz = [0.0; 3];
        for v in xyz.iter_mut() {
            *v = r.read_f64()?;
        }
        let mut rgb = [0u8; 3];
        for c in rgb.iter_mut() {
            *c = r.read_u8()?;
        }
        let error = r.read_f64()?;
        let track_len = r.read_u64()?;
        let mut track = Vec::with_capacity(track_len as usize);
        for _ in 0..track_len {
            let image_id = r.read_u32()?;
            let point2d_idx = r.read_u32()?;
            track.push(TrackElement { image_id, point2d_idx });
        }
        points.insert(point3d_id, Point3d { point3d_id, xyz, rgb, error, track });
    }
    Ok(points)
}

/// Encode 3D points into the binary layout, in ascending id order.
pub fn encode_points3d_bin(points: &BTreeMap<i64, Point3d>) -> Vec<u8> {
    let mut w = ByteWriter::new();
    w.write_u64(points.len() as u64);
    for point in points.values() {
        w.write_u64(point.point3d_id as u64);
        for v in point.xyz {
            w.write_f64(v);
        }
        for c in point.rgb {
            w.write_u8(c);
        }
        w.write_f64(point.error);
        w.write_u64(point.track.len() as u64);
        for element in &point.track {
            w.write_u32(element.image_id);
            w.write_u32(element.point2d_idx);
        }
    }
    w.into_bytes()
}

fn read_sensor_id(r: &mut ByteReader) -> Result<SensorId, CodecError> {
    let sensor_type = SensorType::from_id(r.read_i32()?)?;
    let id = r.read_u32()?;
    Ok(SensorId { sensor_type, id })
}

fn read_pose7(r: &mut ByteReader) -> Result<[f64; 7], CodecError> {
    let mut pose = [0.0; 7];
    for v in pose.iter_mut() {
        *v = r.read_f64()?;
    }
    Ok(pose)
}

/// Decode a rigs binary buffer.
pub fn decode_rigs_bin(data: &[u8]) -> Result<BTreeMap<u32, Rig>, CodecError> {
    let mut r = ByteReader::new(data);
    let num_rigs = r.read_u64()?;
    let mut rigs = BTreeMap::new();
    for _ in 0..num_rigs {
        let rig_id = r.read_u32()?;
        let num_sensors = r.read_u32()?;
        let ref_sensor = read_sensor_id(&mut r)?;
        // the reference sensor is part of the count but carries no pose record
        let mut sensors = Vec::with_capacity(num_sensors.saturating_sub(1) as usize);
        for _ in 1..num_sensors {
            let sensor = read_sensor_id(&mut r)?;
            let has_pose = r.read_u8()? != 0;
            let sensor_from_rig = if has_pose { Some(read_pose7(&mut r)?) } else { None };
            sensors.push(RigSensor { sensor, sensor_from_rig });
        }
        rigs.insert(rig_id, Rig { rig_id, ref_sensor, sensors });
    }
    Ok(rigs)
}

/// Encode rigs into the binary layout, in ascending id order.
pub fn encode_rigs_bin(rigs: &BTreeMap<u32, Rig>) -> Vec<u8> {
    let mut w = ByteWriter::new();
    w.write_u64(rigs.len() as u64);
    for rig in rigs.values() {
        w.write_u32(rig.rig_id);
        w.write_u32(rig.num_sensors() as u32);
        w.write_i32(rig.ref_sensor.sensor_type as i32);
        w.write_u32(rig.ref_sensor.id);
        for sensor in &rig.sensors {
            w.write_i32(sensor.sensor.sensor_type as i32);
            w.write_u32(sensor.sensor.id);
            match sensor.sensor_from_rig {
                Some(pose) => {
                    w.write_u8(1);
                    for v in pose {
                        w.write_f64(v);
                    }
                }
                None => w.write_u8(0),
            }
        }
    }
    w.into_bytes()
}

/// Decode a frames binary buffer.
pub fn decode_frames_bin(data: &[u8]) -> Result<BTreeMap<u32, Frame>, CodecError> {
    let mut r = ByteReader::new(data);
    let num_frames = r.read_u64()?;
    let mut frames = BTreeMap::new();
    for _ in 0..num_frames {
        let frame_id = r.read_u32()?;
        let rig_id = r.read_u32()?;
        let rig_from_world = read_pose7(&mut r)?;
        let num_data_ids = r.read_u32()?;
        let mut data_ids = Vec::with_capacity(num_data_ids as usize);
        for _ in 0..num_data_ids {
            let sensor = read_sensor_id(&mut r)?;
            let data_id = r.read_u64()?;
            data_ids.push((sensor, data_id));
        }
        frames.insert(frame_id, Frame { frame_id, rig_id, rig_from_world, data_ids });
    }
    Ok(frames)
}

/// Encode frames into the binary layout, in ascending id order.
pub fn encode_frames_bin(frames: &BTreeMap<u32, Frame>) -> Vec<u8> {
    let mut w = ByteWriter::new();
    w.write_u64(frames.len() as u64);
    for frame in frames.values() {
        w.write_u32(frame.frame_id);
        w.write_u32(frame.rig_id);
        for v in frame.rig_from_world {
            w.write_f64(v);
        }
        w.write_u32(frame.data_ids.len() as u32);
        for (sensor, data_id) in &frame.data_ids {
            w.write_i32(sensor.sensor_type as i32);
            w.write_u32(sensor.id);
            w.write_u64(*data_id);
        }
    }
    w.into_bytes()
}

/// Read a cameras binary file.
pub fn read_cameras_bin(path: impl AsRef<Path>) -> Result<BTreeMap<u32, Camera>, CodecError> {
    decode_cameras_bin(&std::fs::read(path)?)
}

/// Write a cameras binary file.
pub fn write_cameras_bin(
    path: impl AsRef<Path>,
    cameras: &BTreeMap<u32, Camera>,
) -> Result<(), CodecError> {
    Ok(std::fs::write(path, encode_cameras_bin(cameras))?)
}

/// Read an images binary file.
pub fn read_images_bin(path: impl AsRef<Path>) -> Result<BTreeMap<u32, Image>, CodecError> {
    decode_images_bin(&std::fs::read(path)?)
}

/// Read an images binary file without materializing observations.
pub fn read_images_bin_lite(path: impl AsRef<Path>) -> Result<BTreeMap<u32, Image>, CodecError> {
    decode_images_bin_lite(&std::fs::read(path)?)
}

/// Write an images binary file.
pub fn write_images_bin(
    path: impl AsRef<Path>,
    images: &BTreeMap<u32, Image>,
) -> Result<(), CodecError> {
    Ok(std::fs::write(path, encode_images_bin(images)?)?)
}

/// Read a points3D binary file.
pub fn read_points3d_bin(path: impl AsRef<Path>) -> Result<BTreeMap<i64, Point3d>, CodecError> {
    decode_points3d_bin(&std::fs::read(path)?)
}

/// Write a points3D binary file.
pub fn write_points3d_bin(
    path: impl AsRef<Path>,
    points: &BTreeMap<i64, Point3d>,
) -> Result<(), CodecError> {
    Ok(std::fs::write(path, encode_points3d_bin(points))?)
}

/// Read a rigs binary file.
pub fn read_rigs_bin(path: impl AsRef<Path>) -> Result<BTreeMap<u32, Rig>, CodecError> {
    decode_rigs_bin(&std::fs::read(path)?)
}

/// Write a rigs binary file.
pub fn write_rigs_bin(path: impl AsRef<Path>, rigs: &BTreeMap<u32, Rig>) -> Result<(), CodecError> {
    Ok(std::fs::write(path, encode_rigs_bin(rigs))?)
}

/// Read a frames binary file.
pub fn read_frames_bin(path: impl AsRef<Path>) -> Result<BTreeMap<u32, Frame>, CodecError> {
    decode_frames_bin(&std::fs::read(path)?)
}

/// Write a frames binary file.
pub fn write_frames_bin(
    path: impl AsRef<Path>,
    frames: &BTreeMap<u32, Frame>,
) -> Result<(), CodecError> {
    Ok(std::fs::write(path, encode_frames_bin(frames))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recon_scene::INVALID_POINT3D_ID;

    fn sample_camera(id: u32) -> Camera {
        Camera {
            camera_id: id,
            model_id: CameraModelId::SimpleRadial,
            width: 1920,
            height: 1080,
            params: vec![1000.0, 960.0, 540.0, 0.05],
        }
    }

    fn sample_image(id: u32) -> Image {
        Image {
            image_id: id,
            rotation: [0.5, 0.5, -0.5, 0.5],
            translation: [1.0, -2.0, 3.5],
            camera_id: 1,
            name: format!("frames/img_{id:04}.jpg"),
            points2d: vec![
                Point2d { x: 12.5, y: 34.25, point3d_id: 100 },
                Point2d { x: 56.0, y: 78.0, point3d_id: INVALID_POINT3D_ID },
            ],
            num_points2d: 2,
        }
    }

    #[test]
    fn cameras_round_trip() -> Result<(), CodecError> {
        let mut cameras = BTreeMap::new();
        for id in [5u32, 1, 3] {
            cameras.insert(id, sample_camera(id));
        }
        let decoded = decode_cameras_bin(&encode_cameras_bin(&cameras))?;
        assert_eq!(decoded, cameras);
        Ok(())
    }

    #[test]
    fn images_round_trip() -> Result<(), CodecError> {
        let mut images = BTreeMap::new();
        images.insert(2, sample_image(2));
        images.insert(1, sample_image(1));
        let decoded = decode_images_bin(&encode_images_bin(&images)?)?;
        assert_eq!(decoded, images);
        Ok(())
    }

    #[test]
    fn unmatched_point3d_id_writes_unsigned_max() {
        let mut images = BTreeMap::new();
        let mut image = sample_image(1);
        image.points2d = vec![Point2d { x: 0.0, y: 0.0, point3d_id: INVALID_POINT3D_ID }];
        image.num_points2d = 1;
        images.insert(1, image);
        let bytes = encode_images_bin(&images).unwrap();
        // the sentinel occupies the last 8 bytes of the single observation
        let tail = &bytes[bytes.len() - 8..];
        assert_eq!(tail, u64::MAX.to_le_bytes());
    }

    #[test]
    fn lite_parser_skips_payload_and_keeps_count() -> Result<(), CodecError> {
        let mut images = BTreeMap::new();
        images.insert(1, sample_image(1));
        images.insert(9, sample_image(9));
        let bytes = encode_images_bin(&images)?;
        let lite = decode_images_bin_lite(&bytes)?;
        assert_eq!(lite.len(), 2);
        for (id, image) in &lite {
            assert!(image.points2d.is_empty());
            assert_eq!(image.num_points2d, 2);
            assert_eq!(image.name, images[id].name);
        }
        Ok(())
    }

    #[test]
    fn lite_parsed_images_refuse_to_encode() -> Result<(), CodecError> {
        let mut images = BTreeMap::new();
        images.insert(1, sample_image(1));
        let lite = decode_images_bin_lite(&encode_images_bin(&images)?)?;
        assert_eq!(lite[&1].num_points2d, 2);
        assert!(matches!(
            encode_images_bin(&lite),
            Err(CodecError::UnmaterializedObservations { image_id: 1, declared: 2, materialized: 0 })
        ));
        Ok(())
    }

    #[test]
    fn records_are_emitted_in_ascending_id_order() -> Result<(), CodecError> {
        let mut cameras = BTreeMap::new();
        let mut images = BTreeMap::new();
        for id in [9u32, 2, 5] {
            cameras.insert(id, sample_camera(id));
            images.insert(id, sample_image(id));
        }

        let bytes = encode_cameras_bin(&cameras);
        let mut r = ByteReader::new(&bytes);
        let mut camera_ids = Vec::new();
        for _ in 0..r.read_u64()? {
            camera_ids.push(r.read_u32()?);
            // model id, width, height, four SIMPLE_RADIAL params
            r.skip(4 + 8 + 8 + 4 * 8)?;
        }
        assert_eq!(camera_ids, vec![2, 5, 9]);

        let bytes = encode_images_bin(&images)?;
        let mut r = ByteReader::new(&bytes);
        let mut image_ids = Vec::new();
        for _ in 0..r.read_u64()? {
            image_ids.push(r.read_u32()?);
            // quaternion, translation, camera id
            r.skip(7 * 8 + 4)?;
            r.read_cstr()?;
            let count = r.read_u64()?;
            r.skip(count as usize * POINT2D_RECORD_SIZE)?;
        }
        assert_eq!(image_ids, vec![2, 5, 9]);
        Ok(())
    }

    #[test]
    fn points3d_round_trip() -> Result<(), CodecError> {
        let mut points = BTreeMap::new();
        points.insert(
            42,
            Point3d {
                point3d_id: 42,
                xyz: [1.0, 2.0, 3.0],
                rgb: [255, 128, 0],
                error: 0.75,
                track: vec![
                    TrackElement { image_id: 1, point2d_idx: 0 },
                    TrackElement { image_id: 2, point2d_idx: 5 },
                ],
            },
        );
        let decoded = decode_points3d_bin(&encode_points3d_bin(&points))?;
        assert_eq!(decoded, points);
        Ok(())
    }

    #[test]
    fn rigs_and_frames_round_trip() -> Result<(), CodecError> {
        let mut rigs = BTreeMap::new();
        rigs.insert(
            1,
            Rig {
                rig_id: 1,
                ref_sensor: SensorId { sensor_type: SensorType::Camera, id: 1 },
                sensors: vec![
                    RigSensor {
                        sensor: SensorId { sensor_type: SensorType::Camera, id: 2 },
                        sensor_from_rig: Some([1.0, 0.0, 0.0, 0.0, 0.1, 0.0, 0.0]),
                    },
                    RigSensor {
                        sensor: SensorId { sensor_type: SensorType::Imu, id: 1 },
                        sensor_from_rig: None,
                    },
                ],
            },
        );
        let decoded = decode_rigs_bin(&encode_rigs_bin(&rigs))?;
        assert_eq!(decoded, rigs);

        let mut frames = BTreeMap::new();
        frames.insert(
            7,
            Frame {
                frame_id: 7,
                rig_id: 1,
                rig_from_world: [1.0, 0.0, 0.0, 0.0, 4.0, 5.0, 6.0],
                data_ids: vec![
                    (SensorId { sensor_type: SensorType::Camera, id: 1 }, 11),
                    (SensorId { sensor_type: SensorType::Camera, id: 2 }, 12),
                ],
            },
        );
        let decoded = decode_frames_bin(&encode_frames_bin(&frames))?;
        assert_eq!(decoded, frames);
        Ok(())
    }

    #[test]
    fn truncated_buffer_is_fatal() {
        let mut cameras = BTreeMap::new();
        cameras.insert(1, sample_camera(1));
        let mut bytes = encode_cameras_bin(&cameras);
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(
            decode_cameras_bin(&bytes),
            Err(CodecError::UnexpectedEof { .. })
        ));
    }
}
