//! Text entity codecs matching the external human-readable layout.
//!
//! Writers emit the fixed `#` headers verbatim, including the computed
//! summary line, and one logical record per line (images and frames use
//! a header line plus a payload line). Readers skip blank and `#` lines;
//! a malformed record is skipped with a warning and parsing continues.

use std::collections::BTreeMap;
use std::path::Path;

use log::warn;
use recon_scene::{
    Camera, CameraModelId, Frame, Image, Point2d, Point3d, Rig, RigSensor, SensorId, SensorType,
    TrackElement,
};

use crate::error::CodecError;
use crate::fmt::fmt_f64;

fn parse_token<T: std::str::FromStr>(token: &str) -> Option<T> {
    token.parse().ok()
}

fn parse_sensor_type(token: &str) -> Option<SensorType> {
    SensorType::from_id(parse_token(token)?).ok()
}

/// Format cameras as text, in ascending id order.
pub fn format_cameras_txt(cameras: &BTreeMap<u32, Camera>) -> String {
    let mut out = String::new();
    out.push_str("# Camera list with one line of data per camera:\n");
    out.push_str("#   CAMERA_ID, MODEL, WIDTH, HEIGHT, PARAMS[]\n");
    out.push_str(&format!("# Number of cameras: {}\n", cameras.len()));
    for camera in cameras.values() {
        out.push_str(&format!(
            "{} {} {} {}",
            camera.camera_id,
            camera.model_id.name(),
            camera.width,
            camera.height
        ));
        for param in &camera.params {
            out.push(' ');
            out.push_str(&fmt_f64(*param));
        }
        out.push('\n');
    }
    out
}

fn parse_camera_line(line: &str) -> Option<Camera> {
    let parts = line.split_whitespace().collect::<Vec<_>>();
    if parts.len() < 4 {
        return None;
    }
    let camera_id = parse_token(parts[0])?;
    let model_id = CameraModelId::from_name(parts[1]).ok()?;
    let width = parse_token(parts[2])?;
    let height = parse_token(parts[3])?;
    if parts.len() - 4 != model_id.num_params() {
        return None;
    }
    let params = parts[4..]
        .iter()
        .map(|s| parse_token(s))
        .collect::<Option<Vec<f64>>>()?;
    Some(Camera { camera_id, model_id, width, height, params })
}

/// Parse a cameras text document. Malformed lines are skipped.
pub fn parse_cameras_txt(text: &str) -> BTreeMap<u32, Camera> {
    let mut cameras = BTreeMap::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_camera_line(line) {
            Some(camera) => {
                cameras.insert(camera.camera_id, camera);
            }
            None => warn!("skipping malformed camera record at line {}", lineno + 1),
        }
    }
    cameras
}

/// Format images as text, in ascending id order.
///
/// Every image must carry its full observation payload; an image whose
/// declared `num_points2d` differs from the materialized observations
/// (as produced by the lite binary parser) is refused rather than
/// silently written with an empty payload line.
pub fn format_images_txt(images: &BTreeMap<u32, Image>) -> Result<String, CodecError> {
    for image in images.values() {
        if image.num_points2d != image.points2d.len() as u64 {
            return Err(CodecError::UnmaterializedObservations {
                image_id: image.image_id,
                declared: image.num_points2d,
                materialized: image.points2d.len(),
            });
        }
    }
    let total_valid: u64 = images.values().map(|i| i.num_valid_points2d()).sum();
    let mean = if images.is_empty() {
        0.0
    } else {
        total_valid as f64 / images.len() as f64
    };
    let mut out = String::new();
    out.push_str("# Image list with two lines of data per image:\n");
    out.push_str("#   IMAGE_ID, QW, QX, QY, QZ, TX, TY, TZ, CAMERA_ID, NAME\n");
    out.push_str("#   POINTS2D[] as (X, Y, POINT3D_ID)\n");
    out.push_str(&format!(
        "# Number of images: {}, mean observations per image: {}\n",
        images.len(),
        fmt_f64(mean)
    ));
    for image in images.values() {
        out.push_str(&image.image_id.to_string());
        for q in image.rotation {
            out.push(' ');
            out.push_str(&fmt_f64(q));
        }
        for t in image.translation {
            out.push(' ');
            out.push_str(&fmt_f64(t));
        }
        out.push_str(&format!(" {} {}\n", image.camera_id, image.name));
        let mut first = true;
        for point in &image.points2d {
            if !first {
                out.push(' ');
            }
            first = false;
            out.push_str(&format!(
                "{} {} {}",
                fmt_f64(point.x),
                fmt_f64(point.y),
                point.point3d_id
            ));
        }
        out.push('\n');
    }
    Ok(out)
}

fn parse_image_lines(header: &str, payload: &str) -> Option<Image> {
    // nine fixed fields, then the name with its internal whitespace intact
    let mut rest = header;
    let mut fields = [""; 9];
    for field in fields.iter_mut() {
        rest = rest.trim_start();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        *field = &rest[..end];
        rest = &rest[end..];
    }
    let name = rest.trim_start();
    if name.is_empty() {
        return None;
    }
    let image_id = parse_token(fields[0])?;
    let mut rotation = [0.0; 4];
    for (q, part) in rotation.iter_mut().zip(&fields[1..5]) {
        *q = parse_token(part)?;
    }
    let mut translation = [0.0; 3];
    for (t, part) in translation.iter_mut().zip(&fields[5..8]) {
        *t = parse_token(part)?;
    }
    let camera_id = parse_token(fields[8])?;
    let points2d = payload
        .split_whitespace()
        .collect::<Vec<_>>()
        .chunks_exact(3)
        .map(|chunk| {
            Some(Point2d {
                x: parse_token(chunk[0])?,
                y: parse_token(chunk[1])?,
                point3d_id: parse_token(chunk[2])?,
            })
        })
        .collect::<Option<Vec<_>>>()?;
    let num_points2d = points2d.len() as u64;
    Some(Image {
        image_id,
        rotation,
        translation,
        camera_id,
        name: name.to_string(),
        points2d,
        num_points2d,
    })
}

/// Parse an images text document. Malformed records are skipped.
pub fn parse_images_txt(text: &str) -> BTreeMap<u32, Image> {
    let mut images = BTreeMap::new();
    let mut lines = text.lines().enumerate();
    while let Some((lineno, line)) = lines.next() {
        let header = line.trim();
        if header.is_empty() || header.starts_with('#') {
            continue;
        }
        // the payload is the immediately following physical line; it is
        // legitimately empty for images without observations
        let payload = lines.next().map(|(_, l)| l).unwrap_or("");
        match parse_image_lines(header, payload) {
            Some(image) => {
                images.insert(image.image_id, image);
            }
            None => warn!("skipping malformed image record at line {}", lineno + 1),
        }
    }
    images
}

/// Format 3D points as text, in ascending id order.
pub fn format_points3d_txt(points: &BTreeMap<i64, Point3d>) -> String {
    let total_track: usize = points.values().map(|p| p.track_length()).sum();
    let mean = if points.is_empty() {
        0.0
    } else {
        total_track as f64 / points.len() as f64
    };
    let mut out = String::new();
    out.push_str("# 3D point list with one line of data per point:\n");
    out.push_str("#   POINT3D_ID, X, Y, Z, R, G, B, ERROR, TRACK[] as (IMAGE_ID, POINT2D_IDX)\n");
    out.push_str(&format!(
        "# Number of points: {}, mean track length: {}\n",
        points.len(),
        fmt_f64(mean)
    ));
    for point in points.values() {
        out.push_str(&point.point3d_id.to_string());
        for v in point.xyz {
            out.push(' ');
            out.push_str(&fmt_f64(v));
        }
        for c in point.rgb {
            out.push_str(&format!(" {c}"));
        }
        out.push(' ');
        out.push_str(&fmt_f64(point.error));
        for element in &point.track {
            out.push_str(&format!(" {} {}", element.image_id, element.point2d_idx));
        }
        out.push('\n');
    }
    out
}

fn parse_point3d_line(line: &str) -> Option<Point3d> {
    let parts = line.split_whitespace().collect::<Vec<_>>();
    if parts.len() < 8 {
        return None;
    }
    let point3d_id = parse_token(parts[0])?;
    let mut xyz = [0.0; 3];
    for (v, part) in xyz.iter_mut().zip(&parts[1..4]) {
        *v = parse_token(part)?;
    }
    let mut rgb = [0u8; 3];
    for (c, part) in rgb.iter_mut().zip(&parts[4..7]) {
        *c = parse_token(part)?;
    }
    let error = parse_token(parts[7])?;
    let track = parts[8..]
        .chunks_exact(2)
        .map(|chunk| {
            Some(TrackElement {
                image_id: parse_token(chunk[0])?,
                point2d_idx: parse_token(chunk[1])?,
            })
        })
        .collect::<Option<Vec<_>>>()?;
    Some(Point3d { point3d_id, xyz, rgb, error, track })
}

/// Parse a points3D text document. Malformed lines are skipped.
pub fn parse_points3d_txt(text: &str) -> BTreeMap<i64, Point3d> {
    let mut points = BTreeMap::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_point3d_line(line) {
            Some(point) => {
                points.insert(point.point3d_id, point);
            }
            None => warn!("skipping malformed point3D record at line {}", lineno + 1),
        }
    }
    points
}

/// Format rigs as text, in ascending id order.
pub fn format_rigs_txt(rigs: &BTreeMap<u32, Rig>) -> String {
    let mut out = String::new();
    out.push_str("# Rig list with one line of data per rig:\n");
    out.push_str(
        "#   RIG_ID, NUM_SENSORS, REF_SENSOR_TYPE, REF_SENSOR_ID, SENSORS[] as \
         (SENSOR_TYPE, SENSOR_ID, HAS_POSE[, QW, QX, QY, QZ, TX, TY, TZ])\n",
    );
    out.push_str(&format!("# Number of rigs: {}\n", rigs.len()));
    for rig in rigs.values() {
        out.push_str(&format!(
            "{} {} {} {}",
            rig.rig_id,
            rig.num_sensors(),
            rig.ref_sensor.sensor_type as i32,
            rig.ref_sensor.id
        ));
        for sensor in &rig.sensors {
            out.push_str(&format!(
                " {} {}",
                sensor.sensor.sensor_type as i32,
                sensor.sensor.id
            ));
            match sensor.sensor_from_rig {
                Some(pose) => {
                    out.push_str(" 1");
                    for v in pose {
                        out.push(' ');
                        out.push_str(&fmt_f64(v));
                    }
                }
                None => out.push_str(" 0"),
            }
        }
        out.push('\n');
    }
    out
}

fn parse_rig_line(line: &str) -> Option<Rig> {
    let parts = line.split_whitespace().collect::<Vec<_>>();
    if parts.len() < 4 {
        return None;
    }
    let rig_id = parse_token(parts[0])?;
    let num_sensors: u32 = parse_token(parts[1])?;
    let ref_sensor = SensorId {
        sensor_type: parse_sensor_type(parts[2])?,
        id: parse_token(parts[3])?,
    };
    let mut sensors = Vec::with_capacity(num_sensors.saturating_sub(1) as usize);
    let mut cursor = 4;
    for _ in 1..num_sensors {
        let sensor = SensorId {
            sensor_type: parse_sensor_type(parts.get(cursor)?)?,
            id: parse_token(parts.get(cursor + 1)?)?,
        };
        let has_pose: u8 = parse_token(parts.get(cursor + 2)?)?;
        cursor += 3;
        let sensor_from_rig = if has_pose != 0 {
            let mut pose = [0.0; 7];
            for v in pose.iter_mut() {
                *v = parse_token(parts.get(cursor)?)?;
                cursor += 1;
            }
            Some(pose)
        } else {
            None
        };
        sensors.push(RigSensor { sensor, sensor_from_rig });
    }
    Some(Rig { rig_id, ref_sensor, sensors })
}

/// Parse a rigs text document. Malformed lines are skipped.
pub fn parse_rigs_txt(text: &str) -> BTreeMap<u32, Rig> {
    let mut rigs = BTreeMap::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_rig_line(line) {
            Some(rig) => {
                rigs.insert(rig.rig_id, rig);
            }
            None => warn!("skipping malformed rig record at line {}", lineno + 1),
        }
    }
    rigs
}

/// Format frames as text, in ascending id order.
pub fn format_frames_txt(frames: &BTreeMap<u32, Frame>) -> String {
    let mut out = String::new();
    out.push_str("# Frame list with two lines of data per frame:\n");
    out.push_str("#   FRAME_ID, RIG_ID, QW, QX, QY, QZ, TX, TY, TZ, NUM_DATA_IDS\n");
    out.push_str("#   DATA_IDS[] as (SENSOR_TYPE, SENSOR_ID, DATA_ID)\n");
    out.push_str(&format!("# Number of frames: {}\n", frames.len()));
    for frame in frames.values() {
        out.push_str(&format!("{} {}", frame.frame_id, frame.rig_id));
        for v in frame.rig_from_world {
            out.push(' ');
            out.push_str(&fmt_f64(v));
        }
        out.push_str(&format!(" {}\n", frame.data_ids.len()));
        let mut first = true;
        for (sensor, data_id) in &frame.data_ids {
            if !first {
                out.push(' ');
            }
            first = false;
            out.push_str(&format!(
                "{} {} {}",
                sensor.sensor_type as i32,
                sensor.id,
                data_id
            ));
        }
        out.push('\n');
    }
    out
}

fn parse_frame_lines(header: &str, payload: &str) -> Option<Frame> {
    let parts = header.split_whitespace().collect::<Vec<_>>();
    if parts.len() < 10 {
        return None;
    }
    let frame_id = parse_token(parts[0])?;
    let rig_id = parse_token(parts[1])?;
    let mut rig_from_world = [0.0; 7];
    for (v, part) in rig_from_world.iter_mut().zip(&parts[2..9]) {
        *v = parse_token(part)?;
    }
    let data_ids = payload
        .split_whitespace()
        .collect::<Vec<_>>()
        .chunks_exact(3)
        .map(|chunk| {
            Some((
                SensorId {
                    sensor_type: parse_sensor_type(chunk[0])?,
                    id: parse_token(chunk[1])?,
                },
                parse_token::<u64>(chunk[2])?,
            ))
        })
        .collect::<Option<Vec<_>>>()?;
    Some(Frame { frame_id, rig_id, rig_from_world, data_ids })
}

/// Parse a frames text document. Malformed records are skipped.
pub fn parse_frames_txt(text: &str) -> BTreeMap<u32, Frame> {
    let mut frames = BTreeMap::new();
    let mut lines = text.lines().enumerate();
    while let Some((lineno, line)) = lines.next() {
        let header = line.trim();
        if header.is_empty() || header.starts_with('#') {
            continue;
        }
        let payload = lines.next().map(|(_, l)| l).unwrap_or("");
        match parse_frame_lines(header, payload) {
            Some(frame) => {
                frames.insert(frame.frame_id, frame);
            }
            None => warn!("skipping malformed frame record at line {}", lineno + 1),
        }
    }
    frames
}

/// Read a cameras text file.
pub fn read_cameras_txt(path: impl AsRef<Path>) -> Result<BTreeMap<u32, Camera>, CodecError> {
    Ok(parse_cameras_txt(&std::fs::read_to_string(path)?))
}

/// Write a cameras text file.
pub fn write_cameras_txt(
    path: impl AsRef<Path>,
    cameras: &BTreeMap<u32, Camera>,
) -> Result<(), CodecError> {
    Ok(std::fs::write(path, format_cameras_txt(cameras))?)
}

/// Read an images text file.
pub fn read_images_txt(path: impl AsRef<Path>) -> Result<BTreeMap<u32, Image>, CodecError> {
    Ok(parse_images_txt(&std::fs::read_to_string(path)?))
}

/// Write an images text file.
pub fn write_images_txt(
    path: impl AsRef<Path>,
    images: &BTreeMap<u32, Image>,
) -> Result<(), CodecError> {
    Ok(std::fs::write(path, format_images_txt(images)?)?)
}

/// Read a points3D text file.
pub fn read_points3d_txt(path: impl AsRef<Path>) -> Result<BTreeMap<i64, Point3d>, CodecError> {
    Ok(parse_points3d_txt(&std::fs::read_to_string(path)?))
}

/// Write a points3D text file.
pub fn write_points3d_txt(
    path: impl AsRef<Path>,
    points: &BTreeMap<i64, Point3d>,
) -> Result<(), CodecError> {
    Ok(std::fs::write(path, format_points3d_txt(points))?)
}

/// Read a rigs text file.
pub fn read_rigs_txt(path: impl AsRef<Path>) -> Result<BTreeMap<u32, Rig>, CodecError> {
    Ok(parse_rigs_txt(&std::fs::read_to_string(path)?))
}

/// Write a rigs text file.
pub fn write_rigs_txt(path: impl AsRef<Path>, rigs: &BTreeMap<u32, Rig>) -> Result<(), CodecError> {
    Ok(std::fs::write(path, format_rigs_txt(rigs))?)
}

/// Read a frames text file.
pub fn read_frames_txt(path: impl AsRef<Path>) -> Result<BTreeMap<u32, Frame>, CodecError> {
    Ok(parse_frames_txt(&std::fs::read_to_string(path)?))
}

/// Write a frames text file.
pub fn write_frames_txt(
    path: impl AsRef<Path>,
    frames: &BTreeMap<u32, Frame>,
) -> Result<(), CodecError> {
    Ok(std::fs::write(path, format_frames_txt(frames))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recon_scene::INVALID_POINT3D_ID;

    #[test]
    fn parses_single_camera_line() {
        let text = "1 SIMPLE_PINHOLE 3072 2304 2559.81 1536 1152";
        let cameras = parse_cameras_txt(text);
        assert_eq!(cameras.len(), 1);
        let camera = &cameras[&1];
        assert_eq!(camera.model_id, CameraModelId::SimplePinhole);
        assert_eq!(camera.width, 3072);
        assert_eq!(camera.height, 2304);
        assert_eq!(camera.params, vec![2559.81, 1536.0, 1152.0]);
    }

    #[test]
    fn skips_comments_blanks_and_short_lines() {
        let text = "\
# Camera list with one line of data per camera:
#   CAMERA_ID, MODEL, WIDTH, HEIGHT, PARAMS[]

1 SIMPLE_PINHOLE 3072
2 NOT_A_MODEL 100 100 1 2 3
3 PINHOLE 640 480 500 500 320 240
";
        let cameras = parse_cameras_txt(text);
        assert_eq!(cameras.len(), 1);
        assert!(cameras.contains_key(&3));
    }

    #[test]
    fn cameras_round_trip() {
        let mut cameras = BTreeMap::new();
        for id in [4u32, 2] {
            cameras.insert(
                id,
                Camera {
                    camera_id: id,
                    model_id: CameraModelId::Radial,
                    width: 1920,
                    height: 1080,
                    params: vec![1000.25, 960.0, 540.0, 0.1, -0.0125],
                },
            );
        }
        let text = format_cameras_txt(&cameras);
        assert_eq!(parse_cameras_txt(&text), cameras);
    }

    #[test]
    fn images_round_trip_including_empty_payload() {
        let mut images = BTreeMap::new();
        images.insert(
            2,
            Image {
                image_id: 2,
                rotation: [0.5, 0.5, -0.5, 0.5],
                translation: [0.1, -0.2, 0.3],
                camera_id: 1,
                name: "a/b.jpg".to_string(),
                points2d: vec![
                    Point2d { x: 1.5, y: 2.25, point3d_id: 9 },
                    Point2d { x: 3.0, y: 4.0, point3d_id: INVALID_POINT3D_ID },
                ],
                num_points2d: 2,
            },
        );
        images.insert(
            5,
            Image {
                image_id: 5,
                rotation: [1.0, 0.0, 0.0, 0.0],
                translation: [0.0, 0.0, 0.0],
                camera_id: 1,
                name: "c.jpg".to_string(),
                points2d: Vec::new(),
                num_points2d: 0,
            },
        );
        let text = format_images_txt(&images).unwrap();
        assert_eq!(parse_images_txt(&text), images);
    }

    #[test]
    fn image_names_keep_internal_whitespace() {
        let mut images = BTreeMap::new();
        images.insert(
            1,
            Image {
                image_id: 1,
                rotation: [1.0, 0.0, 0.0, 0.0],
                translation: [0.0, 0.0, 0.0],
                camera_id: 1,
                name: "scans/hall  east wing.jpg".to_string(),
                points2d: Vec::new(),
                num_points2d: 0,
            },
        );
        let text = format_images_txt(&images).unwrap();
        assert_eq!(parse_images_txt(&text), images);
    }

    #[test]
    fn images_without_materialized_observations_refuse_to_format() {
        let mut images = BTreeMap::new();
        images.insert(
            1,
            Image {
                image_id: 1,
                rotation: [1.0, 0.0, 0.0, 0.0],
                translation: [0.0, 0.0, 0.0],
                camera_id: 1,
                name: "x.jpg".to_string(),
                points2d: Vec::new(),
                // header count without a materialized payload, as left
                // behind by the lite binary parser
                num_points2d: 3,
            },
        );
        assert!(matches!(
            format_images_txt(&images),
            Err(CodecError::UnmaterializedObservations { image_id: 1, declared: 3, materialized: 0 })
        ));
    }

    #[test]
    fn unmatched_point3d_id_is_literal_minus_one() {
        let mut images = BTreeMap::new();
        images.insert(
            1,
            Image {
                image_id: 1,
                rotation: [1.0, 0.0, 0.0, 0.0],
                translation: [0.0, 0.0, 0.0],
                camera_id: 1,
                name: "x.jpg".to_string(),
                points2d: vec![Point2d { x: 7.0, y: 8.0, point3d_id: INVALID_POINT3D_ID }],
                num_points2d: 1,
            },
        );
        let text = format_images_txt(&images).unwrap();
        let payload = text.lines().last().unwrap();
        assert_eq!(payload, "7 8 -1");
    }

    #[test]
    fn records_are_emitted_in_ascending_id_order() {
        let mut cameras = BTreeMap::new();
        for id in [9u32, 2, 5] {
            cameras.insert(
                id,
                Camera {
                    camera_id: id,
                    model_id: CameraModelId::Pinhole,
                    width: 640,
                    height: 480,
                    params: vec![500.0, 500.0, 320.0, 240.0],
                },
            );
        }
        let camera_ids = format_cameras_txt(&cameras)
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(|line| line.split_whitespace().next().unwrap().parse::<u32>().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(camera_ids, vec![2, 5, 9]);

        let mut points = BTreeMap::new();
        for id in [7i64, -1, 3] {
            points.insert(
                id,
                Point3d {
                    point3d_id: id,
                    xyz: [0.0, 0.0, 0.0],
                    rgb: [0, 0, 0],
                    error: -1.0,
                    track: Vec::new(),
                },
            );
        }
        let point_ids = format_points3d_txt(&points)
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(|line| line.split_whitespace().next().unwrap().parse::<i64>().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(point_ids, vec![-1, 3, 7]);
    }

    #[test]
    fn points3d_round_trip() {
        let mut points = BTreeMap::new();
        points.insert(
            -0x7fff_ffff_ffff_fff0,
            Point3d {
                point3d_id: -0x7fff_ffff_ffff_fff0,
                xyz: [0.25, -1.5, 3.75],
                rgb: [12, 34, 56],
                error: -1.0,
                track: vec![TrackElement { image_id: 3, point2d_idx: 14 }],
            },
        );
        points.insert(
            8,
            Point3d {
                point3d_id: 8,
                xyz: [1.0, 2.0, 3.0],
                rgb: [255, 0, 255],
                error: 0.5,
                track: Vec::new(),
            },
        );
        let text = format_points3d_txt(&points);
        assert_eq!(parse_points3d_txt(&text), points);
    }

    #[test]
    fn rigs_and_frames_round_trip() {
        let mut rigs = BTreeMap::new();
        rigs.insert(
            1,
            Rig {
                rig_id: 1,
                ref_sensor: SensorId { sensor_type: SensorType::Camera, id: 1 },
                sensors: vec![
                    RigSensor {
                        sensor: SensorId { sensor_type: SensorType::Camera, id: 2 },
                        sensor_from_rig: Some([1.0, 0.0, 0.0, 0.0, 0.05, 0.0, 0.0]),
                    },
                    RigSensor {
                        sensor: SensorId { sensor_type: SensorType::Imu, id: 1 },
                        sensor_from_rig: None,
                    },
                ],
            },
        );
        let text = format_rigs_txt(&rigs);
        assert_eq!(parse_rigs_txt(&text), rigs);

        let mut frames = BTreeMap::new();
        frames.insert(
            3,
            Frame {
                frame_id: 3,
                rig_id: 1,
                rig_from_world: [0.5, 0.5, 0.5, 0.5, 1.0, 2.0, 3.0],
                data_ids: vec![(SensorId { sensor_type: SensorType::Camera, id: 1 }, 42)],
            },
        );
        let text = format_frames_txt(&frames);
        assert_eq!(parse_frames_txt(&text), frames);
    }
}
