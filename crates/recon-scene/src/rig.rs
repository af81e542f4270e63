use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Kind of sensor mounted on a rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorType {
    /// Placeholder for unreadable sensor records.
    Invalid = -1,
    /// A camera sensor; its data ids are image ids.
    Camera = 0,
    /// An inertial measurement unit.
    Imu = 1,
}

impl SensorType {
    /// Look up a sensor type by its numeric id.
    pub fn from_id(id: i32) -> Result<Self, SceneError> {
        match id {
            -1 => Ok(Self::Invalid),
            0 => Ok(Self::Camera),
            1 => Ok(Self::Imu),
            _ => Err(SceneError::UnknownSensorType(id)),
        }
    }
}

/// Unique sensor identifier within a reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorId {
    /// Sensor kind.
    pub sensor_type: SensorType,
    /// Id within the kind; equals the camera id for camera sensors.
    pub id: u32,
}

/// A non-reference sensor on a rig with its optional mounting pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigSensor {
    /// The sensor.
    pub sensor: SensorId,
    /// Sensor-from-rig pose (qw, qx, qy, qz, tx, ty, tz), if calibrated.
    pub sensor_from_rig: Option<[f64; 7]>,
}

/// A rigid grouping of sensors under one reference sensor.
///
/// The reference sensor carries an implicit identity pose and is not
/// repeated in `sensors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rig {
    /// Rig id.
    pub rig_id: u32,
    /// The reference sensor.
    pub ref_sensor: SensorId,
    /// All non-reference sensors.
    pub sensors: Vec<RigSensor>,
}

impl Rig {
    /// Total number of sensors, reference included.
    pub fn num_sensors(&self) -> usize {
        self.sensors.len() + 1
    }
}

/// One synchronized capture instant of a rig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Frame id.
    pub frame_id: u32,
    /// Id of the captured rig.
    pub rig_id: u32,
    /// Rig-from-world pose (qw, qx, qy, qz, tx, ty, tz).
    pub rig_from_world: [f64; 7],
    /// Captured data id per sensor; image id for camera sensors.
    pub data_ids: Vec<(SensorId, u64)>,
}
