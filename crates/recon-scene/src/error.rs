/// Error types for the scene entities.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The parameter vector length does not match the camera model.
    #[error("camera model {model} expects {expected} parameters, got {got}")]
    CameraParamsMismatch {
        /// Camera model name.
        model: &'static str,
        /// Parameter count required by the model.
        expected: usize,
        /// Parameter count actually supplied.
        got: usize,
    },

    /// The camera model id is not part of the registry.
    #[error("unknown camera model id {0}")]
    UnknownModelId(i32),

    /// The camera model name is not part of the registry.
    #[error("unknown camera model name {0}")]
    UnknownModelName(String),

    /// The sensor type id is not part of the registry.
    #[error("unknown sensor type {0}")]
    UnknownSensorType(i32),
}
