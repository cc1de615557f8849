use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControlError {
    #[error("Invalid mesh type: expected one of [square, hexagonal], got {0}")]
    InvalidMeshType(String),

    #[error("Invalid control algorithm: expected one of [euclidean, kinematic_pursuit], got {0}")]
    InvalidAlgorithm(String),

    #[error("Expected xpoints to be in range [{min}, {max}], got {found}")]
    MeshResolution { found: usize, min: usize, max: usize },

    #[error("Invalid max acceleration: {0} (must be finite and > 0)")]
    InvalidAcceleration(f64),

    #[error("Invalid pitch: {0}")]
    InvalidPitch(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid position series: {0}")]
    InvalidSeries(String),

    #[error("Frame count mismatch: first group has {first} frames, second group has {second}")]
    FrameMismatch { first: usize, second: usize },

    #[error("Model not fitted: call fit() before querying {0}")]
    NotFitted(&'static str),

    #[error("Frame {frame} out of range for {frames} fitted frames")]
    FrameOutOfRange { frame: usize, frames: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ControlError {
    /// Raised while building a model, before any data is touched.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ControlError::InvalidMeshType(_)
                | ControlError::InvalidAlgorithm(_)
                | ControlError::MeshResolution { .. }
                | ControlError::InvalidAcceleration(_)
                | ControlError::InvalidPitch(_)
                | ControlError::InvalidConfig(_)
        )
    }

    /// Raised by `fit` when the supplied series violate the input contract.
    pub fn is_input_contract(&self) -> bool {
        matches!(self, ControlError::InvalidSeries(_) | ControlError::FrameMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, ControlError>;
