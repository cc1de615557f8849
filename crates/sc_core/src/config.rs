//! # Model Configuration
//!
//! All construction parameters of a space control model in one serde
//! document.
//!
//! ```rust
//! use sc_core::config::SpaceControlConfig;
//!
//! let config = SpaceControlConfig::default();
//! let pursuit = SpaceControlConfig::kinematic();
//! assert!(config.validate().is_ok() && pursuit.validate().is_ok());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, Result};
use crate::models::aggregate::EmptyFramePolicy;
use crate::models::assignment::{ControlAlgorithm, DEFAULT_MAX_ACCELERATION};
use crate::models::mesh::{validate_xpoints, MeshType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceControlConfig {
    /// Mesh cell layout (default: square)
    pub mesh: MeshType,
    /// Mesh columns, in [10, 1000] (default: 100)
    pub xpoints: usize,
    /// Control assignment rule (default: euclidean)
    pub algorithm: ControlAlgorithm,
    /// Acceleration bound for the pursuit rule (default: 4.0)
    pub max_acceleration: f64,
    /// Reporting for frames without any observed agent (default: zero)
    pub empty_frames: EmptyFramePolicy,
    /// Label frames on the rayon pool (default: true)
    pub parallel: bool,
}

impl Default for SpaceControlConfig {
    fn default() -> Self {
        Self {
            mesh: MeshType::Square,
            xpoints: 100,
            algorithm: ControlAlgorithm::Euclidean,
            max_acceleration: DEFAULT_MAX_ACCELERATION,
            empty_frames: EmptyFramePolicy::Zero,
            parallel: true,
        }
    }
}

impl SpaceControlConfig {
    /// Arrival-time control on the default mesh.
    pub fn kinematic() -> Self {
        Self { algorithm: ControlAlgorithm::KinematicPursuit, ..Self::default() }
    }

    /// Cheapest mesh allowed, for previews and tests.
    pub fn coarse() -> Self {
        Self { xpoints: 10, ..Self::default() }
    }

    pub fn with_mesh(mut self, mesh: MeshType) -> Self {
        self.mesh = mesh;
        self
    }

    pub fn with_xpoints(mut self, xpoints: usize) -> Self {
        self.xpoints = xpoints;
        self
    }

    pub fn with_algorithm(mut self, algorithm: ControlAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_max_acceleration(mut self, max_acceleration: f64) -> Self {
        self.max_acceleration = max_acceleration;
        self
    }

    pub fn with_empty_frames(mut self, policy: EmptyFramePolicy) -> Self {
        self.empty_frames = policy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_xpoints(self.xpoints)?;
        if !self.max_acceleration.is_finite() || self.max_acceleration <= 0.0 {
            return Err(ControlError::InvalidAcceleration(self.max_acceleration));
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ControlError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = SpaceControlConfig::default();
        assert_eq!(cfg.mesh, MeshType::Square);
        assert_eq!(cfg.xpoints, 100);
        assert_eq!(cfg.algorithm, ControlAlgorithm::Euclidean);
        assert!((cfg.max_acceleration - 4.0).abs() < f64::EPSILON);
        assert_eq!(cfg.empty_frames, EmptyFramePolicy::Zero);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert!(SpaceControlConfig::kinematic().algorithm.needs_velocity());
        assert_eq!(SpaceControlConfig::coarse().xpoints, 10);
    }

    #[test]
    fn test_validate_ranges() {
        assert!(SpaceControlConfig::default().with_xpoints(9).validate().is_err());
        assert!(SpaceControlConfig::default().with_xpoints(1001).validate().is_err());
        assert!(SpaceControlConfig::default().with_xpoints(1000).validate().is_ok());

        let err = SpaceControlConfig::default().with_max_acceleration(0.0).validate().unwrap_err();
        assert!(matches!(err, ControlError::InvalidAcceleration(_)));
        assert!(SpaceControlConfig::default()
            .with_max_acceleration(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let cfg = SpaceControlConfig::from_json(
            r#"{"mesh": "hexagonal", "algorithm": "kinematic_pursuit", "max_acceleration": 3.5}"#,
        )
        .unwrap();
        assert_eq!(cfg.mesh, MeshType::Hexagonal);
        assert_eq!(cfg.algorithm, ControlAlgorithm::KinematicPursuit);
        assert_eq!(cfg.xpoints, 100);
        assert!(cfg.parallel);
    }

    #[test]
    fn test_from_json_rejects_unknown_mesh() {
        let err = SpaceControlConfig::from_json(r#"{"mesh": "triangular"}"#).unwrap_err();
        assert!(err.is_configuration());
        let err = SpaceControlConfig::from_json(r#"{"xpoints": 5}"#).unwrap_err();
        assert!(matches!(err, ControlError::MeshResolution { found: 5, .. }));
    }

    #[test]
    fn test_json_roundtrip_through_file() {
        let cfg = SpaceControlConfig::kinematic()
            .with_mesh(MeshType::Hexagonal)
            .with_empty_frames(EmptyFramePolicy::Missing);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(cfg.to_json().unwrap().as_bytes()).unwrap();

        let loaded = SpaceControlConfig::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SpaceControlConfig::from_json_file("/nonexistent/space_control.json").unwrap_err();
        assert!(matches!(err, ControlError::Io(_)));
    }
}
