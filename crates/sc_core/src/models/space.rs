//! Discretized space control.
//!
//! A mesh is spanned over the pitch once, at construction. [`SpaceControlModel::fit`]
//! labels every mesh point at every frame with the agent controlling it; the
//! label volume can then be reduced to player and team control percentages
//! as often as needed.
//!
//! ```rust
//! use sc_core::config::SpaceControlConfig;
//! use sc_core::core::{Pitch, PositionSeries, Unit};
//! use sc_core::models::space::SpaceControlModel;
//!
//! let pitch = Pitch::new((0.0, 100.0), (0.0, 100.0), Unit::Meters);
//! let mut model = SpaceControlModel::new(pitch, SpaceControlConfig::coarse()).unwrap();
//!
//! let home = PositionSeries::from_points(&[vec![(10.0, 10.0)]], Some(25)).unwrap();
//! let away = PositionSeries::from_points(&[vec![(90.0, 90.0)]], Some(25)).unwrap();
//! model.fit(&home, &away).unwrap();
//!
//! let (home_control, away_control) = model.team_controls().unwrap();
//! assert_eq!(home_control.property[0] + away_control.property[0], 100.0);
//! ```

use ndarray::{Array3, ArrayView2, Axis};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::aggregate::{CellControls, EmptyFramePolicy};
use super::assignment::{assign_frame, AgentSnapshot, ControlAlgorithm, ControlRule};
use super::kinematics::velocity;
use super::mesh::{Mesh, MeshType};
use crate::config::SpaceControlConfig;
use crate::core::pitch::Pitch;
use crate::core::property::{PlayerProperty, TeamProperty};
use crate::core::xy::{PositionSeries, VelocitySeries};
use crate::error::{ControlError, Result};

/// Outcome of a successful fit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FitSummary {
    pub frames: usize,
    /// Agents per group `(first, second)`
    pub agents: (usize, usize),
    /// Frames where no agent had a usable position
    pub undecided_frames: usize,
    /// Observed points outside the pitch, per group
    pub out_of_bounds: (usize, usize),
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSnapshot {
    pub frame: usize,
    pub mesh_type: MeshType,
    /// `(rows, cols)`
    pub shape: (usize, usize),
    /// Square: `(width, height)`. Hexagonal: `(radius, radius)`.
    pub cell_size: (f64, f64),
    /// Row-major mesh points
    pub points: Vec<(f64, f64)>,
    /// Row-major controlling agent per point
    pub labels: Vec<Option<u32>>,
    /// Agents per group `(first, second)`
    pub agents: (usize, usize),
}

impl ControlSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone)]
pub struct SpaceControlModel {
    pitch: Pitch,
    config: SpaceControlConfig,
    mesh: Mesh,
    controls: Option<CellControls>,
}

impl SpaceControlModel {
    /// Validate the configuration and build the mesh.
    pub fn new(pitch: Pitch, config: SpaceControlConfig) -> Result<Self> {
        config.validate()?;
        pitch.validate()?;
        if !pitch.is_metrical() {
            warn!(
                "Model initialized with non-metrical pitch ({:?}). Results may be distorted.",
                pitch.unit
            );
        }
        let mesh = Mesh::generate(&pitch, config.mesh, config.xpoints)?;
        Ok(Self { pitch, config, mesh, controls: None })
    }

    pub fn pitch(&self) -> &Pitch {
        &self.pitch
    }

    pub fn config(&self) -> &SpaceControlConfig {
        &self.config
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn is_fitted(&self) -> bool {
        self.controls.is_some()
    }

    /// Label every mesh point at every frame. Replaces any previous fit.
    ///
    /// On error the previous fit is left untouched.
    pub fn fit(&mut self, xy1: &PositionSeries, xy2: &PositionSeries) -> Result<FitSummary> {
        if xy1.len() != xy2.len() {
            return Err(ControlError::FrameMismatch { first: xy1.len(), second: xy2.len() });
        }

        let xy1 = xy1.sanitized();
        let xy2 = xy2.sanitized();
        let out_of_bounds = (self.warn_out_of_bounds(&xy1, 1), self.warn_out_of_bounds(&xy2, 2));

        let velocities = self
            .config
            .algorithm
            .needs_velocity()
            .then(|| (velocity(&xy1), velocity(&xy2)));

        let labels = self.label_volume(&xy1, &xy2, velocities.as_ref());
        let controls = CellControls::new(labels, xy1.n_agents(), xy2.n_agents(), xy1.framerate);

        let summary = FitSummary {
            frames: controls.n_frames(),
            agents: controls.group_sizes(),
            undecided_frames: controls.undecided_frames(),
            out_of_bounds,
        };
        if summary.undecided_frames > 0 {
            debug!("{} frame(s) without any observed agent", summary.undecided_frames);
        }
        info!(
            "Fitted {} control over {} frames, {}+{} agents, {}x{} {} mesh",
            self.config.algorithm,
            summary.frames,
            summary.agents.0,
            summary.agents.1,
            self.mesh.rows(),
            self.mesh.cols(),
            self.mesh.mesh_type()
        );

        self.controls = Some(controls);
        Ok(summary)
    }

    fn warn_out_of_bounds(&self, xy: &PositionSeries, group: u8) -> usize {
        let count = xy.count_out_of_bounds(&self.pitch);
        if count > 0 {
            warn!(
                "Group {}: {} position(s) outside pitch bounds x={:?} y={:?}; control computed as given",
                group, count, self.pitch.xlim, self.pitch.ylim
            );
        }
        count
    }

    fn label_volume(
        &self,
        xy1: &PositionSeries,
        xy2: &PositionSeries,
        velocities: Option<&(VelocitySeries, VelocitySeries)>,
    ) -> Array3<Option<u32>> {
        let (rows, cols) = self.mesh.shape();
        let mut labels = Array3::from_elem((xy1.len(), rows, cols), None);
        let rule = ControlRule::new(self.config.algorithm, self.config.max_acceleration);

        let snapshot = |t: usize| match velocities {
            Some((v1, v2)) => AgentSnapshot::from_frame_with_velocities(xy1, xy2, v1, v2, t),
            None => AgentSnapshot::from_frame(xy1, xy2, t),
        };

        // each frame slab is written by exactly one task
        if self.config.parallel {
            labels
                .axis_iter_mut(Axis(0))
                .into_par_iter()
                .enumerate()
                .for_each(|(t, slab)| assign_frame(&rule, &self.mesh, &snapshot(t), slab));
        } else {
            for (t, slab) in labels.axis_iter_mut(Axis(0)).enumerate() {
                assign_frame(&rule, &self.mesh, &snapshot(t), slab);
            }
        }
        labels
    }

    /// The fitted label volume.
    pub fn cell_controls(&self) -> Result<&CellControls> {
        self.controls.as_ref().ok_or(ControlError::NotFitted("cell_controls"))
    }

    /// Labels of one frame, shaped like the mesh.
    pub fn controls_at(&self, t: usize) -> Result<ArrayView2<'_, Option<u32>>> {
        let controls = self.controls.as_ref().ok_or(ControlError::NotFitted("controls_at"))?;
        controls
            .frame(t)
            .ok_or(ControlError::FrameOutOfRange { frame: t, frames: controls.n_frames() })
    }

    /// Percentage of mesh cells controlled by each player of both teams.
    pub fn player_controls(&self) -> Result<(PlayerProperty, PlayerProperty)> {
        let controls = self.controls.as_ref().ok_or(ControlError::NotFitted("player_controls"))?;
        Ok(controls.player_controls(self.config.empty_frames))
    }

    /// Percentage of mesh cells controlled by each team.
    pub fn team_controls(&self) -> Result<(TeamProperty, TeamProperty)> {
        let controls = self.controls.as_ref().ok_or(ControlError::NotFitted("team_controls"))?;
        Ok(controls.team_controls(self.config.empty_frames))
    }

    pub fn empty_frame_policy(&self) -> EmptyFramePolicy {
        self.config.empty_frames
    }

    pub fn algorithm(&self) -> ControlAlgorithm {
        self.config.algorithm
    }

    /// Mesh geometry and labels of frame `t` for external rendering.
    pub fn snapshot(&self, t: usize) -> Result<ControlSnapshot> {
        let frame = self.controls_at(t)?;
        let controls = self.cell_controls()?;
        Ok(ControlSnapshot {
            frame: t,
            mesh_type: self.mesh.mesh_type(),
            shape: self.mesh.shape(),
            cell_size: self.mesh.cell_size(),
            points: self.mesh.points().collect(),
            labels: frame.iter().copied().collect(),
            agents: controls.group_sizes(),
        })
    }
}
