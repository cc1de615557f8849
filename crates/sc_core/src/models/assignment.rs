//! Per-frame control assignment.
//!
//! Every mesh point is assigned to the agent with the lowest cost, where the
//! cost is either the straight-line distance ([`ControlAlgorithm::Euclidean`])
//! or the time needed to reach the point under bounded acceleration
//! ([`ControlAlgorithm::KinematicPursuit`]).
//!
//! Agents of both groups are indexed contiguously, group one first. Missing
//! agents never win a cell. Exact ties go to the lower agent index.

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector2;
use ndarray::ArrayViewMut2;
use serde::{Deserialize, Serialize};

use super::mesh::Mesh;
use crate::core::xy::{PositionSeries, VelocitySeries};
use crate::error::{ControlError, Result};

/// Default acceleration bound for the pursuit model (units / time²).
pub const DEFAULT_MAX_ACCELERATION: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAlgorithm {
    /// Nearest agent by Euclidean distance
    #[default]
    Euclidean,
    /// Soonest arrival accelerating from the current velocity
    KinematicPursuit,
}

impl ControlAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlAlgorithm::Euclidean => "euclidean",
            ControlAlgorithm::KinematicPursuit => "kinematic_pursuit",
        }
    }

    pub fn needs_velocity(&self) -> bool {
        matches!(self, ControlAlgorithm::KinematicPursuit)
    }
}

impl fmt::Display for ControlAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlAlgorithm {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "euclidean" => Ok(ControlAlgorithm::Euclidean),
            "kinematic_pursuit" => Ok(ControlAlgorithm::KinematicPursuit),
            other => Err(ControlError::InvalidAlgorithm(other.to_string())),
        }
    }
}

/// Cost function used to rank agents for a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlRule {
    NearestDistance,
    SoonestArrival { max_acceleration: f64 },
}

impl ControlRule {
    pub fn new(algorithm: ControlAlgorithm, max_acceleration: f64) -> Self {
        match algorithm {
            ControlAlgorithm::Euclidean => ControlRule::NearestDistance,
            ControlAlgorithm::KinematicPursuit => ControlRule::SoonestArrival { max_acceleration },
        }
    }

    /// Cost for one agent reaching `cell`; `f64::INFINITY` when unreachable.
    #[inline]
    pub fn cost(&self, position: &Vector2<f64>, velocity: &Vector2<f64>, cell: &Vector2<f64>) -> f64 {
        let d = cell - position;
        match *self {
            ControlRule::NearestDistance => d.norm(),
            ControlRule::SoonestArrival { max_acceleration } => {
                let distance = d.norm();
                if distance == 0.0 {
                    return 0.0;
                }
                let v_proj = velocity.dot(&(d / distance));
                arrival_time(distance, v_proj, max_acceleration)
            }
        }
    }
}

/// Smallest non-negative `t` with `distance = v_proj·t + ½·a·t²`.
///
/// Returns `0.0` for zero distance and `f64::INFINITY` when no non-negative
/// real root exists.
pub fn arrival_time(distance: f64, v_proj: f64, max_acceleration: f64) -> f64 {
    if distance == 0.0 {
        return 0.0;
    }
    let a = max_acceleration;
    let discriminant = v_proj * v_proj + 2.0 * a * distance;
    if discriminant.is_nan() || discriminant < 0.0 {
        return f64::INFINITY;
    }
    if a == 0.0 {
        // linear motion only
        return if v_proj > 0.0 { distance / v_proj } else { f64::INFINITY };
    }

    let root = discriminant.sqrt();
    [(-v_proj + root) / a, (-v_proj - root) / a]
        .into_iter()
        .filter(|t| t.is_finite() && *t >= 0.0)
        .fold(f64::INFINITY, f64::min)
}

/// Sanitized agent state of both groups at one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AgentSnapshot {
    positions: Vec<Option<Vector2<f64>>>,
    velocities: Vec<Vector2<f64>>,
}

impl AgentSnapshot {
    /// Stationary agents; `None` marks a missing position.
    pub fn new(positions: Vec<Option<Vector2<f64>>>) -> Self {
        let velocities = vec![Vector2::zeros(); positions.len()];
        Self { positions, velocities }
    }

    /// Velocities are matched by agent index; extra entries are ignored and
    /// absent ones count as zero.
    pub fn with_velocities(mut self, velocities: Vec<Vector2<f64>>) -> Self {
        for (slot, v) in self.velocities.iter_mut().zip(velocities) {
            *slot = v;
        }
        self
    }

    /// Agents of `xy1` followed by agents of `xy2` at frame `t`.
    pub fn from_frame(xy1: &PositionSeries, xy2: &PositionSeries, t: usize) -> Self {
        let positions = (0..xy1.n_agents())
            .map(|i| xy1.point(t, i))
            .chain((0..xy2.n_agents()).map(|i| xy2.point(t, i)))
            .collect();
        Self::new(positions)
    }

    pub fn from_frame_with_velocities(
        xy1: &PositionSeries,
        xy2: &PositionSeries,
        v1: &VelocitySeries,
        v2: &VelocitySeries,
        t: usize,
    ) -> Self {
        let velocities = (0..v1.n_agents())
            .map(|i| v1.get(t, i))
            .chain((0..v2.n_agents()).map(|i| v2.get(t, i)))
            .collect();
        Self::from_frame(xy1, xy2, t).with_velocities(velocities)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// At least one agent has a usable position.
    pub fn has_observations(&self) -> bool {
        self.positions.iter().any(Option::is_some)
    }
}

/// Controlling agent for a single cell, or `None` if no agent can reach it.
pub fn assign_cell(rule: &ControlRule, agents: &AgentSnapshot, cell: Vector2<f64>) -> Option<u32> {
    let mut best: Option<(u32, f64)> = None;
    for (i, (pos, vel)) in agents.positions.iter().zip(&agents.velocities).enumerate() {
        let Some(pos) = pos else { continue };
        let cost = rule.cost(pos, vel, &cell);
        if !cost.is_finite() {
            continue;
        }
        // strict comparison keeps the lower index on ties
        if best.map_or(true, |(_, c)| cost < c) {
            best = Some((i as u32, cost));
        }
    }
    best.map(|(i, _)| i)
}

/// Fill one `(rows, cols)` label frame for `mesh`.
pub fn assign_frame(
    rule: &ControlRule,
    mesh: &Mesh,
    agents: &AgentSnapshot,
    mut labels: ArrayViewMut2<'_, Option<u32>>,
) {
    if !agents.has_observations() {
        labels.fill(None);
        return;
    }
    for ((label, &x), &y) in labels.iter_mut().zip(mesh.x().iter()).zip(mesh.y().iter()) {
        *label = assign_cell(rule, agents, Vector2::new(x, y));
    }
}
