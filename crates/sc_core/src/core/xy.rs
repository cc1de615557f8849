//! Spatio-temporal tracking data.
//!
//! Layout: one row per frame, each agent occupying two consecutive columns
//! `(x, y)`. Missing observations are `NaN`.

use nalgebra::Vector2;
use ndarray::{s, Array2, ArrayView1, ArrayView2, Axis};

use super::pitch::Pitch;
use crate::error::{ControlError, Result};

/// Per-frame positions of one group of agents.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSeries {
    xy: Array2<f64>,
    /// Frames per second, if known
    pub framerate: Option<u32>,
}

impl PositionSeries {
    /// Wrap a `(T, 2N)` array. Odd column counts are rejected.
    pub fn new(xy: Array2<f64>, framerate: Option<u32>) -> Result<Self> {
        if xy.ncols() % 2 != 0 {
            return Err(ControlError::InvalidSeries(format!(
                "expected an even number of columns (x, y per agent), got {}",
                xy.ncols()
            )));
        }
        Ok(Self { xy, framerate })
    }

    /// Build from per-frame point lists. Every frame needs the same agent count.
    pub fn from_points(frames: &[Vec<(f64, f64)>], framerate: Option<u32>) -> Result<Self> {
        let n = frames.first().map_or(0, |f| f.len());
        let mut xy = Array2::from_elem((frames.len(), n * 2), f64::NAN);
        for (t, frame) in frames.iter().enumerate() {
            if frame.len() != n {
                return Err(ControlError::InvalidSeries(format!(
                    "frame {} has {} agents, frame 0 has {}",
                    t,
                    frame.len(),
                    n
                )));
            }
            for (i, &(x, y)) in frame.iter().enumerate() {
                xy[[t, 2 * i]] = x;
                xy[[t, 2 * i + 1]] = y;
            }
        }
        Ok(Self { xy, framerate })
    }

    pub fn len(&self) -> usize {
        self.xy.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.xy.nrows() == 0
    }

    pub fn n_agents(&self) -> usize {
        self.xy.ncols() / 2
    }

    pub fn xy(&self) -> ArrayView2<'_, f64> {
        self.xy.view()
    }

    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.xy.slice(s![.., ..;2])
    }

    pub fn y(&self) -> ArrayView2<'_, f64> {
        self.xy.slice(s![.., 1..;2])
    }

    /// Raw row for frame `t`.
    pub fn frame(&self, t: usize) -> ArrayView1<'_, f64> {
        self.xy.row(t)
    }

    /// Position of agent `i` at frame `t`; `None` if either coordinate is missing.
    pub fn point(&self, t: usize, i: usize) -> Option<Vector2<f64>> {
        let x = self.xy[[t, 2 * i]];
        let y = self.xy[[t, 2 * i + 1]];
        if x.is_nan() || y.is_nan() {
            None
        } else {
            Some(Vector2::new(x, y))
        }
    }

    /// Copy restricted to frames `start..end` (clamped to the series length).
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.len());
        let start = start.min(end);
        Self { xy: self.xy.slice(s![start..end, ..]).to_owned(), framerate: self.framerate }
    }

    /// Copy where a pair with one missing coordinate is fully missing.
    pub fn sanitized(&self) -> Self {
        let mut xy = self.xy.clone();
        for mut row in xy.axis_iter_mut(Axis(0)) {
            for i in 0..row.len() / 2 {
                if row[2 * i].is_nan() || row[2 * i + 1].is_nan() {
                    row[2 * i] = f64::NAN;
                    row[2 * i + 1] = f64::NAN;
                }
            }
        }
        Self { xy, framerate: self.framerate }
    }

    /// Number of observed points lying outside the pitch bounds.
    pub fn count_out_of_bounds(&self, pitch: &Pitch) -> usize {
        (0..self.len())
            .flat_map(|t| (0..self.n_agents()).map(move |i| (t, i)))
            .filter_map(|(t, i)| self.point(t, i))
            .filter(|p| !pitch.contains(p.x, p.y))
            .count()
    }
}

/// Per-frame velocities of one group, same layout as [`PositionSeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct VelocitySeries {
    vxy: Array2<f64>,
    pub framerate: Option<u32>,
}

impl VelocitySeries {
    pub fn new(vxy: Array2<f64>, framerate: Option<u32>) -> Result<Self> {
        if vxy.ncols() % 2 != 0 {
            return Err(ControlError::InvalidSeries(format!(
                "expected an even number of velocity columns, got {}",
                vxy.ncols()
            )));
        }
        Ok(Self { vxy, framerate })
    }

    /// Caller guarantees an even column count.
    pub(crate) fn from_parts(vxy: Array2<f64>, framerate: Option<u32>) -> Self {
        debug_assert!(vxy.ncols() % 2 == 0);
        Self { vxy, framerate }
    }

    /// All-zero velocities matching a position series.
    pub fn stationary(like: &PositionSeries) -> Self {
        Self { vxy: Array2::zeros(like.xy.raw_dim()), framerate: like.framerate }
    }

    pub fn len(&self) -> usize {
        self.vxy.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.vxy.nrows() == 0
    }

    pub fn n_agents(&self) -> usize {
        self.vxy.ncols() / 2
    }

    pub fn vxy(&self) -> ArrayView2<'_, f64> {
        self.vxy.view()
    }

    /// Velocity of agent `i` at frame `t`; missing components count as zero.
    pub fn get(&self, t: usize, i: usize) -> Vector2<f64> {
        let vx = self.vxy[[t, 2 * i]];
        let vy = self.vxy[[t, 2 * i + 1]];
        Vector2::new(
            if vx.is_nan() { 0.0 } else { vx },
            if vy.is_nan() { 0.0 } else { vy },
        )
    }
}
