//! Sampling mesh spanning the pitch.
//!
//! ## Layouts
//! - **Square**: `xpoints` columns of square cells, points at cell centers.
//! - **Hexagonal**: points on a brick lattice where every odd row is shifted
//!   right by half a column spacing, giving each interior point six
//!   equidistant neighbours.
//!
//! Rows run from `y_max` down to `y_min` (top row first), columns from
//! `x_min` to `x_max`. Label volumes are indexed in this order.

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::pitch::Pitch;
use crate::error::{ControlError, Result};

/// Allowed range for the number of mesh columns.
pub const MIN_XPOINTS: usize = 10;
pub const MAX_XPOINTS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshType {
    #[default]
    Square,
    Hexagonal,
}

impl MeshType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeshType::Square => "square",
            MeshType::Hexagonal => "hexagonal",
        }
    }
}

impl fmt::Display for MeshType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeshType {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "square" => Ok(MeshType::Square),
            "hexagonal" => Ok(MeshType::Hexagonal),
            other => Err(ControlError::InvalidMeshType(other.to_string())),
        }
    }
}

/// Fixed lattice of sample points plus the cell footprint size.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    mesh_type: MeshType,
    /// x coordinate per (row, col)
    x: Array2<f64>,
    /// y coordinate per (row, col)
    y: Array2<f64>,
    /// Square: full cell width. Hexagonal: circumradius.
    xpolysize: f64,
    /// Square: full cell height. Hexagonal: circumradius.
    ypolysize: f64,
}

pub fn validate_xpoints(xpoints: usize) -> Result<()> {
    if !(MIN_XPOINTS..=MAX_XPOINTS).contains(&xpoints) {
        return Err(ControlError::MeshResolution {
            found: xpoints,
            min: MIN_XPOINTS,
            max: MAX_XPOINTS,
        });
    }
    Ok(())
}

impl Mesh {
    /// Build the lattice for `pitch`. Fails on an out-of-range `xpoints` or
    /// degenerate pitch bounds.
    pub fn generate(pitch: &Pitch, mesh_type: MeshType, xpoints: usize) -> Result<Self> {
        validate_xpoints(xpoints)?;
        pitch.validate()?;

        let mesh = match mesh_type {
            MeshType::Square => Self::square(pitch, xpoints),
            MeshType::Hexagonal => Self::hexagonal(pitch, xpoints),
        };
        debug!(
            "Generated {} mesh {}x{} (cell {:.4} x {:.4})",
            mesh_type,
            mesh.rows(),
            mesh.cols(),
            mesh.xpolysize,
            mesh.ypolysize
        );
        Ok(mesh)
    }

    fn square(pitch: &Pitch, xpoints: usize) -> Self {
        let (xmin, xmax) = pitch.xlim;
        let (ymin, ymax) = pitch.ylim;

        let xpolysize = (xmax - xmin) / xpoints as f64;
        // regular cells: derive row count from the cell width, then re-fit the
        // height to remove rounding drift
        let ypoints = (((ymax - ymin) / xpolysize).round_ties_even() as usize).max(1);
        let ypolysize = (ymax - ymin) / ypoints as f64;

        let xpad = xpolysize * 0.5;
        let ypad = ypolysize * 0.5;
        let xs = linspace(xmin + xpad, xmax - xpad, xpoints);
        let ys = linspace(ymax - ypad, ymin + ypad, ypoints);
        let (x, y) = meshgrid(&xs, &ys);

        Self { mesh_type: MeshType::Square, x, y, xpolysize, ypolysize }
    }

    fn hexagonal(pitch: &Pitch, xpoints: usize) -> Self {
        let (xmin, xmax) = pitch.xlim;
        let (ymin, ymax) = pitch.ylim;

        // longitudinal spacing, leaving half a cell out of bounds
        let xspace = (xmax - xmin) / (xpoints as f64 - 0.5);
        let radius = xspace / 3f64.sqrt();
        let yspace = radius * 1.5;
        let xpad = xspace * 0.5;

        let ypoints = ((ymax - ymin) / yspace).round_ties_even() as usize + 1;

        let xs = linspace(xmin, xmax - xpad, xpoints);
        let ys = linspace(ymax, ymin, ypoints);
        let (mut x, y) = meshgrid(&xs, &ys);
        for (r, mut row) in x.rows_mut().into_iter().enumerate() {
            if r % 2 == 1 {
                row += xpad;
            }
        }

        Self { mesh_type: MeshType::Hexagonal, x, y, xpolysize: radius, ypolysize: radius }
    }

    pub fn mesh_type(&self) -> MeshType {
        self.mesh_type
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.x.dim()
    }

    pub fn rows(&self) -> usize {
        self.x.nrows()
    }

    pub fn cols(&self) -> usize {
        self.x.ncols()
    }

    pub fn n_cells(&self) -> usize {
        self.x.len()
    }

    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array2<f64> {
        &self.y
    }

    /// `(width, height)` for square cells, `(radius, radius)` for hexagons.
    pub fn cell_size(&self) -> (f64, f64) {
        (self.xpolysize, self.ypolysize)
    }

    pub fn point(&self, row: usize, col: usize) -> (f64, f64) {
        (self.x[[row, col]], self.y[[row, col]])
    }

    /// Points in row-major order (same order as a flattened label frame).
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Evenly spaced values over `[start, stop]`, endpoint included.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = stop;
            values
        }
    }
}

fn meshgrid(xs: &[f64], ys: &[f64]) -> (Array2<f64>, Array2<f64>) {
    let shape = (ys.len(), xs.len());
    let x = Array2::from_shape_fn(shape, |(_, c)| xs[c]);
    let y = Array2::from_shape_fn(shape, |(r, _)| ys[r]);
    (x, y)
}
