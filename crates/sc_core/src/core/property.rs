//! Time series of derived per-player and per-team values.

use ndarray::{s, Array1, Array2, ArrayView1};
use serde::Serialize;

/// One value per player per frame, shape `(T, N)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProperty {
    pub property: Array2<f64>,
    pub name: String,
    pub framerate: Option<u32>,
}

/// One value per frame for a whole team, shape `(T,)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamProperty {
    pub property: Array1<f64>,
    pub name: String,
    pub framerate: Option<u32>,
}

impl PlayerProperty {
    pub fn new(property: Array2<f64>, name: impl Into<String>, framerate: Option<u32>) -> Self {
        Self { property, name: name.into(), framerate }
    }

    pub fn len(&self) -> usize {
        self.property.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.property.nrows() == 0
    }

    pub fn n_players(&self) -> usize {
        self.property.ncols()
    }

    pub fn frame(&self, t: usize) -> ArrayView1<'_, f64> {
        self.property.row(t)
    }

    pub fn player(&self, i: usize) -> ArrayView1<'_, f64> {
        self.property.column(i)
    }

    /// Copy restricted to frames `start..end` (clamped).
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.len());
        let start = start.min(end);
        Self {
            property: self.property.slice(s![start..end, ..]).to_owned(),
            name: self.name.clone(),
            framerate: self.framerate,
        }
    }
}

impl TeamProperty {
    pub fn new(property: Array1<f64>, name: impl Into<String>, framerate: Option<u32>) -> Self {
        Self { property, name: name.into(), framerate }
    }

    pub fn len(&self) -> usize {
        self.property.len()
    }

    pub fn is_empty(&self) -> bool {
        self.property.is_empty()
    }

    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.len());
        let start = start.min(end);
        Self {
            property: self.property.slice(s![start..end]).to_owned(),
            name: self.name.clone(),
            framerate: self.framerate,
        }
    }
}

impl std::fmt::Display for PlayerProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PlayerProperty '{}' {:?}", self.name, self.property.shape())
    }
}

impl std::fmt::Display for TeamProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TeamProperty '{}' ({} frames)", self.name, self.len())
    }
}
