//! Reduction of the cell-control volume into control percentages.

use ndarray::{Array1, Array2, Array3, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::core::property::{PlayerProperty, TeamProperty};

pub const PROPERTY_NAME: &str = "space control";

/// What to report for a frame in which no cell has a controlling agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyFramePolicy {
    /// Every agent and team controls 0 %
    #[default]
    Zero,
    /// Every agent and team reports `NaN`
    Missing,
}

/// Fitted `(frame, row, col)` labels plus the group sizes they refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct CellControls {
    labels: Array3<Option<u32>>,
    n1: usize,
    n2: usize,
    framerate: Option<u32>,
}

impl CellControls {
    pub fn new(labels: Array3<Option<u32>>, n1: usize, n2: usize, framerate: Option<u32>) -> Self {
        Self { labels, n1, n2, framerate }
    }

    pub fn labels(&self) -> &Array3<Option<u32>> {
        &self.labels
    }

    /// Labels of frame `t`, shaped like the mesh.
    pub fn frame(&self, t: usize) -> Option<ArrayView2<'_, Option<u32>>> {
        (t < self.n_frames()).then(|| self.labels.index_axis(Axis(0), t))
    }

    pub fn n_frames(&self) -> usize {
        self.labels.len_of(Axis(0))
    }

    pub fn n_cells(&self) -> usize {
        let (_, rows, cols) = self.labels.dim();
        rows * cols
    }

    /// `(first group, second group)`
    pub fn group_sizes(&self) -> (usize, usize) {
        (self.n1, self.n2)
    }

    pub fn framerate(&self) -> Option<u32> {
        self.framerate
    }

    /// Frames where no cell is controlled.
    pub fn undecided_frames(&self) -> usize {
        self.labels
            .outer_iter()
            .filter(|frame| frame.iter().all(Option::is_none))
            .count()
    }

    /// Cells controlled per agent per frame, shape `(T, n1 + n2)`.
    pub fn counts(&self) -> Array2<usize> {
        let mut counts = Array2::<usize>::zeros((self.n_frames(), self.n1 + self.n2));
        for (frame, mut row) in self.labels.outer_iter().zip(counts.outer_iter_mut()) {
            for label in frame.iter().flatten() {
                if let Some(slot) = row.get_mut(*label as usize) {
                    *slot += 1;
                }
            }
        }
        counts
    }

    /// Percentage of cells controlled by each player, one property per team.
    pub fn player_controls(&self, policy: EmptyFramePolicy) -> (PlayerProperty, PlayerProperty) {
        let counts = self.counts();
        let empty = self.empty_mask();
        let total = self.n_cells();

        let to_percent = |cols: ArrayView2<'_, usize>| {
            let mut pct = cols.mapv(|c| percentage(c, total));
            apply_policy(&mut pct, &empty, policy);
            pct
        };
        let first = to_percent(counts.slice(ndarray::s![.., ..self.n1]));
        let second = to_percent(counts.slice(ndarray::s![.., self.n1..]));

        (
            PlayerProperty::new(first, PROPERTY_NAME, self.framerate),
            PlayerProperty::new(second, PROPERTY_NAME, self.framerate),
        )
    }

    /// Percentage of cells controlled by each team.
    ///
    /// Team shares are computed from summed cell counts, not from rounded
    /// player percentages.
    pub fn team_controls(&self, policy: EmptyFramePolicy) -> (TeamProperty, TeamProperty) {
        let counts = self.counts();
        let empty = self.empty_mask();
        let total = self.n_cells();

        let team = |range: std::ops::Range<usize>| -> Array1<f64> {
            counts
                .outer_iter()
                .zip(empty.iter())
                .map(|(row, &is_empty)| {
                    if is_empty && policy == EmptyFramePolicy::Missing {
                        f64::NAN
                    } else {
                        percentage(row.slice(ndarray::s![range.clone()]).sum(), total)
                    }
                })
                .collect()
        };

        (
            TeamProperty::new(team(0..self.n1), PROPERTY_NAME, self.framerate),
            TeamProperty::new(team(self.n1..self.n1 + self.n2), PROPERTY_NAME, self.framerate),
        )
    }

    fn empty_mask(&self) -> Vec<bool> {
        self.labels
            .outer_iter()
            .map(|frame| frame.iter().all(Option::is_none))
            .collect()
    }
}

fn apply_policy(pct: &mut Array2<f64>, empty: &[bool], policy: EmptyFramePolicy) {
    if policy == EmptyFramePolicy::Zero {
        return;
    }
    for (mut row, &is_empty) in pct.outer_iter_mut().zip(empty) {
        if is_empty {
            row.fill(f64::NAN);
        }
    }
}

/// `100 · count / total`, rounded half-to-even at two decimals.
fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(100.0 * count as f64 / total as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
