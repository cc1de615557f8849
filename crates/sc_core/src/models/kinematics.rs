//! Velocity estimation from position series.
//!
//! Central differences in the interior, one-sided differences at both ends.
//! Scaled by the framerate when known (units per second), per frame otherwise.
//! No smoothing is applied.

use ndarray::{Array2, Axis};

use crate::core::xy::{PositionSeries, VelocitySeries};

pub fn velocity(xy: &PositionSeries) -> VelocitySeries {
    let data = xy.xy();
    let (frames, cols) = data.dim();
    let mut v = Array2::<f64>::zeros((frames, cols));

    if frames >= 2 {
        let first = &data.row(1) - &data.row(0);
        v.row_mut(0).assign(&first);
        let last = &data.row(frames - 1) - &data.row(frames - 2);
        v.row_mut(frames - 1).assign(&last);
        for t in 1..frames - 1 {
            let central = (&data.row(t + 1) - &data.row(t - 1)) * 0.5;
            v.row_mut(t).assign(&central);
        }
    }

    if let Some(rate) = xy.framerate {
        v.map_inplace(|d| *d *= rate as f64);
    }

    // sanitized input keeps velocity pairs consistent with position pairs
    for mut row in v.axis_iter_mut(Axis(0)) {
        for i in 0..cols / 2 {
            if row[2 * i].is_nan() || row[2 * i + 1].is_nan() {
                row[2 * i] = f64::NAN;
                row[2 * i + 1] = f64::NAN;
            }
        }
    }

    VelocitySeries::from_parts(v, xy.framerate)
}
