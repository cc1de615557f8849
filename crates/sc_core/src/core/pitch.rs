//! Pitch bounds, units and provider coordinate templates.
//!
//! A pitch only delimits the coordinate system the tracking data lives in.
//! The mesh is spanned over `xlim` × `ylim`; nothing is clamped to it.

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, Result};

/// Unit of measurement along both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Meters,
    Centimeters,
    /// Standardized 0..100 axes, independent of the real pitch size
    Percent,
    /// Provider-specific normalized axes (e.g. 120 × 80)
    Normed,
}

/// Whether the axes are limited to `xlim`/`ylim` or follow the real pitch size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundaries {
    Fixed,
    Flexible,
}

/// Provider coordinate system templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    Opta,
    StatsBomb,
    Dfl,
    Tracab,
    StatsPerformTracking,
    ChyronHegoInternational,
}

impl Template {
    fn requires_dimensions(&self) -> bool {
        !matches!(self, Template::Opta | Template::StatsBomb)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pitch {
    /// Longitudinal limits (x_min, x_max)
    pub xlim: (f64, f64),
    /// Lateral limits (y_min, y_max)
    pub ylim: (f64, f64),
    pub unit: Unit,
    pub boundaries: Boundaries,
    /// Actual pitch length in `unit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Actual pitch width in `unit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
}

impl Pitch {
    /// Plain pitch with fixed boundaries.
    pub fn new(xlim: (f64, f64), ylim: (f64, f64), unit: Unit) -> Self {
        Self {
            xlim,
            ylim,
            unit,
            boundaries: Boundaries::Fixed,
            length: None,
            width: None,
            sport: None,
        }
    }

    /// Pitch following a data provider's coordinate conventions.
    ///
    /// Centered templates (DFL, Tracab, ChyronHego) and StatsPerform need the
    /// real `length` and `width` in meters.
    pub fn from_template(template: Template, length: Option<f64>, width: Option<f64>) -> Result<Self> {
        let (len_m, wid_m) = match (length, width) {
            (Some(l), Some(w)) => (l, w),
            _ if template.requires_dimensions() => {
                return Err(ControlError::InvalidPitch(format!(
                    "template {:?} needs both length and width",
                    template
                )))
            }
            _ => (0.0, 0.0),
        };
        let x_half = round3(len_m / 2.0);
        let y_half = round3(wid_m / 2.0);

        let (xlim, ylim, unit, boundaries) = match template {
            Template::Opta => ((0.0, 100.0), (0.0, 100.0), Unit::Percent, Boundaries::Fixed),
            Template::StatsBomb => ((0.0, 120.0), (0.0, 80.0), Unit::Normed, Boundaries::Fixed),
            Template::Dfl | Template::ChyronHegoInternational => {
                ((-x_half, x_half), (-y_half, y_half), Unit::Meters, Boundaries::Flexible)
            }
            Template::Tracab => (
                (-x_half * 100.0, x_half * 100.0),
                (-y_half * 100.0, y_half * 100.0),
                Unit::Centimeters,
                Boundaries::Flexible,
            ),
            Template::StatsPerformTracking => {
                ((0.0, len_m), (0.0, wid_m), Unit::Meters, Boundaries::Flexible)
            }
        };

        Ok(Self { xlim, ylim, unit, boundaries, length, width, sport: None })
    }

    pub fn with_sport(mut self, sport: impl Into<String>) -> Self {
        self.sport = Some(sport.into());
        self
    }

    pub fn is_metrical(&self) -> bool {
        matches!(self.unit, Unit::Meters | Unit::Centimeters)
    }

    pub fn x_extent(&self) -> f64 {
        self.xlim.1 - self.xlim.0
    }

    pub fn y_extent(&self) -> f64 {
        self.ylim.1 - self.ylim.0
    }

    pub fn center(&self) -> (f64, f64) {
        (
            round3((self.xlim.0 + self.xlim.1) / 2.0),
            round3((self.ylim.0 + self.ylim.1) / 2.0),
        )
    }

    /// Inclusive bounds check.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.xlim.0 && x <= self.xlim.1 && y >= self.ylim.0 && y <= self.ylim.1
    }

    /// Bounds must be finite with `max > min` on both axes.
    pub fn validate(&self) -> Result<()> {
        let finite = [self.xlim.0, self.xlim.1, self.ylim.0, self.ylim.1]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(ControlError::InvalidPitch(format!(
                "bounds must be finite, got x={:?} y={:?}",
                self.xlim, self.ylim
            )));
        }
        if self.xlim.1 <= self.xlim.0 {
            return Err(ControlError::InvalidPitch(format!(
                "expected x_max > x_min, got {:?}",
                self.xlim
            )));
        }
        if self.ylim.1 <= self.ylim.0 {
            return Err(ControlError::InvalidPitch(format!(
                "expected y_max > y_min, got {:?}",
                self.ylim
            )));
        }
        Ok(())
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round_ties_even() / 1000.0
}
