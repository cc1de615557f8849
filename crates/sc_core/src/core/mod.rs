//! # Core Data Module
//!
//! Containers shared by all models.
//!
//! - `pitch` - coordinate system and field bounds
//! - `xy` - position and velocity series
//! - `property` - derived per-player / per-team time series

pub mod pitch;
pub mod property;
pub mod xy;

pub use pitch::{Boundaries, Pitch, Template, Unit};
pub use property::{PlayerProperty, TeamProperty};
pub use xy::{PositionSeries, VelocitySeries};
