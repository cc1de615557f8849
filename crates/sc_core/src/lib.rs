//! # sc_core - Discretized Space Control
//!
//! Computes which agent controls every point of a mesh spanned over a pitch,
//! frame by frame, and reduces those labels to player and team control
//! percentages.
//!
//! ## Features
//! - Square and hexagonal meshes between 10 and 1000 columns
//! - Nearest-distance and kinematic-pursuit (arrival time) assignment
//! - Frame-parallel labelling on the rayon pool, deterministic output
//! - JSON configuration and per-frame snapshots for renderers

// Loop style - index loops mirror the (row, col) mesh layout
#![allow(clippy::needless_range_loop)]
// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]

pub mod config;
pub mod core;
pub mod error;
pub mod models;

pub use config::SpaceControlConfig;
pub use core::{Pitch, PlayerProperty, PositionSeries, TeamProperty, Template, Unit, VelocitySeries};
pub use error::{ControlError, Result};
pub use models::{
    ControlAlgorithm, ControlSnapshot, EmptyFramePolicy, FitSummary, MeshType, SpaceControlModel,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
