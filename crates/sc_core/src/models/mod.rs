//! # Space Control Models
//!
//! - `mesh` - square and hexagonal sampling lattices
//! - `kinematics` - velocity estimation for the pursuit rule
//! - `assignment` - per-frame cell labelling rules
//! - `aggregate` - label volume to control percentages
//! - `space` - the fit-then-query model

pub mod aggregate;
pub mod assignment;
pub mod kinematics;
pub mod mesh;
pub mod space;

pub use aggregate::{CellControls, EmptyFramePolicy};
pub use assignment::{arrival_time, ControlAlgorithm, ControlRule};
pub use kinematics::velocity;
pub use mesh::{Mesh, MeshType};
pub use space::{ControlSnapshot, FitSummary, SpaceControlModel};
