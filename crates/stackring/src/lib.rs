//! Position engine for a circular stack of items.
//!
//! One item sits on top, the others trail behind it on one of two arcs
//! (above or below the top item). A [`Direction`] rotates the whole ring by
//! one slot. Everything here is plain data and free functions; drawing and
//! timing belong to the caller.

pub mod axis;
pub mod error;
pub mod position;
pub mod rotation;
pub mod transition;

pub use axis::{AxisOffset, AxisSteps, depth_offset, project, vertical_offset};
pub use error::RingError;
pub use position::{Direction, Position, PositionRecord, PositionStore, Role, init_positions};
pub use rotation::{Rotation, RotationStep, rotate};
pub use transition::next_position;
