use crate::position::Role;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    /// The item has no entry in the positions it was looked up in. The caller's
    /// item set and the store went out of sync.
    #[error("Item not found in the position snapshot")]
    NotFound,
    /// A position the transition table does not cover. Always a logic defect.
    #[error("No transition for slot {slot} with role {role} (ring length {ring_length})")]
    InvariantViolation {
        slot: usize,
        role: Role,
        ring_length: usize,
    },
    #[error("Cannot build a ring without items")]
    EmptyRing,
    #[error("Item at index {index} is already part of the ring")]
    DuplicateItem { index: usize },
}
