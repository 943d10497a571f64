use crate::error::RingError;
use crate::position::{Direction, Position, PositionRecord, Role};

/// Computes where `item` goes when the ring turns in `direction`.
///
/// Think of the ring as a conveyor belt: `Down` drops the top item onto the
/// below arc and promotes the next one, `Up` drops it onto the above arc and
/// pulls the item at the bottom of the above arc back up. `positions` must be
/// the snapshot taken before any item of the same rotation moved.
///
/// The returned record's `previous` is the position the item is leaving.
pub fn next_position<I: Clone + Eq>(
    positions: &[Position<I>],
    item: &I,
    direction: Direction,
) -> Result<PositionRecord<I>, RingError> {
    let current = positions
        .iter()
        .find(|p| &p.item == item)
        .ok_or(RingError::NotFound)?;
    let (slot, role) = transition(current, direction)?;

    Ok(PositionRecord {
        current: current.moved_to(slot, role),
        previous: current.clone(),
    })
}

fn transition<I>(current: &Position<I>, direction: Direction) -> Result<(usize, Role), RingError> {
    let top = current.ring_length;
    let slot = current.slot;

    if slot > top {
        return Err(current.violation());
    }

    // a single item has nowhere to go
    if top == 0 {
        return match current.role {
            Role::OnTop => Ok((0, Role::OnTop)),
            _ => Err(current.violation()),
        };
    }

    if slot == top {
        let role = match direction {
            Direction::Down => Role::Below,
            Direction::Up => Role::Above,
        };
        return Ok((slot - 1, role));
    }

    match (current.role, direction) {
        (Role::Below, Direction::Down) | (Role::Above, Direction::Up) if slot == 0 => {
            Ok((top, Role::OnTop))
        }
        (Role::Below, Direction::Up) | (Role::Above, Direction::Down) => {
            let next = slot + 1;
            let role = if next == top { Role::OnTop } else { current.role };
            Ok((next, role))
        }
        (Role::Below, Direction::Down) | (Role::Above, Direction::Up) => {
            Ok((slot - 1, current.role))
        }
        (Role::OnTop, _) => Err(current.violation()),
    }
}
