use crate::error::RingError;
use crate::position::{Direction, Position, PositionRecord, PositionStore, Role};
use crate::transition::next_position;

/// One item's share of a rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationStep<I> {
    pub item: I,
    pub position: Position<I>,
    pub previous: Position<I>,
    /// The item jumps from the very bottom straight to the top. Consumers
    /// should place it at `pre_jump` instantly instead of sweeping it through
    /// occupied slots.
    pub is_wrap_reset: bool,
    pub pre_jump: Option<Position<I>>,
}

impl<I: Clone> RotationStep<I> {
    fn from_record(record: PositionRecord<I>) -> Self {
        let PositionRecord { current, previous } = record;
        let is_wrap_reset = current.role == Role::OnTop
            && previous.slot == 0
            && previous.role != Role::OnTop;
        let pre_jump = is_wrap_reset
            .then(|| previous.moved_to(previous.ring_length - 1, previous.role.opposite()));

        Self {
            item: current.item.clone(),
            position: current,
            previous,
            is_wrap_reset,
            pre_jump,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation<I> {
    pub direction: Direction,
    /// Top-most destination first.
    pub steps: Vec<RotationStep<I>>,
    pub store: PositionStore<I>,
}

impl<I> Rotation<I> {
    pub fn is_wrap_reset(&self) -> bool {
        self.steps.iter().any(|s| s.is_wrap_reset)
    }

    pub fn wrap_reset(&self) -> Option<&RotationStep<I>> {
        self.steps.iter().find(|s| s.is_wrap_reset)
    }

    pub fn new_top(&self) -> Option<&I> {
        self.store.top().map(|p| &p.item)
    }
}

/// Turns the whole ring by one slot.
///
/// Every item's transition reads the same snapshot of `store`. Either all of
/// them succeed and a new store comes back, or the first error is returned and
/// nothing changes.
pub fn rotate<I: Clone + Eq>(
    store: &PositionStore<I>,
    direction: Direction,
) -> Result<Rotation<I>, RingError> {
    let snapshot = store.positions();
    let records = snapshot
        .iter()
        .map(|position| next_position(&snapshot, &position.item, direction))
        .collect::<Result<Vec<_>, _>>()?;

    let next_store = PositionStore::from_records(records.clone())?;

    let mut steps: Vec<_> = records.into_iter().map(RotationStep::from_record).collect();
    steps.sort_by(|a, b| b.position.slot.cmp(&a.position.slot));

    log::debug!(
        "Rotated {} ring of {} items{}",
        direction,
        next_store.len(),
        if steps.iter().any(|s| s.is_wrap_reset) {
            " (wrap reset)"
        } else {
            ""
        }
    );

    Ok(Rotation {
        direction,
        steps,
        store: next_store,
    })
}
