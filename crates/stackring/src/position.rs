use crate::error::RingError;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Pulls the bottom item of the matching arc onto the top.
    #[strum(to_string = "UP", serialize = "u")]
    Up,
    /// Moves the top item away and promotes the next one.
    #[strum(to_string = "DOWN", serialize = "d")]
    Down,
}

impl Direction {
    pub fn inverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// Which part of the ring an item occupies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, StrumDisplay,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    OnTop,
    Above,
    Below,
}

impl Role {
    /// The other arc. The top has no opposite.
    pub fn opposite(self) -> Self {
        match self {
            Self::OnTop => Self::OnTop,
            Self::Above => Self::Below,
            Self::Below => Self::Above,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position<I> {
    pub item: I,
    pub slot: usize,
    pub role: Role,
    /// Index of the top slot, one less than the number of items.
    pub ring_length: usize,
}

impl<I> Position<I> {
    pub fn new(item: I, slot: usize, role: Role, ring_length: usize) -> Self {
        Self {
            item,
            slot,
            role,
            ring_length,
        }
    }

    pub fn is_on_top(&self) -> bool {
        self.slot == self.ring_length
    }

    /// Number of slots between this position and the top.
    pub fn distance(&self) -> usize {
        self.ring_length.saturating_sub(self.slot)
    }

    /// `role == OnTop` exactly when the slot is the top slot.
    pub fn is_consistent(&self) -> bool {
        self.slot <= self.ring_length && (self.role == Role::OnTop) == self.is_on_top()
    }

    pub(crate) fn violation(&self) -> RingError {
        RingError::InvariantViolation {
            slot: self.slot,
            role: self.role,
            ring_length: self.ring_length,
        }
    }
}

impl<I: Clone> Position<I> {
    pub fn moved_to(&self, slot: usize, role: Role) -> Self {
        Self::new(self.item.clone(), slot, role, self.ring_length)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionRecord<I> {
    pub current: Position<I>,
    pub previous: Position<I>,
}

/// Every item's current and previous position.
///
/// Only built by [`init_positions`] and [`crate::rotate`], and never changed
/// afterwards: a rotation yields a whole new store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PositionStore<I> {
    records: Vec<PositionRecord<I>>,
}

impl<I> PositionStore<I> {
    pub(crate) fn from_records(records: Vec<PositionRecord<I>>) -> Result<Self, RingError> {
        let store = Self { records };
        store.validate()?;
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ring_length(&self) -> usize {
        self.len().saturating_sub(1)
    }

    pub fn records(&self) -> &[PositionRecord<I>] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionRecord<I>> {
        self.records.iter()
    }

    pub fn top(&self) -> Option<&Position<I>> {
        self.records
            .iter()
            .map(|r| &r.current)
            .find(|p| p.role == Role::OnTop)
    }

    /// Checks the occupancy rules: every position is consistent, exactly one
    /// item is on top, and each arc fills a gap-free run of slots directly
    /// under the top without sharing a slot inside the arc.
    pub fn validate(&self) -> Result<(), RingError> {
        let top = self.ring_length();
        let mut on_top = false;
        let mut above = vec![false; top];
        let mut below = vec![false; top];

        for position in self.records.iter().map(|r| &r.current) {
            if position.ring_length != top || !position.is_consistent() {
                return Err(position.violation());
            }
            let taken = match position.role {
                Role::OnTop => &mut on_top,
                Role::Above => &mut above[position.slot],
                Role::Below => &mut below[position.slot],
            };
            if *taken {
                return Err(position.violation());
            }
            *taken = true;
        }

        if !on_top {
            return Err(RingError::InvariantViolation {
                slot: top,
                role: Role::OnTop,
                ring_length: top,
            });
        }

        for (role, arc) in [(Role::Above, &above), (Role::Below, &below)] {
            // once an arc starts it has to run up to the top
            if let Some(slot) = arc.windows(2).position(|w| w[0] && !w[1]) {
                return Err(RingError::InvariantViolation {
                    slot,
                    role,
                    ring_length: top,
                });
            }
        }
        Ok(())
    }
}

impl<I: Clone> PositionStore<I> {
    /// Current positions, detached from the store.
    pub fn positions(&self) -> Vec<Position<I>> {
        self.records.iter().map(|r| r.current.clone()).collect()
    }
}

impl<I: Eq> PositionStore<I> {
    pub fn get(&self, item: &I) -> Option<&PositionRecord<I>> {
        self.records.iter().find(|r| &r.current.item == item)
    }
}

impl<I: Clone + Eq> PositionStore<I> {
    pub fn rotate(&self, direction: Direction) -> Result<crate::Rotation<I>, RingError> {
        crate::rotate(self, direction)
    }
}

impl<'a, I> IntoIterator for &'a PositionStore<I> {
    type Item = &'a PositionRecord<I>;
    type IntoIter = std::slice::Iter<'a, PositionRecord<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Builds a ring from items ordered bottom to top: the item at index `i` gets
/// slot `i` and the last one starts on top. The previous positions describe
/// the ring as if it had just been rotated down into this arrangement.
pub fn init_positions<I: Clone + Eq>(
    items: impl IntoIterator<Item = I>,
) -> Result<PositionStore<I>, RingError> {
    let items: Vec<I> = items.into_iter().collect();
    if items.is_empty() {
        return Err(RingError::EmptyRing);
    }
    if let Some(index) = (1..items.len()).find(|&i| items[..i].contains(&items[i])) {
        return Err(RingError::DuplicateItem { index });
    }

    let ring_length = items.len() - 1;
    let records = items
        .into_iter()
        .enumerate()
        .map(|(slot, item)| {
            let role = if slot == ring_length {
                Role::OnTop
            } else {
                Role::Below
            };
            let current = Position::new(item, slot, role, ring_length);
            let (prev_slot, prev_role) = initial_previous(slot, ring_length);
            let previous = current.moved_to(prev_slot, prev_role);
            PositionRecord { current, previous }
        })
        .collect();

    PositionStore::from_records(records)
}

fn initial_previous(slot: usize, ring_length: usize) -> (usize, Role) {
    match slot {
        _ if ring_length == 0 => (0, Role::OnTop),
        s if s == ring_length => (0, Role::Below),
        s if s + 1 == ring_length => (ring_length, Role::OnTop),
        s => (s + 1, Role::Below),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current(store: &PositionStore<char>) -> Vec<(char, usize, Role)> {
        store
            .iter()
            .map(|r| (r.current.item, r.current.slot, r.current.role))
            .collect()
    }

    #[test]
    fn test_init_positions() {
        let store = init_positions(['@', '#', '$']).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.ring_length(), 2);
        assert_eq!(
            current(&store),
            vec![('@', 0, Role::Below), ('#', 1, Role::Below), ('$', 2, Role::OnTop)]
        );
        assert_eq!(store.top().map(|p| p.item), Some('$'));
    }

    #[test]
    fn test_initial_previous_positions() {
        let store = init_positions(['a', 'b', 'c', 'd']).unwrap();
        let previous: Vec<_> = store
            .iter()
            .map(|r| (r.previous.slot, r.previous.role))
            .collect();

        assert_eq!(
            previous,
            vec![
                (1, Role::Below),
                (2, Role::Below),
                (3, Role::OnTop),
                (0, Role::Below),
            ]
        );
    }

    #[test]
    fn test_single_item_ring() {
        let store = init_positions(["only"]).unwrap();
        let record = &store.records()[0];

        assert_eq!(record.current, Position::new("only", 0, Role::OnTop, 0));
        assert_eq!(record.previous, record.current);
    }

    #[test]
    fn test_init_rejects_empty_and_duplicates() {
        assert_eq!(
            init_positions(Vec::<u8>::new()).unwrap_err(),
            RingError::EmptyRing
        );
        assert_eq!(
            init_positions([1, 2, 1]).unwrap_err(),
            RingError::DuplicateItem { index: 2 }
        );
    }

    #[test]
    fn test_get_by_item() {
        let store = init_positions(['x', 'y']).unwrap();

        assert_eq!(store.get(&'x').map(|r| r.current.slot), Some(0));
        assert!(store.get(&'z').is_none());
    }

    #[test]
    fn test_validate_rejects_gap_in_arc() {
        // below arc skips slot 2
        let records = vec![
            record('a', 0, Role::Below, 3),
            record('b', 1, Role::Below, 3),
            record('c', 2, Role::Above, 3),
            record('d', 3, Role::OnTop, 3),
        ];

        assert_eq!(
            PositionStore::from_records(records).unwrap_err(),
            RingError::InvariantViolation {
                slot: 1,
                role: Role::Below,
                ring_length: 3
            }
        );
    }

    #[test]
    fn test_validate_accepts_two_arcs_sharing_a_slot() {
        let records = vec![
            record('@', 2, Role::OnTop, 2),
            record('#', 1, Role::Below, 2),
            record('$', 1, Role::Above, 2),
        ];

        assert!(PositionStore::from_records(records).is_ok());
    }

    #[test]
    fn test_validate_rejects_misplaced_top() {
        let records = vec![record('a', 0, Role::OnTop, 1), record('b', 1, Role::Below, 1)];

        assert_eq!(
            PositionStore::from_records(records).unwrap_err(),
            RingError::InvariantViolation {
                slot: 0,
                role: Role::OnTop,
                ring_length: 1
            }
        );
    }

    #[test]
    fn test_direction_deserialization() {
        let cases = vec![
            ("\"UP\"", Direction::Up),
            ("\"up\"", Direction::Up),
            ("\"u\"", Direction::Up),
            ("\"Down\"", Direction::Down),
            ("\"D\"", Direction::Down),
        ];

        for (json, expected) in cases {
            let deserialized: Direction = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert_eq!(serde_json::to_string(&Direction::Down).unwrap(), "\"DOWN\"");
        assert_eq!(Direction::Up.to_string(), "UP");
        assert_eq!(Direction::Up.inverse(), Direction::Down);
    }

    #[test]
    fn test_role_names() {
        assert_eq!(Role::OnTop.to_string(), "ON_TOP");
        assert_eq!("below".parse::<Role>().unwrap(), Role::Below);
        assert_eq!(serde_json::to_string(&Role::Above).unwrap(), "\"ABOVE\"");
        assert_eq!(Role::Above.opposite(), Role::Below);
        assert_eq!(Role::OnTop.opposite(), Role::OnTop);
    }

    fn record(item: char, slot: usize, role: Role, ring_length: usize) -> PositionRecord<char> {
        let current = Position::new(item, slot, role, ring_length);
        PositionRecord {
            previous: current.clone(),
            current,
        }
    }
}
