use super::motion::{Motion, Timing};
use super::photo::{Photo, PhotoId};
use super::scatter::Scatter;
use crate::config::{CardConfig, Config};
use crate::sys::status::{PhotoStatus, StackStatus};
use stackring::{
    AxisOffset, AxisSteps, Direction, PositionStore, RingError, init_positions, project, rotate,
};
use std::collections::HashMap;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateOutcome {
    Rotated { wrap_reset: bool },
    Throttled,
    Empty,
}

/// Owns the ring and the motions that carry photos to their places.
#[derive(Debug, Clone)]
pub struct Deck {
    store: PositionStore<PhotoId>,
    motions: HashMap<PhotoId, Motion>,
    /// Bottom-most first, so the top photo is painted last.
    paint_order: Vec<PhotoId>,
    steps: AxisSteps,
    timing: Timing,
    last_rotation: Option<(Instant, Direction)>,
}

impl Deck {
    /// Deals the photos from the center out to their starting offsets.
    pub fn new(
        ids: Vec<PhotoId>,
        steps: AxisSteps,
        timing: Timing,
        now: Instant,
    ) -> Result<Self, RingError> {
        let mut deck = Self {
            store: init_positions(ids)?,
            motions: HashMap::new(),
            paint_order: Vec::new(),
            steps,
            timing,
            last_rotation: None,
        };
        deck.deal(now);
        Ok(deck)
    }

    fn deal(&mut self, now: Instant) {
        let mut order: Vec<_> = self.store.iter().map(|r| &r.current).collect();
        order.sort_by_key(|p| p.slot);
        self.paint_order = order.iter().map(|p| p.item).collect();

        let motions: Vec<_> = self
            .store
            .iter()
            .map(|r| {
                let id = r.current.item;
                let target = project(&r.current, self.steps);
                (
                    id,
                    Motion::new(self.offset_of(id, now), target, now, self.timing.transition),
                )
            })
            .collect();
        self.motions = motions.into_iter().collect();
    }

    pub fn rotate(&mut self, direction: Direction, now: Instant) -> Result<RotateOutcome, RingError> {
        if let Some((last, _)) = self.last_rotation
            && now.saturating_duration_since(last) < self.timing.throttle
        {
            return Ok(RotateOutcome::Throttled);
        }

        let rotation = rotate(&self.store, direction)?;

        for step in &rotation.steps {
            let target = project(&step.position, self.steps);
            let motion = match &step.pre_jump {
                Some(pre_jump) => Motion::new(
                    project(pre_jump, self.steps),
                    target,
                    now,
                    self.timing.transition,
                )
                .with_delay(self.timing.settle),
                None => Motion::new(
                    self.offset_of(step.item, now),
                    target,
                    now,
                    self.timing.transition,
                ),
            };
            self.motions.insert(step.item, motion);
        }

        self.paint_order = rotation.steps.iter().rev().map(|s| s.item).collect();
        let wrap_reset = rotation.is_wrap_reset();
        self.store = rotation.store;
        self.last_rotation = Some((now, direction));

        Ok(RotateOutcome::Rotated { wrap_reset })
    }

    /// Starts over from the initial arrangement, moving photos from wherever
    /// they currently are.
    pub fn reset(&mut self, now: Instant) -> Result<(), RingError> {
        let ids: Vec<PhotoId> = self.store.iter().map(|r| r.current.item).collect();
        self.store = init_positions(ids)?;
        self.last_rotation = None;
        self.deal(now);
        Ok(())
    }

    pub fn offset_of(&self, id: PhotoId, now: Instant) -> AxisOffset {
        self.motions
            .get(&id)
            .map(|m| m.sample(now))
            .unwrap_or_default()
    }

    pub fn paint_order(&self) -> &[PhotoId] {
        &self.paint_order
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.motions.values().any(|m| !m.is_finished(now))
    }

    pub fn store(&self) -> &PositionStore<PhotoId> {
        &self.store
    }

    pub fn last_direction(&self) -> Option<Direction> {
        self.last_rotation.map(|(_, d)| d)
    }

    pub fn top(&self) -> Option<PhotoId> {
        self.store.top().map(|p| p.item)
    }
}

/// Positive `dy` scrolls the stack up, as wheel deltas do in browsers.
pub fn scroll_direction(dy: f64, invert: bool) -> Option<Direction> {
    let direction = if dy > 0.0 {
        Direction::Up
    } else if dy < 0.0 {
        Direction::Down
    } else {
        return None;
    };
    Some(if invert { direction.inverse() } else { direction })
}

pub struct State {
    pub photos: Vec<Photo>,
    pub deck: Option<Deck>,
    pub card: CardConfig,
    pub invert_scroll: bool,
}

impl State {
    pub fn from_config(config: &Config) -> Self {
        let paths = config.photo_paths();
        let scatter = Scatter::deal(paths.len(), config.card.scatter);
        let photos: Vec<Photo> = paths
            .into_iter()
            .zip(scatter)
            .enumerate()
            .map(|(i, (path, scatter))| Photo::load(PhotoId::from(i), path, scatter))
            .collect();

        let ids = photos.iter().map(|p| p.id).collect();
        let deck = match Deck::new(
            ids,
            config.motion.steps(),
            Timing::from(&config.motion),
            Instant::now(),
        ) {
            Ok(deck) => Some(deck),
            Err(RingError::EmptyRing) => {
                log::warn!("No photos found, nothing to stack");
                None
            }
            Err(e) => {
                log::error!("Failed to build the photo stack: {}", e);
                None
            }
        };

        log::info!("Loaded {} photos", photos.len());

        Self {
            photos,
            deck,
            card: config.card,
            invert_scroll: config.motion.invert_scroll,
        }
    }

    pub fn reload(&mut self, config: &Config) {
        *self = Self::from_config(config);
    }

    pub fn rotate(&mut self, direction: Direction) -> Result<RotateOutcome, RingError> {
        match &mut self.deck {
            Some(deck) => deck.rotate(direction, Instant::now()),
            None => Ok(RotateOutcome::Empty),
        }
    }

    /// Rebuilds the ring. Used after a failed rotation as well.
    pub fn reset(&mut self) {
        if let Some(deck) = &mut self.deck
            && let Err(e) = deck.reset(Instant::now())
        {
            log::error!("Failed to reset the photo stack: {}", e);
            self.deck = None;
        }
    }

    pub fn scroll_direction(&self, dy: f64) -> Option<Direction> {
        scroll_direction(dy, self.invert_scroll)
    }

    pub fn photo(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.get(usize::from(id))
    }

    pub fn is_animating(&self) -> bool {
        self.deck
            .as_ref()
            .is_some_and(|deck| deck.is_animating(Instant::now()))
    }

    pub fn status(&self) -> StackStatus {
        let Some(deck) = &self.deck else {
            return StackStatus::default();
        };

        StackStatus {
            direction: deck.last_direction(),
            photos: deck
                .store()
                .iter()
                .filter_map(|r| {
                    self.photo(r.current.item).map(|photo| PhotoStatus {
                        name: photo.name.clone(),
                        slot: r.current.slot,
                        role: r.current.role,
                    })
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackring::Role;
    use std::time::Duration;

    fn ids(n: usize) -> Vec<PhotoId> {
        (0..n).map(PhotoId::from).collect()
    }

    fn deck(n: usize, now: Instant) -> Deck {
        Deck::new(ids(n), AxisSteps::default(), Timing::default(), now).unwrap()
    }

    #[test]
    fn test_deal_moves_photos_out_from_the_center() {
        let now = Instant::now();
        let deck = deck(3, now);

        assert_eq!(deck.offset_of(PhotoId::from(0), now), AxisOffset::default());
        let settled = now + Duration::from_secs(1);
        assert_eq!(
            deck.offset_of(PhotoId::from(0), settled),
            AxisOffset {
                vertical: 40.0,
                depth: -20.0
            }
        );
        assert_eq!(deck.paint_order(), ids(3).as_slice());
        assert!(deck.is_animating(now));
        assert!(!deck.is_animating(settled));
    }

    #[test]
    fn test_rotation_is_throttled() {
        let now = Instant::now();
        let mut deck = deck(3, now);

        assert_eq!(
            deck.rotate(Direction::Down, now).unwrap(),
            RotateOutcome::Rotated { wrap_reset: true }
        );
        assert_eq!(
            deck.rotate(Direction::Down, now + Duration::from_millis(500)).unwrap(),
            RotateOutcome::Throttled
        );
        assert_eq!(
            deck.rotate(Direction::Up, now + Duration::from_millis(800)).unwrap(),
            RotateOutcome::Rotated { wrap_reset: false }
        );
        assert_eq!(deck.last_direction(), Some(Direction::Up));
    }

    #[test]
    fn test_wrap_reset_starts_from_pre_jump_offset() {
        let now = Instant::now();
        let mut deck = deck(3, now);
        let later = now + Duration::from_secs(1);

        deck.rotate(Direction::Down, later).unwrap();

        // photo 0 came up from the bottom: it holds the above-arc offset first
        let held = deck.offset_of(PhotoId::from(0), later + Duration::from_millis(100));
        assert_eq!(
            held,
            AxisOffset {
                vertical: -20.0,
                depth: -10.0
            }
        );
        let settled = deck.offset_of(PhotoId::from(0), later + Duration::from_secs(1));
        assert_eq!(settled, AxisOffset::default());
        assert_eq!(deck.top(), Some(PhotoId::from(0)));
    }

    #[test]
    fn test_paint_order_ends_with_the_top_photo() {
        let now = Instant::now();
        let mut deck = deck(4, now);

        deck.rotate(Direction::Up, now).unwrap();

        assert_eq!(deck.paint_order().last(), Some(&PhotoId::from(2)));
        assert_eq!(deck.paint_order().first(), Some(&PhotoId::from(0)));
    }

    #[test]
    fn test_normal_step_continues_from_current_offset() {
        let now = Instant::now();
        let mut deck = deck(4, now);
        let later = now + Duration::from_secs(1);
        let before = deck.offset_of(PhotoId::from(3), later);

        deck.rotate(Direction::Up, later).unwrap();

        assert_eq!(deck.offset_of(PhotoId::from(3), later), before);
        assert_eq!(
            deck.offset_of(PhotoId::from(3), later + Duration::from_secs(1)),
            AxisOffset {
                vertical: -20.0,
                depth: -10.0
            }
        );
    }

    #[test]
    fn test_reset_restores_initial_ring() {
        let now = Instant::now();
        let mut deck = deck(3, now);
        let initial = deck.store().clone();

        deck.rotate(Direction::Down, now).unwrap();
        deck.reset(now + Duration::from_millis(10)).unwrap();

        assert_eq!(deck.store(), &initial);
        assert_eq!(deck.last_direction(), None);
        assert_eq!(
            deck.rotate(Direction::Down, now + Duration::from_millis(20)).unwrap(),
            RotateOutcome::Rotated { wrap_reset: true }
        );
    }

    #[test]
    fn test_store_roles_after_rotation() {
        let now = Instant::now();
        let mut deck = deck(3, now);

        deck.rotate(Direction::Up, now).unwrap();
        let roles: Vec<Role> = deck.store().iter().map(|r| r.current.role).collect();

        assert_eq!(roles, vec![Role::Below, Role::OnTop, Role::Above]);
    }

    #[test]
    fn test_empty_deck_is_an_error() {
        assert_eq!(
            Deck::new(Vec::new(), AxisSteps::default(), Timing::default(), Instant::now())
                .unwrap_err(),
            RingError::EmptyRing
        );
    }

    #[test]
    fn test_scroll_direction() {
        assert_eq!(scroll_direction(1.0, false), Some(Direction::Up));
        assert_eq!(scroll_direction(-2.5, false), Some(Direction::Down));
        assert_eq!(scroll_direction(0.0, false), None);
        assert_eq!(scroll_direction(1.0, true), Some(Direction::Down));
    }
}
