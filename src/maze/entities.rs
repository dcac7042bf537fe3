//! Cat and cheese slots, and the joint game snapshot

use serde::{Deserialize, Serialize};

use super::grid::Position;
use crate::{Error, Result};

/// Capacity of the cat and cheese collections
pub const MAX_ENTITIES: usize = 5;

/// Fixed-capacity collection of entity positions.
///
/// Empty slots are `None`. Live entities are kept packed at the front, so
/// slot 0 is the tracked entity whenever any entity is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "EntitiesSpec")]
pub struct Entities {
    slots: [Option<Position>; MAX_ENTITIES],
}

#[derive(Deserialize)]
struct EntitiesSpec {
    slots: [Option<Position>; MAX_ENTITIES],
}

impl TryFrom<EntitiesSpec> for Entities {
    type Error = Error;

    fn try_from(spec: EntitiesSpec) -> Result<Self> {
        let first_empty = spec.slots.iter().position(Option::is_none);
        if let Some(gap) = first_empty {
            if spec.slots[gap..].iter().any(Option::is_some) {
                return Err(Error::InvalidConfiguration {
                    message: format!("entity slots must be packed, slot {gap} is empty"),
                });
            }
        }
        Ok(Self { slots: spec.slots })
    }
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection holding one entity in slot 0.
    pub fn single(pos: Position) -> Self {
        let mut slots = [None; MAX_ENTITIES];
        slots[0] = Some(pos);
        Self { slots }
    }

    /// # Errors
    ///
    /// Returns [`Error::TooManyEntities`] if more than [`MAX_ENTITIES`] positions are given.
    pub fn from_positions(positions: &[Position]) -> Result<Self> {
        if positions.len() > MAX_ENTITIES {
            return Err(Error::TooManyEntities {
                count: positions.len(),
                max: MAX_ENTITIES,
            });
        }
        let mut slots = [None; MAX_ENTITIES];
        for (slot, &pos) in slots.iter_mut().zip(positions) {
            *slot = Some(pos);
        }
        Ok(Self { slots })
    }

    pub fn slots(&self) -> &[Option<Position>; MAX_ENTITIES] {
        &self.slots
    }

    /// The tracked entity (slot 0)
    pub fn first(&self) -> Option<Position> {
        self.slots[0]
    }

    /// Positions of live entities, in slot order
    pub fn live(&self) -> impl Iterator<Item = Position> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn len_live(&self) -> usize {
        self.live().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.live().any(|p| p == pos)
    }

    /// Remove every entity at `pos` and repack the remaining ones.
    ///
    /// Returns the number removed.
    pub fn remove_at(&mut self, pos: Position) -> usize {
        let before = self.len_live();
        let remaining: Vec<Position> = self.live().filter(|&p| p != pos).collect();
        self.slots = [None; MAX_ENTITIES];
        for (slot, p) in self.slots.iter_mut().zip(&remaining) {
            *slot = Some(*p);
        }
        before - remaining.len()
    }

    /// Mutable access to live positions, for moving entities in place.
    pub fn live_mut(&mut self) -> impl Iterator<Item = &mut Position> + '_ {
        self.slots.iter_mut().flatten()
    }
}

/// Mouse, cats and cheeses at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    pub mouse: Position,
    pub cats: Entities,
    pub cheeses: Entities,
}

impl Snapshot {
    pub fn new(mouse: Position, cats: Entities, cheeses: Entities) -> Self {
        Self {
            mouse,
            cats,
            cheeses,
        }
    }

    /// Same entities, mouse relocated.
    pub fn with_mouse(&self, mouse: Position) -> Self {
        Self { mouse, ..*self }
    }

    pub fn is_caught(&self) -> bool {
        self.cats.contains(self.mouse)
    }
}
