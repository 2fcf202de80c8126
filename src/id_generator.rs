use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{HullError, HullResult};

/// Handle of a circle, unique within one scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CircleId(pub u64);

/// Handle of a hull, unique within one scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HullId(pub u64);

impl fmt::Display for CircleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "circle-{}", self.0)
    }
}

impl fmt::Display for HullId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hull-{}", self.0)
    }
}

// One counter per kind, owned by the scene so two scenes never share ids
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next_circle: u64,
    next_hull: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_circle_id(&mut self) -> CircleId {
        let id = CircleId(self.next_circle);
        self.next_circle = self.next_circle.saturating_add(1);
        id
    }

    pub fn next_hull_id(&mut self) -> HullId {
        let id = HullId(self.next_hull);
        self.next_hull = self.next_hull.saturating_add(1);
        id
    }

    /// Make sure an id restored from a snapshot is never handed out again.
    /// The last `u64` is refused, since no id could follow it.
    pub fn reserve_circle(&mut self, id: CircleId) -> HullResult<()> {
        self.next_circle = self.next_circle.max(successor(id.0)?);
        Ok(())
    }

    pub fn reserve_hull(&mut self, id: HullId) -> HullResult<()> {
        self.next_hull = self.next_hull.max(successor(id.0)?);
        Ok(())
    }
}

fn successor(raw: u64) -> HullResult<u64> {
    raw.checked_add(1).ok_or(HullError::IdOutOfRange(raw))
}
