//! Blocked cells
//!
//! Ordered so that snapshots and iteration are deterministic.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::board::Position;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleSet {
    cells: BTreeSet<Position>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a static level layout
    pub fn from_layout(layout: &[Position]) -> Self {
        layout.iter().copied().collect()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Flip membership of `pos`. Returns true if the cell is now blocked.
    pub fn toggle(&mut self, pos: Position) -> bool {
        if self.cells.remove(&pos) {
            false
        } else {
            self.cells.insert(pos);
            true
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<Position> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
