//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Randomness only through an injected `Rng`
//! - Time only through `Simulation::advance`
//! - Stable iteration order (mice by spawn order, cells row-major)
//! - No rendering, audio or terminal dependencies

pub mod board;
pub mod entities;
pub mod level;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use board::{Direction, Position, escape_candidates, in_bounds, valid_neighbors};
pub use entities::{CAT_GLYPH, Cat, Mouse, MouseType};
pub use level::{FIRST_LEVEL, LAST_LEVEL, LEVELS, LevelConfig};
pub use obstacles::ObstacleSet;
pub use state::{
    BOARD_CELLS, Cell, GameEvent, GameLog, GameState, Grid, MouseMove, Rejection, Snapshot,
};
pub use tick::{Command, Simulation, StartError, Timer};
