//! Catching Mice - a cat chases randomly moving mice on a 10x10 board
//!
//! Core modules:
//! - `sim`: Deterministic game engine (board, entities, levels, timers)
//! - `settings`: Runtime configuration for the simulation driver
//! - `audio`: Sound cue table consumed by presentation layers

pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Board is `BOARD_SIZE` x `BOARD_SIZE` cells
    pub const BOARD_SIZE: i32 = 10;
    /// Number of messages kept in the in-game log
    pub const LOG_CAPACITY: usize = 10;

    /// Cat spawns in the top-left corner on every level load
    pub const CAT_START_ROW: i32 = 0;
    pub const CAT_START_COL: i32 = 0;

    /// Auto-spawn cadence (independent of level)
    pub const SPAWN_INTERVAL_MS: u64 = 1500;
    /// Chance that each live mouse moves on a mouse-move tick
    pub const MOUSE_MOVE_CHANCE: f64 = 0.9;

    /// Points awarded to the mice when one leaves the board
    pub const ESCAPE_BONUS: i32 = 5;
    /// Points taken from the mice when one is caught
    pub const CATCH_PENALTY: i32 = 1;
    /// Every Nth catch within a level triggers a celebration
    pub const CELEBRATION_EVERY: u32 = 5;

    /// First id handed out to a spawned mouse
    pub const FIRST_MOUSE_ID: u32 = 1;
}
