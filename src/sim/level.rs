//! Static level catalog
//!
//! Five levels of increasing difficulty. Each one fixes the win threshold, population cap,
//! mouse cadence, auto-spawn probability and obstacle layout.

use std::time::Duration;

use serde::Serialize;

use super::board::Position;

pub const FIRST_LEVEL: u8 = 1;
pub const LAST_LEVEL: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelConfig {
    pub id: u8,
    pub name: &'static str,
    pub description: &'static str,
    /// Catches needed to complete the level
    pub mice_to_win: u32,
    /// Spawns are refused at this population
    pub max_mice: usize,
    pub mouse_move_interval_ms: u64,
    /// Chance per auto-spawn tick, in [0, 1]
    pub spawn_probability: f64,
    pub obstacles: &'static [Position],
}

impl LevelConfig {
    /// Look up a level by its 1-based id
    pub fn get(id: u8) -> Option<&'static LevelConfig> {
        LEVELS.iter().find(|l| l.id == id)
    }

    pub fn mouse_move_interval(&self) -> Duration {
        Duration::from_millis(self.mouse_move_interval_ms)
    }

    pub fn is_last(&self) -> bool {
        self.id == LAST_LEVEL
    }
}

const fn p(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

pub static LEVELS: [LevelConfig; 5] = [
    LevelConfig {
        id: 1,
        name: "Beginner Hunt",
        description: "Learn the basics! Catch 15 mice to advance.",
        mice_to_win: 15,
        max_mice: 10,
        mouse_move_interval_ms: 2000,
        spawn_probability: 0.6,
        obstacles: &[],
    },
    LevelConfig {
        id: 2,
        name: "Speed Challenge",
        description: "Faster mice with a central obstacle! Catch 20 mice.",
        mice_to_win: 20,
        max_mice: 12,
        mouse_move_interval_ms: 1500,
        spawn_probability: 0.7,
        obstacles: &[p(4, 4), p(4, 5), p(5, 4), p(5, 5)],
    },
    LevelConfig {
        id: 3,
        name: "Maze Runner",
        description: "Navigate complex mazes! Catch 25 mice.",
        mice_to_win: 25,
        max_mice: 15,
        mouse_move_interval_ms: 1200,
        spawn_probability: 0.8,
        obstacles: &[
            p(2, 2), p(2, 3), p(2, 6), p(2, 7),
            p(5, 1), p(5, 2), p(5, 7), p(5, 8),
            p(7, 4), p(7, 5), p(8, 4), p(8, 5),
        ],
    },
    LevelConfig {
        id: 4,
        name: "Chaos Mode",
        description: "Fast mice everywhere! Catch 30 mice.",
        mice_to_win: 30,
        max_mice: 18,
        mouse_move_interval_ms: 1000,
        spawn_probability: 0.9,
        obstacles: &[
            p(1, 4), p(1, 5), p(3, 2), p(3, 7), p(4, 1),
            p(4, 8), p(6, 2), p(6, 7), p(8, 4), p(8, 5),
        ],
    },
    LevelConfig {
        id: 5,
        name: "Master Hunter",
        description: "Ultimate challenge! Lightning-fast mice, complex maze. Catch 40 mice!",
        mice_to_win: 40,
        max_mice: 20,
        mouse_move_interval_ms: 800,
        spawn_probability: 1.0,
        obstacles: &[
            p(1, 1), p(1, 8), p(2, 4), p(2, 5),
            p(3, 2), p(3, 7), p(4, 0), p(4, 9),
            p(5, 0), p(5, 9), p(6, 2), p(6, 7),
            p(7, 4), p(7, 5), p(8, 1), p(8, 8),
        ],
    },
];
