//! Board coordinates and the movement resolver
//!
//! The board is a fixed `BOARD_SIZE` x `BOARD_SIZE` grid. Positions are signed so that
//! the cells just past the edge can be represented: a mouse stepping onto one of them
//! has escaped.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::obstacles::ObstacleSet;
use crate::consts::BOARD_SIZE;

/// A cell coordinate (row grows downward, col grows rightward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    pub fn is_on_board(self) -> bool {
        in_bounds(self)
    }

    /// Iterate every on-board cell in row-major order
    pub fn all_cells() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cat movement directions (orthogonal only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row, col) unit step
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Accepts direction names and the WASD keys
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "w" | "arrowup" => Some(Direction::Up),
            "down" | "s" | "arrowdown" => Some(Direction::Down),
            "left" | "a" | "arrowleft" => Some(Direction::Left),
            "right" | "d" | "arrowright" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn step(&self, from: Position) -> Position {
        let (d_row, d_col) = self.delta();
        from.offset(d_row, d_col)
    }
}

/// True if `pos` lies within [0, BOARD_SIZE) x [0, BOARD_SIZE)
#[inline]
pub fn in_bounds(pos: Position) -> bool {
    (0..BOARD_SIZE).contains(&pos.row) && (0..BOARD_SIZE).contains(&pos.col)
}

/// The 8 Moore neighbours of `pos`, in row-major order, without any bounds clamp
fn moore_neighbors(pos: Position) -> impl Iterator<Item = Position> {
    (-1..=1)
        .flat_map(|d_row| (-1..=1).map(move |d_col| (d_row, d_col)))
        .filter(|&(d_row, d_col)| d_row != 0 || d_col != 0)
        .map(move |(d_row, d_col)| pos.offset(d_row, d_col))
}

/// Moore neighbours that are on the board and not blocked by an obstacle
pub fn valid_neighbors(pos: Position, obstacles: &ObstacleSet) -> Vec<Position> {
    moore_neighbors(pos)
        .filter(|&n| in_bounds(n) && !obstacles.contains(n))
        .collect()
}

/// Moore neighbours not blocked by an obstacle, including off-board cells.
///
/// This is the candidate set for a mouse move: choosing an off-board cell is an escape.
pub fn escape_candidates(pos: Position, obstacles: &ObstacleSet) -> Vec<Position> {
    moore_neighbors(pos).filter(|&n| !obstacles.contains(n)).collect()
}
