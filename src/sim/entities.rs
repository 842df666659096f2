//! Cat and mice

use serde::{Deserialize, Serialize};

use super::board::Position;
use crate::consts::{CAT_START_COL, CAT_START_ROW};

pub const CAT_GLYPH: &str = "🐱";

/// Mouse variants, ordered by value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseType {
    Baby,
    Child,
    Adult,
    Grand,
}

impl MouseType {
    pub const ALL: [MouseType; 4] = [
        MouseType::Baby,
        MouseType::Child,
        MouseType::Adult,
        MouseType::Grand,
    ];

    /// Points the cat earns for catching this mouse
    pub fn points(&self) -> u32 {
        match self {
            MouseType::Baby => 1,
            MouseType::Child => 2,
            MouseType::Adult => 3,
            MouseType::Grand => 4,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            MouseType::Baby => "🐭",
            MouseType::Child => "🐹",
            MouseType::Adult => "🐁",
            MouseType::Grand => "🐀",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MouseType::Baby => "Baby Mouse",
            MouseType::Child => "Child Mouse",
            MouseType::Adult => "Adult Mouse",
            MouseType::Grand => "Grand Mouse",
        }
    }

    /// Parse a type name such as "adult"
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "baby" => Some(MouseType::Baby),
            "child" => Some(MouseType::Child),
            "adult" => Some(MouseType::Adult),
            "grand" => Some(MouseType::Grand),
            _ => None,
        }
    }
}

/// A live mouse on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mouse {
    pub id: u32,
    pub pos: Position,
    pub kind: MouseType,
}

/// The player's cat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat {
    pub pos: Position,
}

impl Default for Cat {
    fn default() -> Self {
        Self {
            pos: Position::new(CAT_START_ROW, CAT_START_COL),
        }
    }
}
