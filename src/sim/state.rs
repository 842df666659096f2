//! Game session state and the rules that mutate it
//!
//! `GameState` is the single owner of the cat, the mice, the obstacles and the scores.
//! Every rule lives in a method here; callers inject randomness and drain the events
//! the presentation layer reacts to.

use std::collections::VecDeque;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use super::board::{Direction, Position, escape_candidates};
use super::entities::{Cat, Mouse, MouseType};
use super::level::{FIRST_LEVEL, LevelConfig};
use super::obstacles::ObstacleSet;
use crate::consts::*;

/// Cells per board side, as an array length
pub const BOARD_CELLS: usize = BOARD_SIZE as usize;

/// Notifications for presentation (sound, animation). Purely informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    LevelLoaded { level: u8 },
    GameReset { level: u8 },
    CatMoved { from: Position, to: Position },
    MouseCaught { id: u32, pos: Position, kind: MouseType },
    MouseSpawned { id: u32, pos: Position, kind: MouseType },
    MouseEscaped { id: u32, kind: MouseType },
    ObstacleToggled { pos: Position, blocked: bool },
    ObstaclesCleared,
    LevelCompleted { level: u8 },
    CelebrationMilestone { count: u32 },
}

/// Why an operation left the state untouched.
///
/// The display text is the message shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Cat cannot leave the board")]
    OffBoard,
    #[error("Cat cannot move through obstacles!")]
    Blocked,
    #[error("Maximum {max} mice allowed on Level {level}!")]
    AtCapacity { max: usize, level: u8 },
    #[error("No empty cells to spawn mouse!")]
    NoFreeCell,
    #[error("Cell {0} is not free")]
    Occupied(Position),
    #[error("Cannot place obstacle on cat position!")]
    ObstacleOnCat,
    #[error("Cannot place obstacle on mouse position!")]
    ObstacleOnMouse,
    #[error("Cannot place obstacle off the board!")]
    ObstacleOffBoard,
    #[error("Obstacle placement mode is off")]
    NotPlacing,
    #[error("No mouse with id {0}")]
    UnknownMouse(u32),
    #[error("Mouse {0} has nowhere to go")]
    Cornered(u32),
    #[error("No level {0}")]
    UnknownLevel(u8),
    #[error("Level {0} is not complete yet")]
    LevelIncomplete(u8),
    #[error("Already on the last level")]
    LastLevel,
    #[error("Already on the first level")]
    FirstLevel,
}

impl Rejection {
    /// Whether the player sees this rejection in the game log
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            Rejection::Blocked
                | Rejection::AtCapacity { .. }
                | Rejection::NoFreeCell
                | Rejection::ObstacleOnCat
                | Rejection::ObstacleOnMouse
                | Rejection::ObstacleOffBoard
        )
    }
}

/// Result of a single mouse move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseMove {
    Moved(Position),
    Escaped,
}

/// Recent player-facing messages (newest first)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameLog {
    entries: VecDeque<String>,
}

impl GameLog {
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_front(message.into());
        self.entries.truncate(LOG_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What a board cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Obstacle,
    Mouse(MouseType),
    Cat,
}

impl Cell {
    pub fn glyph(&self) -> &'static str {
        match self {
            Cell::Empty => "·",
            Cell::Obstacle => "🧱",
            Cell::Mouse(kind) => kind.glyph(),
            Cell::Cat => super::entities::CAT_GLYPH,
        }
    }
}

pub type Grid = [[Cell; BOARD_CELLS]; BOARD_CELLS];

/// Read-only view handed to presentation
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub level: LevelConfig,
    pub grid: Grid,
    pub cat_score: u32,
    pub mice_score: i32,
    pub total_mice_caught: u32,
    pub mice_alive: usize,
    pub level_complete: bool,
    pub placing_obstacles: bool,
    pub log: Vec<String>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    level: &'static LevelConfig,
    cat: Cat,
    mice: Vec<Mouse>,
    obstacles: ObstacleSet,
    cat_score: u32,
    /// Can go negative: every catch costs the mice a point
    mice_score: i32,
    /// Catches on the current level
    total_mice_caught: u32,
    level_complete: bool,
    placing_obstacles: bool,
    log: GameLog,
    events: Vec<GameEvent>,
    /// Bumped on every change to the mouse collection
    mice_revision: u64,
    next_mouse_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh session on the first level
    pub fn new() -> Self {
        Self::starting_on(&super::level::LEVELS[0])
    }

    /// Fresh session starting on level `id`
    pub fn with_level(id: u8) -> Result<Self, Rejection> {
        LevelConfig::get(id)
            .map(Self::starting_on)
            .ok_or(Rejection::UnknownLevel(id))
    }

    fn starting_on(level: &'static LevelConfig) -> Self {
        let mut state = Self {
            level,
            cat: Cat::default(),
            mice: Vec::new(),
            obstacles: ObstacleSet::new(),
            cat_score: 0,
            mice_score: 0,
            total_mice_caught: 0,
            level_complete: false,
            placing_obstacles: false,
            log: GameLog::default(),
            events: Vec::new(),
            mice_revision: 0,
            next_mouse_id: FIRST_MOUSE_ID,
        };
        state.apply_level(level);
        state
    }

    // === Queries ===

    pub fn level(&self) -> &'static LevelConfig {
        self.level
    }

    pub fn cat(&self) -> Cat {
        self.cat
    }

    pub fn mice(&self) -> &[Mouse] {
        &self.mice
    }

    pub fn mouse(&self, id: u32) -> Option<&Mouse> {
        self.mice.iter().find(|m| m.id == id)
    }

    pub fn mouse_at(&self, pos: Position) -> Option<&Mouse> {
        self.mice.iter().find(|m| m.pos == pos)
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    pub fn cat_score(&self) -> u32 {
        self.cat_score
    }

    pub fn mice_score(&self) -> i32 {
        self.mice_score
    }

    pub fn total_mice_caught(&self) -> u32 {
        self.total_mice_caught
    }

    pub fn level_complete(&self) -> bool {
        self.level_complete
    }

    pub fn placing_obstacles(&self) -> bool {
        self.placing_obstacles
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    pub fn mice_revision(&self) -> u64 {
        self.mice_revision
    }

    /// Id the next spawned mouse will receive
    pub fn next_mouse_id(&self) -> u32 {
        self.next_mouse_id
    }

    /// On the board and not taken by the cat, a mouse or an obstacle
    pub fn is_free(&self, pos: Position) -> bool {
        pos.is_on_board()
            && pos != self.cat.pos
            && !self.obstacles.contains(pos)
            && self.mouse_at(pos).is_none()
    }

    /// Take the events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Display grid: obstacles, then mice, then the cat on top
    pub fn grid(&self) -> Grid {
        let mut grid = [[Cell::Empty; BOARD_CELLS]; BOARD_CELLS];
        let mut put = |pos: Position, cell: Cell| {
            if pos.is_on_board() {
                grid[pos.row as usize][pos.col as usize] = cell;
            }
        };
        for pos in self.obstacles.iter() {
            put(pos, Cell::Obstacle);
        }
        for mouse in &self.mice {
            put(mouse.pos, Cell::Mouse(mouse.kind));
        }
        put(self.cat.pos, Cell::Cat);
        grid
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            level: *self.level,
            grid: self.grid(),
            cat_score: self.cat_score,
            mice_score: self.mice_score,
            total_mice_caught: self.total_mice_caught,
            mice_alive: self.mice.len(),
            level_complete: self.level_complete,
            placing_obstacles: self.placing_obstacles,
            log: self.log.iter().map(str::to_owned).collect(),
        }
    }

    // === Cat ===

    /// Step the cat one cell. Landing on a mouse catches it.
    ///
    /// Returns the caught mouse, if any.
    pub fn move_cat(&mut self, direction: Direction) -> Result<Option<Mouse>, Rejection> {
        let from = self.cat.pos;
        let target = direction.step(from);

        if !target.is_on_board() {
            return self.reject(Rejection::OffBoard);
        }
        if self.obstacles.contains(target) {
            return self.reject(Rejection::Blocked);
        }

        let caught = match self.mice.iter().position(|m| m.pos == target) {
            Some(index) => Some(self.catch_mouse(index)),
            None => None,
        };

        self.cat.pos = target;
        self.events.push(GameEvent::CatMoved { from, to: target });
        Ok(caught)
    }

    fn catch_mouse(&mut self, index: usize) -> Mouse {
        let mouse = self.mice.remove(index);
        self.mice_revision += 1;

        let points = mouse.kind.points();
        self.cat_score += points;
        self.mice_score -= CATCH_PENALTY;
        self.total_mice_caught += 1;

        log::debug!(
            "Caught mouse {} ({:?}) at {}, total {}",
            mouse.id,
            mouse.kind,
            mouse.pos,
            self.total_mice_caught
        );
        self.log.push(format!(
            "Cat caught {}! Cat +{}, Mice -{}",
            mouse.kind.name(),
            points,
            CATCH_PENALTY
        ));
        self.events.push(GameEvent::MouseCaught {
            id: mouse.id,
            pos: mouse.pos,
            kind: mouse.kind,
        });

        if self.total_mice_caught % CELEBRATION_EVERY == 0 {
            let count = self.total_mice_caught;
            self.log
                .push(format!("AMAZING! Cat caught {count} mice! CONFETTI CELEBRATION!"));
            self.events.push(GameEvent::CelebrationMilestone { count });
        }

        self.check_level_complete();
        mouse
    }

    fn check_level_complete(&mut self) {
        if self.level_complete || self.total_mice_caught < self.level.mice_to_win {
            return;
        }
        self.level_complete = true;
        let id = self.level.id;
        log::info!("Level {} complete after {} catches", id, self.total_mice_caught);
        self.log.push(format!("LEVEL {id} COMPLETE!"));
        if self.level.is_last() {
            self.log.push("CONGRATULATIONS! You've mastered all levels!");
        } else {
            self.log.push(format!("Ready for Level {}?", id + 1));
        }
        self.events.push(GameEvent::LevelCompleted { level: id });
    }

    // === Mice ===

    /// Spawn a random mouse type on a random free cell
    pub fn spawn_mouse<R: Rng>(&mut self, rng: &mut R) -> Result<u32, Rejection> {
        self.check_capacity()?;

        let free: Vec<Position> = Position::all_cells().filter(|&p| self.is_free(p)).collect();
        let Some(&pos) = free.choose(rng) else {
            return self.reject(Rejection::NoFreeCell);
        };
        let kind = MouseType::ALL[rng.random_range(0..MouseType::ALL.len())];
        Ok(self.place_mouse(pos, kind))
    }

    /// Spawn a specific mouse on a specific free cell
    pub fn spawn_mouse_at(&mut self, pos: Position, kind: MouseType) -> Result<u32, Rejection> {
        self.check_capacity()?;
        if !self.is_free(pos) {
            return self.reject(Rejection::Occupied(pos));
        }
        Ok(self.place_mouse(pos, kind))
    }

    fn check_capacity(&mut self) -> Result<(), Rejection> {
        if self.mice.len() >= self.level.max_mice {
            return self.reject(Rejection::AtCapacity {
                max: self.level.max_mice,
                level: self.level.id,
            });
        }
        Ok(())
    }

    fn place_mouse(&mut self, pos: Position, kind: MouseType) -> u32 {
        let id = self.next_mouse_id;
        self.next_mouse_id += 1;
        self.mice.push(Mouse { id, pos, kind });
        self.mice_revision += 1;

        log::debug!("Spawned mouse {} ({:?}) at {}", id, kind, pos);
        self.log.push(format!("Spawned {} at {}", kind.name(), pos));
        self.events.push(GameEvent::MouseSpawned { id, pos, kind });
        id
    }

    /// Move a mouse to a random unobstructed neighbour; off-board means escape.
    ///
    /// Cells held by the cat or another mouse are not candidates.
    pub fn move_mouse<R: Rng>(&mut self, id: u32, rng: &mut R) -> Result<MouseMove, Rejection> {
        let Some(index) = self.mice.iter().position(|m| m.id == id) else {
            return self.reject(Rejection::UnknownMouse(id));
        };
        let from = self.mice[index].pos;

        let candidates: Vec<Position> = escape_candidates(from, &self.obstacles)
            .into_iter()
            .filter(|&c| c != self.cat.pos && self.mouse_at(c).is_none())
            .collect();
        let Some(&to) = candidates.choose(rng) else {
            return self.reject(Rejection::Cornered(id));
        };

        self.mice_revision += 1;
        if to.is_on_board() {
            self.mice[index].pos = to;
            return Ok(MouseMove::Moved(to));
        }

        let mouse = self.mice.remove(index);
        self.mice_score += ESCAPE_BONUS;
        log::debug!("Mouse {} ({:?}) escaped from {}", mouse.id, mouse.kind, from);
        self.log.push(format!(
            "{} escaped! Mice +{} points",
            mouse.kind.name(),
            ESCAPE_BONUS
        ));
        self.events.push(GameEvent::MouseEscaped {
            id: mouse.id,
            kind: mouse.kind,
        });
        Ok(MouseMove::Escaped)
    }

    // === Obstacles ===

    /// Place an obstacle on an empty cell, or remove an existing one.
    ///
    /// Returns true if the cell is now blocked.
    pub fn toggle_obstacle(&mut self, pos: Position) -> Result<bool, Rejection> {
        if !pos.is_on_board() {
            return self.reject(Rejection::ObstacleOffBoard);
        }
        if pos == self.cat.pos {
            return self.reject(Rejection::ObstacleOnCat);
        }
        if self.mouse_at(pos).is_some() {
            return self.reject(Rejection::ObstacleOnMouse);
        }

        let blocked = self.obstacles.toggle(pos);
        let verb = if blocked { "Placed" } else { "Removed" };
        self.log.push(format!("{verb} obstacle at {pos}"));
        self.events.push(GameEvent::ObstacleToggled { pos, blocked });
        Ok(blocked)
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
        self.log.push("Cleared all obstacles!");
        self.events.push(GameEvent::ObstaclesCleared);
    }

    /// Flip obstacle placement mode, returning the new mode
    pub fn toggle_obstacle_mode(&mut self) -> bool {
        self.placing_obstacles = !self.placing_obstacles;
        self.placing_obstacles
    }

    /// A click on a board cell. Only acts while placing obstacles.
    pub fn select_cell(&mut self, pos: Position) -> Result<bool, Rejection> {
        if !self.placing_obstacles {
            return self.reject(Rejection::NotPlacing);
        }
        self.toggle_obstacle(pos)
    }

    // === Levels ===

    /// Reset the board to level `id`. Session scores are kept.
    pub fn load_level(&mut self, id: u8) -> Result<(), Rejection> {
        let Some(level) = LevelConfig::get(id) else {
            return self.reject(Rejection::UnknownLevel(id));
        };
        self.apply_level(level);
        Ok(())
    }

    fn apply_level(&mut self, level: &'static LevelConfig) {
        self.level = level;
        self.obstacles = ObstacleSet::from_layout(level.obstacles);
        self.mice.clear();
        self.mice_revision += 1;
        self.cat = Cat::default();
        self.total_mice_caught = 0;
        self.level_complete = false;
        self.placing_obstacles = false;

        log::info!("Loaded level {} ({})", level.id, level.name);
        self.log.push(format!(
            "Level {}: {} - {}",
            level.id, level.name, level.description
        ));
        self.events.push(GameEvent::LevelLoaded { level: level.id });
    }

    /// Advance once the current level is complete
    pub fn next_level(&mut self) -> Result<(), Rejection> {
        if !self.level_complete {
            return self.reject(Rejection::LevelIncomplete(self.level.id));
        }
        if self.level.is_last() {
            return self.reject(Rejection::LastLevel);
        }
        self.load_level(self.level.id + 1)
    }

    pub fn previous_level(&mut self) -> Result<(), Rejection> {
        if self.level.id <= FIRST_LEVEL {
            return self.reject(Rejection::FirstLevel);
        }
        self.load_level(self.level.id - 1)
    }

    /// Restart the current level and wipe session scores, log and id counter
    pub fn reset_game(&mut self) {
        self.apply_level(self.level);
        self.cat_score = 0;
        self.mice_score = 0;
        self.log.clear();
        self.next_mouse_id = FIRST_MOUSE_ID;

        let id = self.level.id;
        log::info!("Game reset on level {}", id);
        self.log.push(format!("Game reset! Level {id} restarted."));
        self.events.push(GameEvent::GameReset { level: id });
    }

    fn reject<T>(&mut self, rejection: Rejection) -> Result<T, Rejection> {
        log::debug!("Rejected: {}", rejection);
        if rejection.is_reported() {
            self.log.push(rejection.to_string());
        }
        Err(rejection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    /// Put a mouse beside the cat and step onto it
    fn catch_one(state: &mut GameState, kind: MouseType) -> Mouse {
        let cat = state.cat().pos;
        let direction = if cat.col < BOARD_SIZE - 1 {
            Direction::Right
        } else {
            Direction::Left
        };
        state
            .spawn_mouse_at(direction.step(cat), kind)
            .expect("free cell beside cat");
        state
            .move_cat(direction)
            .expect("cat move")
            .expect("mouse caught")
    }

    #[test]
    fn new_state_is_level_one() {
        let state = GameState::new();
        assert_eq!(state.level().id, 1);
        assert_eq!(state.cat().pos, Position::new(0, 0));
        assert!(state.mice().is_empty());
        assert!(state.obstacles().is_empty());
        assert_eq!(
            state.log().latest(),
            Some("Level 1: Beginner Hunt - Learn the basics! Catch 15 mice to advance.")
        );
    }

    #[test]
    fn starting_on_later_level_loads_it_once() {
        let mut state = GameState::with_level(3).unwrap();
        assert_eq!(state.level().id, 3);
        assert_eq!(state.obstacles().len(), 12);
        assert_eq!(state.log().len(), 1);
        assert_eq!(
            state.log().latest(),
            Some("Level 3: Maze Runner - Navigate complex mazes! Catch 25 mice.")
        );
        assert_eq!(state.drain_events(), vec![GameEvent::LevelLoaded { level: 3 }]);
        assert_eq!(GameState::with_level(0).err(), Some(Rejection::UnknownLevel(0)));
    }

    #[test]
    fn catch_scores_by_type() {
        for kind in MouseType::ALL {
            let mut state = GameState::new();
            let caught = catch_one(&mut state, kind);
            assert_eq!(caught.kind, kind);
            assert_eq!(state.cat_score(), kind.points());
            assert_eq!(state.mice_score(), -1);
            assert_eq!(state.total_mice_caught(), 1);
            assert!(state.mice().is_empty());
        }
    }

    #[test]
    fn catch_emits_events_in_order() {
        let mut state = GameState::new();
        state.drain_events();
        catch_one(&mut state, MouseType::Adult);
        let events = state.drain_events();
        assert!(matches!(events[0], GameEvent::MouseSpawned { kind: MouseType::Adult, .. }));
        assert!(matches!(events[1], GameEvent::MouseCaught { kind: MouseType::Adult, .. }));
        assert!(matches!(events[2], GameEvent::CatMoved { .. }));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn cat_stops_at_board_edge_silently() {
        let mut state = GameState::new();
        let log_len = state.log().len();
        assert_eq!(state.move_cat(Direction::Up), Err(Rejection::OffBoard));
        assert_eq!(state.move_cat(Direction::Left), Err(Rejection::OffBoard));
        assert_eq!(state.cat().pos, Position::new(0, 0));
        assert_eq!(state.log().len(), log_len);
    }

    #[test]
    fn obstacle_blocks_cat_and_is_logged() {
        let mut state = GameState::new();
        state.toggle_obstacle(Position::new(1, 0)).unwrap();
        assert_eq!(state.move_cat(Direction::Down), Err(Rejection::Blocked));
        assert_eq!(state.cat().pos, Position::new(0, 0));
        assert_eq!(state.log().latest(), Some("Cat cannot move through obstacles!"));
    }

    #[test]
    fn obstacle_refused_on_cat_and_mouse() {
        let mut state = GameState::new();
        state.spawn_mouse_at(Position::new(3, 3), MouseType::Baby).unwrap();

        assert_eq!(state.toggle_obstacle(Position::new(0, 0)), Err(Rejection::ObstacleOnCat));
        assert_eq!(state.log().latest(), Some("Cannot place obstacle on cat position!"));
        assert_eq!(state.toggle_obstacle(Position::new(3, 3)), Err(Rejection::ObstacleOnMouse));
        assert_eq!(state.log().latest(), Some("Cannot place obstacle on mouse position!"));
        assert!(state.obstacles().is_empty());
    }

    #[test]
    fn obstacle_toggle_logs_action() {
        let mut state = GameState::new();
        assert_eq!(state.toggle_obstacle(Position::new(2, 7)), Ok(true));
        assert_eq!(state.log().latest(), Some("Placed obstacle at (2, 7)"));
        assert_eq!(state.toggle_obstacle(Position::new(2, 7)), Ok(false));
        assert_eq!(state.log().latest(), Some("Removed obstacle at (2, 7)"));
        state.toggle_obstacle(Position::new(4, 4)).unwrap();
        state.clear_obstacles();
        assert!(state.obstacles().is_empty());
    }

    #[test]
    fn select_cell_needs_placement_mode() {
        let mut state = GameState::new();
        assert_eq!(state.select_cell(Position::new(5, 5)), Err(Rejection::NotPlacing));
        assert!(state.toggle_obstacle_mode());
        assert_eq!(state.select_cell(Position::new(5, 5)), Ok(true));
        state.load_level(1).unwrap();
        assert!(!state.placing_obstacles());
    }

    #[test]
    fn spawn_respects_capacity() {
        let mut state = GameState::new();
        let mut rng = rng();
        for _ in 0..state.level().max_mice {
            state.spawn_mouse(&mut rng).unwrap();
        }
        assert_eq!(
            state.spawn_mouse(&mut rng),
            Err(Rejection::AtCapacity { max: 10, level: 1 })
        );
        assert_eq!(state.mice().len(), 10);
        assert_eq!(state.log().latest(), Some("Maximum 10 mice allowed on Level 1!"));
    }

    #[test]
    fn spawn_fails_without_free_cell() {
        let mut state = GameState::new();
        let cat = state.cat().pos;
        for pos in Position::all_cells().filter(|&p| p != cat) {
            state.toggle_obstacle(pos).unwrap();
        }
        assert_eq!(state.spawn_mouse(&mut rng()), Err(Rejection::NoFreeCell));
        assert_eq!(state.log().latest(), Some("No empty cells to spawn mouse!"));
    }

    #[test]
    fn spawn_lands_on_free_cells_with_fresh_ids() {
        let mut state = GameState::with_level(3).unwrap();
        let mut rng = rng();
        let ids: Vec<u32> = (0..15).map(|_| state.spawn_mouse(&mut rng).unwrap()).collect();
        assert_eq!(ids, (1..=15).collect::<Vec<_>>());
        for mouse in state.mice() {
            assert!(!state.obstacles().contains(mouse.pos));
            assert_ne!(mouse.pos, state.cat().pos);
        }
    }

    #[test]
    fn spawn_at_occupied_cell_is_refused() {
        let mut state = GameState::with_level(2).unwrap();
        assert_eq!(
            state.spawn_mouse_at(Position::new(4, 4), MouseType::Baby),
            Err(Rejection::Occupied(Position::new(4, 4)))
        );
        assert_eq!(
            state.spawn_mouse_at(Position::new(0, 0), MouseType::Baby),
            Err(Rejection::Occupied(Position::new(0, 0)))
        );
        assert!(state.mice().is_empty());
    }

    #[test]
    fn boxed_in_corner_mouse_escapes() {
        let mut state = GameState::new();
        state.move_cat(Direction::Right).unwrap();
        state.move_cat(Direction::Right).unwrap();
        let corner = Position::new(0, 9);
        for pos in [Position::new(0, 8), Position::new(1, 8), Position::new(1, 9)] {
            state.toggle_obstacle(pos).unwrap();
        }
        let id = state.spawn_mouse_at(corner, MouseType::Grand).unwrap();
        let cat_score = state.cat_score();

        assert_eq!(state.move_mouse(id, &mut rng()), Ok(MouseMove::Escaped));
        assert!(state.mice().is_empty());
        assert_eq!(state.mice_score(), 5);
        assert_eq!(state.cat_score(), cat_score);
        assert_eq!(state.log().latest(), Some("Grand Mouse escaped! Mice +5 points"));
    }

    #[test]
    fn surrounded_mouse_stays_put() {
        let mut state = GameState::new();
        let center = Position::new(5, 5);
        let id = state.spawn_mouse_at(center, MouseType::Baby).unwrap();
        for d_row in -1..=1 {
            for d_col in -1..=1 {
                if d_row != 0 || d_col != 0 {
                    state.toggle_obstacle(center.offset(d_row, d_col)).unwrap();
                }
            }
        }
        assert_eq!(state.move_mouse(id, &mut rng()), Err(Rejection::Cornered(id)));
        assert_eq!(state.mouse(id).map(|m| m.pos), Some(center));
    }

    #[test]
    fn mouse_never_steps_onto_cat_or_mouse() {
        let mut state = GameState::new();
        let mut rng = rng();
        // Cat at (0,0), mouse at (1,1) boxed so only (0,0) and (1,0) would be open
        let id = state.spawn_mouse_at(Position::new(1, 1), MouseType::Child).unwrap();
        state.spawn_mouse_at(Position::new(1, 0), MouseType::Baby).unwrap();
        for pos in [
            Position::new(0, 1),
            Position::new(0, 2),
            Position::new(1, 2),
            Position::new(2, 0),
            Position::new(2, 1),
            Position::new(2, 2),
        ] {
            state.toggle_obstacle(pos).unwrap();
        }
        assert_eq!(state.move_mouse(id, &mut rng), Err(Rejection::Cornered(id)));
    }

    #[test]
    fn unknown_mouse_is_silent() {
        let mut state = GameState::new();
        let log_len = state.log().len();
        assert_eq!(state.move_mouse(99, &mut rng()), Err(Rejection::UnknownMouse(99)));
        assert_eq!(state.log().len(), log_len);
    }

    #[test]
    fn celebration_every_fifth_catch() {
        let mut state = GameState::new();
        let mut milestones = Vec::new();
        for _ in 0..10 {
            catch_one(&mut state, MouseType::Baby);
            milestones.extend(state.drain_events().into_iter().filter_map(|e| match e {
                GameEvent::CelebrationMilestone { count } => Some(count),
                _ => None,
            }));
        }
        assert_eq!(milestones, vec![5, 10]);
    }

    #[test]
    fn level_completes_exactly_once() {
        let mut state = GameState::new();
        let mut completions = 0;
        for _ in 0..17 {
            catch_one(&mut state, MouseType::Baby);
            completions += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::LevelCompleted { .. }))
                .count();
        }
        assert!(state.level_complete());
        assert_eq!(completions, 1);
        assert!(state.log().iter().any(|m| m == "Ready for Level 2?"));
    }

    #[test]
    fn next_level_requires_completion() {
        let mut state = GameState::new();
        assert_eq!(state.next_level(), Err(Rejection::LevelIncomplete(1)));
        for _ in 0..15 {
            catch_one(&mut state, MouseType::Grand);
        }
        state.next_level().unwrap();
        assert_eq!(state.level().id, 2);
        assert_eq!(state.total_mice_caught(), 0);
        assert!(!state.level_complete());
        assert_eq!(state.obstacles().len(), 4);
        // Session scores carry over
        assert_eq!(state.cat_score(), 60);
        assert_eq!(state.mice_score(), -15);
    }

    #[test]
    fn last_level_has_no_successor() {
        let mut state = GameState::with_level(5).unwrap();
        for _ in 0..40 {
            let cat = state.cat().pos;
            // Level 5 keeps row 0 clear, so walk the top row back and forth
            let direction = if cat.col < BOARD_SIZE - 1 {
                Direction::Right
            } else {
                Direction::Left
            };
            state.spawn_mouse_at(direction.step(cat), MouseType::Baby).unwrap();
            state.move_cat(direction).unwrap();
        }
        assert!(state.level_complete());
        assert!(state.log().iter().any(|m| m.starts_with("CONGRATULATIONS")));
        assert_eq!(state.next_level(), Err(Rejection::LastLevel));
        assert_eq!(state.level().id, 5);
    }

    #[test]
    fn previous_level_keeps_session_scores() {
        let mut state = GameState::with_level(2).unwrap();
        catch_one(&mut state, MouseType::Adult);
        state.previous_level().unwrap();
        assert_eq!(state.level().id, 1);
        assert_eq!(state.cat_score(), 3);
        assert_eq!(state.mice_score(), -1);
        assert_eq!(state.total_mice_caught(), 0);
        assert_eq!(state.previous_level(), Err(Rejection::FirstLevel));
    }

    #[test]
    fn load_level_restores_layout() {
        let mut state = GameState::new();
        state.spawn_mouse_at(Position::new(6, 6), MouseType::Baby).unwrap();
        state.move_cat(Direction::Down).unwrap();
        state.toggle_obstacle(Position::new(9, 9)).unwrap();

        state.load_level(4).unwrap();
        let expected = ObstacleSet::from_layout(super::super::level::LEVELS[3].obstacles);
        assert_eq!(state.obstacles(), &expected);
        assert!(state.mice().is_empty());
        assert_eq!(state.cat().pos, Position::new(0, 0));
        assert_eq!(state.load_level(9), Err(Rejection::UnknownLevel(9)));
        assert_eq!(state.level().id, 4);
    }

    #[test]
    fn reset_wipes_session() {
        let mut state = GameState::new();
        catch_one(&mut state, MouseType::Grand);
        state.spawn_mouse_at(Position::new(7, 7), MouseType::Baby).unwrap();
        state.reset_game();

        assert_eq!(state.cat_score(), 0);
        assert_eq!(state.mice_score(), 0);
        assert!(state.mice().is_empty());
        assert_eq!(state.next_mouse_id(), FIRST_MOUSE_ID);
        assert_eq!(state.log().iter().collect::<Vec<_>>(), vec!["Game reset! Level 1 restarted."]);
    }

    #[test]
    fn log_keeps_ten_newest() {
        let mut log = GameLog::default();
        for i in 0..15 {
            log.push(format!("m{i}"));
        }
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log.latest(), Some("m14"));
        assert_eq!(log.iter().last(), Some("m5"));
    }

    #[test]
    fn grid_layers_cat_over_everything() {
        let mut state = GameState::with_level(2).unwrap();
        state.spawn_mouse_at(Position::new(9, 9), MouseType::Adult).unwrap();
        let grid = state.grid();
        assert_eq!(grid[0][0], Cell::Cat);
        assert_eq!(grid[4][4], Cell::Obstacle);
        assert_eq!(grid[9][9], Cell::Mouse(MouseType::Adult));
        assert_eq!(grid[3][3], Cell::Empty);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.level.id, 2);
        assert_eq!(snapshot.mice_alive, 1);
        assert!(serde_json::to_string(&snapshot).is_ok());
    }
}
