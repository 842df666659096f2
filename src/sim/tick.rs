//! Timer-driven simulation
//!
//! Two independent periodic timers drive the autonomous side of the game: the mouse-move
//! timer (level cadence) and the auto-spawn timer (fixed cadence). Time only advances
//! through `Simulation::advance`, so tests drive ticks by hand.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::board::{Direction, Position};
use super::entities::MouseType;
use super::state::{GameEvent, GameState, Rejection};
use crate::settings::{Settings, SettingsError};

/// A re-armable periodic timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    interval: Duration,
    elapsed: Duration,
}

impl Timer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Restart the countdown, optionally with a new interval
    pub fn rearm(&mut self, interval: Duration) {
        self.interval = interval;
        self.elapsed = Duration::ZERO;
    }

    /// Time until the next firing (never for a zero interval)
    pub fn remaining(&self) -> Duration {
        if self.interval.is_zero() {
            return Duration::MAX;
        }
        self.interval.saturating_sub(self.elapsed)
    }

    /// Add `dt` and report whether the timer fired. Fires at most once per call.
    pub fn elapse(&mut self, dt: Duration) -> bool {
        if self.interval.is_zero() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            return true;
        }
        false
    }
}

/// Player and presentation commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveCat(Direction),
    SpawnMouse,
    /// Place a mouse of a given type on a chosen free cell
    SpawnMouseAt(Position, MouseType),
    MoveMouse(u32),
    ToggleObstacle(Position),
    SelectCell(Position),
    ClearObstacles,
    ToggleObstacleMode,
    LoadLevel(u8),
    NextLevel,
    PreviousLevel,
    ResetGame,
}

/// Why a simulation could not start
#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Level(#[from] Rejection),
}

/// What the timers depend on; a change re-arms them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Watch {
    level: u8,
    mice_revision: u64,
    population: usize,
}

impl Watch {
    fn of(state: &GameState) -> Self {
        Self {
            level: state.level().id,
            mice_revision: state.mice_revision(),
            population: state.mice().len(),
        }
    }
}

/// Session state plus the seeded RNG and timers that animate it
#[derive(Debug, Clone)]
pub struct Simulation {
    state: GameState,
    rng: Pcg32,
    move_timer: Timer,
    spawn_timer: Timer,
    mouse_move_chance: f64,
    auto_spawn: bool,
    watch: Watch,
    /// Simulated time since start
    clock: Duration,
}

impl Simulation {
    /// Create a simulation, rejecting out-of-range settings
    pub fn new(seed: u64, settings: &Settings) -> Result<Self, StartError> {
        settings.validate()?;
        let state = GameState::with_level(settings.starting_level)?;
        let watch = Watch::of(&state);
        let move_timer = Timer::new(state.level().mouse_move_interval());
        log::info!(
            "Simulation seeded with {} on level {}",
            seed,
            state.level().id
        );
        Ok(Self {
            state,
            rng: Pcg32::seed_from_u64(seed),
            move_timer,
            spawn_timer: Timer::new(Duration::from_millis(settings.spawn_interval_ms)),
            mouse_move_chance: settings.mouse_move_chance,
            auto_spawn: settings.auto_spawn,
            watch,
            clock: Duration::ZERO,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn move_timer(&self) -> &Timer {
        &self.move_timer
    }

    pub fn spawn_timer(&self) -> &Timer {
        &self.spawn_timer
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Run one command against the state, then re-arm timers if needed
    pub fn apply(&mut self, command: Command) -> Result<(), Rejection> {
        let result = match command {
            Command::MoveCat(direction) => self.state.move_cat(direction).map(|_| ()),
            Command::SpawnMouse => self.state.spawn_mouse(&mut self.rng).map(|_| ()),
            Command::SpawnMouseAt(pos, kind) => self.state.spawn_mouse_at(pos, kind).map(|_| ()),
            Command::MoveMouse(id) => self.state.move_mouse(id, &mut self.rng).map(|_| ()),
            Command::ToggleObstacle(pos) => self.state.toggle_obstacle(pos).map(|_| ()),
            Command::SelectCell(pos) => self.state.select_cell(pos).map(|_| ()),
            Command::ClearObstacles => {
                self.state.clear_obstacles();
                Ok(())
            }
            Command::ToggleObstacleMode => {
                self.state.toggle_obstacle_mode();
                Ok(())
            }
            Command::LoadLevel(id) => self.state.load_level(id),
            Command::NextLevel => self.state.next_level(),
            Command::PreviousLevel => self.state.previous_level(),
            Command::ResetGame => {
                self.state.reset_game();
                Ok(())
            }
        };
        self.rearm_if_changed();
        result
    }

    /// Advance simulated time, firing timers in chronological order.
    ///
    /// When both timers are due at the same instant the mouse-move tick runs first.
    pub fn advance(&mut self, mut dt: Duration) {
        while !dt.is_zero() {
            let step = self
                .move_timer
                .remaining()
                .min(self.spawn_timer.remaining())
                .min(dt);
            dt -= step;
            self.clock += step;

            let move_due = self.move_timer.elapse(step);
            let spawn_due = self.spawn_timer.elapse(step);
            if move_due {
                self.mouse_tick();
            }
            if spawn_due {
                self.spawn_tick();
            }
            self.rearm_if_changed();
        }
    }

    /// Each live mouse independently tries to move
    fn mouse_tick(&mut self) {
        let ids: Vec<u32> = self.state.mice().iter().map(|m| m.id).collect();
        log::trace!("Mouse tick at {:?}: {} mice", self.clock, ids.len());
        for id in ids {
            if self.rng.random_bool(self.mouse_move_chance) {
                if let Err(rejection) = self.state.move_mouse(id, &mut self.rng) {
                    log::trace!("Mouse {} stayed: {}", id, rejection);
                }
            }
        }
    }

    fn spawn_tick(&mut self) {
        if !self.auto_spawn {
            return;
        }
        let level = self.state.level();
        if self.state.mice().len() >= level.max_mice {
            return;
        }
        if self.rng.random_bool(level.spawn_probability) {
            log::trace!("Auto-spawn at {:?}", self.clock);
            // Refusals are already in the game log
            let _ = self.state.spawn_mouse(&mut self.rng);
        }
    }

    fn rearm_if_changed(&mut self) {
        let now = Watch::of(&self.state);
        if now == self.watch {
            return;
        }
        let interval = self.state.level().mouse_move_interval();
        if now.mice_revision != self.watch.mice_revision || now.level != self.watch.level {
            self.move_timer.rearm(interval);
        }
        if now.population != self.watch.population || now.level != self.watch.level {
            let spawn_interval = self.spawn_timer.interval();
            self.spawn_timer.rearm(spawn_interval);
        }
        self.watch = now;
    }
}
