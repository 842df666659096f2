//! Sound cues for game events
//!
//! Procedural tone recipes only; a presentation layer with an audio backend turns each
//! `Tone` into an oscillator burst.

use crate::sim::GameEvent;

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// One oscillator burst, started `offset_ms` after the cue begins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    pub duration_s: f32,
    pub waveform: Waveform,
    pub offset_ms: u32,
}

const fn tone(freq_hz: f32, duration_s: f32, waveform: Waveform, offset_ms: u32) -> Tone {
    Tone {
        freq_hz,
        duration_s,
        waveform,
        offset_ms,
    }
}

const CAT_MOVE: &[Tone] = &[tone(200.0, 0.1, Waveform::Sawtooth, 0)];

const MOUSE_CATCH: &[Tone] = &[
    tone(150.0, 0.1, Waveform::Square, 0),
    tone(300.0, 0.1, Waveform::Square, 50),
    tone(600.0, 0.1, Waveform::Triangle, 100),
    tone(440.0, 0.2, Waveform::Sine, 150),
];

const MOUSE_ESCAPE: &[Tone] = &[
    tone(800.0, 0.1, Waveform::Triangle, 0),
    tone(600.0, 0.1, Waveform::Triangle, 100),
    tone(400.0, 0.2, Waveform::Triangle, 200),
];

const MOUSE_SPAWN: &[Tone] = &[
    tone(1000.0, 0.05, Waveform::Sine, 0),
    tone(1200.0, 0.05, Waveform::Sine, 50),
];

// C E G C, delayed slightly behind the visual effect
const CELEBRATION: &[Tone] = &[
    tone(523.0, 0.2, Waveform::Sine, 100),
    tone(659.0, 0.2, Waveform::Sine, 250),
    tone(784.0, 0.2, Waveform::Sine, 400),
    tone(1047.0, 0.4, Waveform::Sine, 550),
];

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Subtle low tone
    CatMove,
    /// Explosive boom
    MouseCatch,
    /// Descending tones
    MouseEscape,
    /// Quick chirp
    MouseSpawn,
    /// Rising arpeggio for milestones and level completion
    Celebration,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::CatMoved { .. } => Some(SoundEffect::CatMove),
            GameEvent::MouseCaught { .. } => Some(SoundEffect::MouseCatch),
            GameEvent::MouseEscaped { .. } => Some(SoundEffect::MouseEscape),
            GameEvent::MouseSpawned { .. } => Some(SoundEffect::MouseSpawn),
            GameEvent::CelebrationMilestone { .. } | GameEvent::LevelCompleted { .. } => {
                Some(SoundEffect::Celebration)
            }
            _ => None,
        }
    }

    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::CatMove => CAT_MOVE,
            SoundEffect::MouseCatch => MOUSE_CATCH,
            SoundEffect::MouseEscape => MOUSE_ESCAPE,
            SoundEffect::MouseSpawn => MOUSE_SPAWN,
            SoundEffect::Celebration => CELEBRATION,
        }
    }

    /// Total length including the last tone's tail, in milliseconds
    pub fn length_ms(&self) -> u32 {
        self.tones()
            .iter()
            .map(|t| t.offset_ms + (t.duration_s * 1000.0).round() as u32)
            .max()
            .unwrap_or(0)
    }
}

/// Picks cues for batches of events
#[derive(Debug, Clone, Default)]
pub struct AudioManager {
    muted: bool,
}

impl AudioManager {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Cues to play for `events`, in order
    pub fn cues(&self, events: &[GameEvent]) -> Vec<SoundEffect> {
        if self.muted {
            return Vec::new();
        }
        events.iter().filter_map(SoundEffect::for_event).collect()
    }
}
