//! Effect requests emitted by the simulation
//!
//! The core never calls audio, rendering or persistence directly. Every tick
//! and tap appends to an ordered event list that the embedding shell drains.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::audio::{MusicRequest, SoundCue};
use crate::stats::GameSummary;

/// Explosion colors (0xRRGGBB)
pub mod colors {
    pub const GOLD: u32 = 0xFFD700;
    pub const GREEN: u32 = 0x00FF00;
    pub const MAGENTA: u32 = 0xFF00FF;
    pub const RED: u32 = 0xFF4444;
    pub const CYAN: u32 = 0x00FFFF;
}

/// Cosmetic requests for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VisualEffect {
    Explosion { pos: Vec2, color: u32, count: u32 },
    Sparks { pos: Vec2, count: u32 },
    ScreenShake { intensity: f32, duration_ticks: u32 },
    Ripple { pos: Vec2 },
    /// Particles flying from the ring to the score display
    ScoreBurst { count: u32 },
    /// Expanding mandala from the ring
    Mandala,
    WaveParticles { color: u32, count: u32 },
    /// Comet trail of the previous target should be dropped
    TrailReset,
    /// Ring crackle after losing a life
    Crackle { duration_ticks: u32 },
    /// "WAVE n" banner during the transition
    WaveBanner { wave: u32, boss: bool, duration_ticks: u32 },
}

/// One-shot notifications for the host shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    ScoreChanged { score: u64, lives: u8, wave: u32 },
    /// Carries everything the statistics store needs
    GameOver(GameSummary),
    WaveComplete { wave: u32 },
    TutorialComplete,
    /// Tutorial message changed (step advanced or hint shown)
    TutorialMessage { step: usize, message: String },
}

/// A single side-effect request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound { cue: SoundCue, pitch: f32 },
    /// Background track starts with a game and pauses when it ends
    Music(MusicRequest),
    Visual(VisualEffect),
    Notify(Notification),
}

impl GameEvent {
    pub fn sound(cue: SoundCue) -> Self {
        GameEvent::Sound { cue, pitch: 1.0 }
    }
}
