//! Targets, rifts, and the target generator

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::wave::{WaveConfig, boss_health};
use crate::polar_to_cartesian;

/// Payload carried by a power-up target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    ExtraLife,
    SlowTime,
    DoubleScore,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::ExtraLife,
        PowerUpKind::SlowTime,
        PowerUpKind::DoubleScore,
        PowerUpKind::Shield,
    ];
}

/// Target variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    Normal,
    PowerUp(PowerUpKind),
    /// Worth a flat bonus on top of the baseline
    Special,
    /// Multi-hit; persists until health reaches 0
    Boss { health: u32 },
}

/// An orb falling inward toward the hit ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Spawn-order id, unique within a game
    pub id: u32,
    /// Degrees in [0, 360)
    pub angle: f32,
    /// Distance from center (decreases every tick)
    pub radius: f32,
    /// Radial units per tick
    pub speed: f32,
    pub kind: TargetKind,
}

impl Target {
    /// Position relative to the arena center
    pub fn pos(&self) -> Vec2 {
        polar_to_cartesian(self.radius, self.angle)
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, TargetKind::Boss { .. })
    }
}

/// Temporal remnant left where a target was hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rift {
    pub angle: f32,
    /// Remaining lifetime; removed at 0
    pub life_ticks: u32,
}

/// Draw the next target for a wave
///
/// Uses one uniform draw for the kind: power-up below `power_up_chance`,
/// special below `power_up_chance + special_chance`, otherwise normal.
pub fn generate_target<R: Rng>(
    rng: &mut R,
    id: u32,
    wave: u32,
    config: &WaveConfig,
    completed_in_wave: u32,
    orbital_radius: f32,
) -> Target {
    let kind = if config.is_boss_wave {
        TargetKind::Boss {
            health: boss_health(wave),
        }
    } else {
        let roll: f32 = rng.random();
        if roll < config.power_up_chance {
            let payload = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
            TargetKind::PowerUp(payload)
        } else if roll < config.power_up_chance + config.special_chance {
            TargetKind::Special
        } else {
            TargetKind::Normal
        }
    };

    let angle = rng.random_range(0.0..360.0);

    Target {
        id,
        angle,
        radius: orbital_radius,
        speed: config.speed_for(completed_in_wave),
        kind,
    }
}
