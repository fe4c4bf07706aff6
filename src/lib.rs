//! Celestial Weaver - a tap-timing orbital arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (waves, targets, timers, hit resolution, state machine)
//! - `session`: Fixed-step scheduler that feeds collaborators from simulation events
//! - `stats` / `achievements`: Lifetime statistics and unlock evaluation
//! - `audio`: Sound cue contract and volume mixing
//! - `ambient`: Background animation, independent of the simulation
//! - `tuning`: Data-driven game balance

pub mod achievements;
pub mod ambient;
pub mod audio;
pub mod error;
pub mod session;
pub mod settings;
pub mod sim;
pub mod stats;
pub mod tuning;

pub use achievements::{Achievement, AchievementId};
pub use error::StoreError;
pub use session::Session;
pub use settings::Settings;
pub use stats::{GameSummary, LifetimeStats, StatsStore};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const TICK_MS: u64 = 16;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Distance from center at which targets spawn
    pub const ORBITAL_RADIUS: f32 = 360.0;
    /// Radius of the golden hit ring
    pub const HIT_RING_RADIUS: f32 = 80.0;
    /// Half-width of the hit band around the ring
    pub const HIT_BAND_HALF_WIDTH: f32 = 60.0;

    /// Starting lives for a new game
    pub const STARTING_LIVES: u8 = 10;
    /// Rifts only grant a life while below this
    pub const RIFT_LIFE_CAP: u8 = 10;
    /// Extra-life power-ups stop granting at this
    pub const MAX_LIVES: u8 = 15;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Shortest angular distance between two angles in degrees, in [0, 180]
#[inline]
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let delta = (normalize_degrees(a) - normalize_degrees(b)).abs();
    delta.min(360.0 - delta)
}

/// Convert polar (r, degrees) to cartesian (x, y) relative to the arena center
#[inline]
pub fn polar_to_cartesian(r: f32, degrees: f32) -> Vec2 {
    let theta = degrees.to_radians();
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert!((normalize_degrees(725.0) - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_angular_distance_wraps() {
        assert!((angular_distance(355.0, 5.0) - 10.0).abs() < 1e-4);
        assert!((angular_distance(5.0, 355.0) - 10.0).abs() < 1e-4);
        assert!((angular_distance(90.0, 270.0) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(10.0, 90.0);
        assert!(p.x.abs() < 1e-4);
        assert!((p.y - 10.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn angular_distance_is_symmetric_and_bounded(a in -720.0f32..720.0, b in -720.0f32..720.0) {
            let d1 = angular_distance(a, b);
            let d2 = angular_distance(b, a);
            prop_assert!((d1 - d2).abs() < 1e-3);
            prop_assert!((0.0..=180.0 + 1e-3).contains(&d1));
        }
    }
}
