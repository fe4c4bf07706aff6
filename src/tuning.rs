//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives in [`Tuning`]. Defaults
//! mirror [`crate::consts`]; a JSON document can override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Runtime-tunable gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Clock ===
    /// Simulated milliseconds per tick
    pub tick_ms: u64,

    // === Arena geometry ===
    /// Spawn distance from center
    pub orbital_radius: f32,
    /// Radius of the hit ring
    pub hit_ring_radius: f32,
    /// Half-width of the hit band around the ring
    pub hit_band_half_width: f32,

    // === Rifts ===
    /// Radial tolerance around the ring for rift activation
    pub rift_radial_tolerance: f32,
    /// Angular tolerance (degrees, exclusive) for rift activation
    pub rift_angular_tolerance: f32,
    /// Ticks a rift survives after being created
    pub rift_lifetime_ticks: u32,

    // === Combo ===
    /// Max gap between hits that keeps a combo alive
    pub combo_window_ms: u64,

    // === Power-ups ===
    pub slow_time_ticks: u32,
    pub double_score_ticks: u32,
    pub shield_ticks: u32,
    /// Target speed multiplier while slow-time is active
    pub slow_time_factor: f32,

    // === Lives ===
    pub starting_lives: u8,
    pub rift_life_cap: u8,
    pub max_lives: u8,

    // === Pacing ===
    /// Delay between a completed wave and its successor's first target
    pub wave_transition_ticks: u32,
    /// Crackle effect length after losing a life
    pub failure_effect_ticks: u32,

    // === Tutorial ===
    pub tutorial_target_speed: f32,
    /// Delay before the rift-attempt target appears
    pub tutorial_rift_delay_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,

            orbital_radius: ORBITAL_RADIUS,
            hit_ring_radius: HIT_RING_RADIUS,
            hit_band_half_width: HIT_BAND_HALF_WIDTH,

            rift_radial_tolerance: 20.0,
            rift_angular_tolerance: 15.0,
            rift_lifetime_ticks: 500,

            combo_window_ms: 2000,

            slow_time_ticks: 300,
            double_score_ticks: 600,
            shield_ticks: 180,
            slow_time_factor: 0.3,

            starting_lives: STARTING_LIVES,
            rift_life_cap: RIFT_LIFE_CAP,
            max_lives: MAX_LIVES,

            wave_transition_ticks: 120,
            failure_effect_ticks: 10,

            tutorial_target_speed: 3.0,
            tutorial_rift_delay_ticks: 60,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Inner edge of the hit band; targets below it have missed
    #[inline]
    pub fn hit_zone_inner(&self) -> f32 {
        self.hit_ring_radius - self.hit_band_half_width
    }

    /// Outer edge of the hit band
    #[inline]
    pub fn hit_zone_outer(&self) -> f32 {
        self.hit_ring_radius + self.hit_band_half_width
    }

    /// Whether a radius lies inside the (inclusive) hit band
    pub fn in_hit_band(&self, radius: f32) -> bool {
        (self.hit_zone_inner()..=self.hit_zone_outer()).contains(&radius)
    }

    /// Whether a radius is close enough to the ring for rift activation
    pub fn in_rift_band(&self, radius: f32) -> bool {
        let lo = self.hit_ring_radius - self.rift_radial_tolerance;
        let hi = self.hit_ring_radius + self.rift_radial_tolerance;
        (lo..=hi).contains(&radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_band() {
        let t = Tuning::default();
        assert_eq!(t.hit_zone_inner(), 20.0);
        assert_eq!(t.hit_zone_outer(), 140.0);
        assert!(t.in_hit_band(20.0));
        assert!(t.in_hit_band(140.0));
        assert!(!t.in_hit_band(140.5));
        assert!(t.in_rift_band(100.0));
        assert!(!t.in_rift_band(101.0));
    }

    #[test]
    fn test_partial_json_override() {
        let t = Tuning::from_json(r#"{ "combo_window_ms": 1500, "shield_ticks": 90 }"#).unwrap();
        assert_eq!(t.combo_window_ms, 1500);
        assert_eq!(t.shield_ticks, 90);
        assert_eq!(t.slow_time_ticks, 300);
        assert_eq!(t.tick_ms, 16);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }
}
