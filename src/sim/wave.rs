//! Wave policy
//!
//! Pure mapping from wave number to difficulty parameters. Tiers are checked
//! in order, so wave 5 lands in the medium tier while 10, 15, ... are boss waves.

use serde::{Deserialize, Serialize};

/// Difficulty parameters for one wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    /// Targets that must be completed to clear the wave
    pub target_count: u32,
    pub base_speed: f32,
    /// Speed added per completed target
    pub speed_increase: f32,
    pub max_speed: f32,
    pub rift_chance: f32,
    pub power_up_chance: f32,
    pub special_chance: f32,
    pub is_boss_wave: bool,
}

impl WaveConfig {
    /// Speed of the target spawned after `completed` targets, capped at `max_speed`
    pub fn speed_for(&self, completed: u32) -> f32 {
        (self.base_speed + completed as f32 * self.speed_increase).min(self.max_speed)
    }
}

/// Difficulty parameters for a 1-based wave number
///
/// # Panics
/// Panics on wave 0; waves start at 1 and only ever increment.
pub fn wave_config(wave: u32) -> WaveConfig {
    assert!(wave >= 1, "wave numbers start at 1 (got {wave})");
    let w = wave as f32;

    if wave <= 3 {
        // Easy tier
        WaveConfig {
            target_count: 5 + wave * 2,
            base_speed: 3.0 + w * 0.5,
            speed_increase: 0.1,
            max_speed: 8.0,
            rift_chance: 0.15,
            power_up_chance: 0.1,
            special_chance: 0.05,
            is_boss_wave: false,
        }
    } else if wave <= 6 {
        // Medium tier
        WaveConfig {
            target_count: 8 + wave * 2,
            base_speed: 5.0 + w * 0.3,
            speed_increase: 0.15,
            max_speed: 12.0,
            rift_chance: 0.20,
            power_up_chance: 0.15,
            special_chance: 0.1,
            is_boss_wave: false,
        }
    } else if wave.is_multiple_of(5) {
        // Boss wave: one slow multi-hit target
        WaveConfig {
            target_count: 1,
            base_speed: 2.0,
            speed_increase: 0.0,
            max_speed: 2.0,
            rift_chance: 0.0,
            power_up_chance: 0.0,
            special_chance: 0.0,
            is_boss_wave: true,
        }
    } else {
        // Hard tier
        WaveConfig {
            target_count: 12 + wave,
            base_speed: 7.0 + w * 0.2,
            speed_increase: 0.2,
            max_speed: 15.0 + w * 0.5,
            rift_chance: 0.25,
            power_up_chance: 0.2,
            special_chance: 0.15,
            is_boss_wave: false,
        }
    }
}

/// Health of the boss that guards a boss wave
pub fn boss_health(wave: u32) -> u32 {
    3 + wave / 5
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wave_boundary_routing() {
        assert!(!wave_config(5).is_boss_wave);
        assert!(wave_config(10).is_boss_wave);
        assert!(!wave_config(7).is_boss_wave);
        assert!(wave_config(15).is_boss_wave);
    }

    #[test]
    fn test_easy_tier_wave_one() {
        let cfg = wave_config(1);
        assert_eq!(cfg.target_count, 7);
        assert!((cfg.base_speed - 3.5).abs() < 1e-6);
        assert_eq!(cfg.max_speed, 8.0);
    }

    #[test]
    fn test_medium_and_hard_tiers() {
        let medium = wave_config(5);
        assert_eq!(medium.target_count, 18);
        assert!((medium.base_speed - 6.5).abs() < 1e-5);
        assert_eq!(medium.max_speed, 12.0);

        let hard = wave_config(7);
        assert_eq!(hard.target_count, 19);
        assert!((hard.base_speed - 8.4).abs() < 1e-5);
        assert!((hard.max_speed - 18.5).abs() < 1e-5);
    }

    #[test]
    fn test_boss_wave_is_single_slow_target() {
        let boss = wave_config(10);
        assert_eq!(boss.target_count, 1);
        assert_eq!(boss.speed_for(0), 2.0);
        assert_eq!(boss.power_up_chance, 0.0);
        assert_eq!(boss.special_chance, 0.0);
        assert_eq!(boss_health(10), 5);
    }

    #[test]
    #[should_panic]
    fn test_wave_zero_is_fatal() {
        wave_config(0);
    }

    proptest! {
        #[test]
        fn speed_is_monotonic_and_capped(wave in 1u32..200, n in 0u32..300) {
            let cfg = wave_config(wave);
            let a = cfg.speed_for(n);
            let b = cfg.speed_for(n + 1);
            prop_assert!(a <= b);
            prop_assert!(b <= cfg.max_speed);
            prop_assert!(a > 0.0);
        }
    }
}
