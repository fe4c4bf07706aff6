//! Background animation
//!
//! Runs on the same fixed tick as the simulation but owns its own RNG and
//! never reads or writes `GameState`, so replays are unaffected by it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::HIT_RING_RADIUS;

const STAR_COUNT: usize = 150;
/// One in this many ticks spawns a shooting star (on average)
const SHOOTING_STAR_ODDS: u32 = 100;
const BREATHING_STEP: f32 = 0.03;

/// A drifting background star in normalized screen space
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub alpha: f32,
    /// Downward drift per tick
    pub speed: f32,
}

/// A decorative ring around the orrery center
#[derive(Debug, Clone, PartialEq)]
pub struct OrreryRing {
    pub radius: f32,
    /// Degrees per tick (negative spins the other way)
    pub speed: f32,
    pub angle: f32,
    pub stroke: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    pub x: f32,
    /// Normalized spawn height
    pub y: f32,
    pub length: f32,
    /// 1.0 at spawn, removed at 0
    pub life: f32,
}

/// Cosmetic background state
#[derive(Debug, Clone)]
pub struct Ambient {
    pub stars: Vec<Star>,
    pub rings: Vec<OrreryRing>,
    pub shooting_stars: Vec<ShootingStar>,
    /// Phase of the ring glow pulse (radians)
    pub breathing_phase: f32,
    rng: Pcg32,
}

impl Ambient {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.random_range(-0.5..1.5),
                y: rng.random_range(-0.5..1.5),
                radius: rng.random_range(1.0..3.5),
                alpha: rng.random_range(0.0..0.8),
                speed: rng.random_range(0.0001..0.0003),
            })
            .collect();

        let rings = vec![
            OrreryRing { radius: HIT_RING_RADIUS - 15.0, speed: 0.5, angle: 0.0, stroke: 4.0 },
            OrreryRing { radius: HIT_RING_RADIUS, speed: -0.8, angle: 90.0, stroke: 6.0 },
            OrreryRing { radius: HIT_RING_RADIUS + 15.0, speed: 0.3, angle: 180.0, stroke: 3.0 },
        ];

        Self {
            stars,
            rings,
            shooting_stars: Vec::new(),
            breathing_phase: 0.0,
            rng,
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        for ring in &mut self.rings {
            ring.angle = crate::normalize_degrees(ring.angle + ring.speed);
        }

        for star in &mut self.stars {
            star.y += star.speed;
            if star.y > 1.5 {
                star.y = -0.5;
            }
        }

        self.shooting_stars.retain(|s| s.life > 0.0);
        for s in &mut self.shooting_stars {
            s.x += 15.0;
            s.y += 15.0;
            s.life -= 0.02;
        }
        if self.rng.random_ratio(1, SHOOTING_STAR_ODDS) {
            let y = self.rng.random::<f32>();
            self.shooting_stars.push(ShootingStar {
                x: 0.0,
                y,
                length: 20.0,
                life: 1.0,
            });
        }

        self.breathing_phase = (self.breathing_phase + BREATHING_STEP) % std::f32::consts::TAU;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rings_rotate_and_wrap() {
        let mut ambient = Ambient::new(1);
        for _ in 0..1000 {
            ambient.update();
        }
        assert!((ambient.rings[0].angle - 140.0).abs() < 0.1);
        for ring in &ambient.rings {
            assert!((0.0..360.0).contains(&ring.angle));
        }
    }

    #[test]
    fn test_stars_stay_in_band() {
        let mut ambient = Ambient::new(2);
        for _ in 0..20_000 {
            ambient.update();
        }
        assert_eq!(ambient.stars.len(), STAR_COUNT);
        assert!(ambient.stars.iter().all(|s| (-0.5..=1.5).contains(&s.y)));
    }

    #[test]
    fn test_shooting_stars_expire() {
        let mut ambient = Ambient::new(3);
        for _ in 0..5_000 {
            ambient.update();
        }
        // Each lives 50 ticks; at 1/100 odds only a handful can overlap
        assert!(ambient.shooting_stars.len() < 20);
        assert!(ambient.shooting_stars.iter().all(|s| s.life > -0.02));
    }
}
