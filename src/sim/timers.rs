//! Power-up countdowns and the combo window

use serde::{Deserialize, Serialize};

use super::target::PowerUpKind;

/// Independent power-up countdowns; an effect is active iff its counter > 0
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerBank {
    pub slow_time_ticks: u32,
    pub double_score_ticks: u32,
    pub shield_ticks: u32,
}

impl TimerBank {
    pub fn slow_time_active(&self) -> bool {
        self.slow_time_ticks > 0
    }

    pub fn double_score_active(&self) -> bool {
        self.double_score_ticks > 0
    }

    pub fn shield_active(&self) -> bool {
        self.shield_ticks > 0
    }

    /// Re-arm a timed effect to its full duration. Extra life has no timer.
    pub fn arm(&mut self, kind: PowerUpKind, ticks: u32) {
        match kind {
            PowerUpKind::SlowTime => self.slow_time_ticks = ticks,
            PowerUpKind::DoubleScore => self.double_score_ticks = ticks,
            PowerUpKind::Shield => self.shield_ticks = ticks,
            PowerUpKind::ExtraLife => {}
        }
    }

    /// Consume the shield. Returns whether one was active.
    pub fn consume_shield(&mut self) -> bool {
        let was_active = self.shield_active();
        self.shield_ticks = 0;
        was_active
    }

    /// One tick of countdown; counters never go below zero
    pub fn tick(&mut self) {
        self.slow_time_ticks = self.slow_time_ticks.saturating_sub(1);
        self.double_score_ticks = self.double_score_ticks.saturating_sub(1);
        self.shield_ticks = self.shield_ticks.saturating_sub(1);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Consecutive-hit streak
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    pub count: u32,
    /// Simulation clock (ms) of the last counted hit
    pub last_hit_ms: Option<u64>,
}

impl Combo {
    /// floor(count / 5) + 1
    pub fn multiplier(&self) -> u32 {
        self.count / 5 + 1
    }

    fn within_window(&self, now_ms: u64, window_ms: u64) -> bool {
        self.last_hit_ms
            .is_some_and(|last| now_ms.saturating_sub(last) <= window_ms)
    }

    /// Register a hit. Returns true when the streak lands on a milestone (every 5th).
    pub fn register_hit(&mut self, now_ms: u64, window_ms: u64) -> bool {
        let milestone = if self.within_window(now_ms, window_ms) {
            self.count += 1;
            self.count > 1 && self.count.is_multiple_of(5)
        } else {
            self.count = 1;
            false
        };
        self.last_hit_ms = Some(now_ms);
        milestone
    }

    /// Per-tick decay: the streak resets once the window has elapsed without a hit
    pub fn decay(&mut self, now_ms: u64, window_ms: u64) {
        if self.count > 0 && !self.within_window(now_ms, window_ms) {
            self.count = 0;
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_expire_exactly() {
        let mut bank = TimerBank::default();
        bank.arm(PowerUpKind::Shield, 3);
        bank.tick();
        bank.tick();
        assert!(bank.shield_active());
        bank.tick();
        assert!(!bank.shield_active());
        bank.tick();
        assert_eq!(bank.shield_ticks, 0);
    }

    #[test]
    fn test_timers_are_independent() {
        let mut bank = TimerBank::default();
        bank.arm(PowerUpKind::SlowTime, 300);
        bank.arm(PowerUpKind::DoubleScore, 600);
        for _ in 0..300 {
            bank.tick();
        }
        assert!(!bank.slow_time_active());
        assert!(bank.double_score_active());
        assert_eq!(bank.double_score_ticks, 300);
    }

    #[test]
    fn test_rearm_extends() {
        let mut bank = TimerBank::default();
        bank.arm(PowerUpKind::SlowTime, 300);
        for _ in 0..250 {
            bank.tick();
        }
        bank.arm(PowerUpKind::SlowTime, 300);
        assert_eq!(bank.slow_time_ticks, 300);
    }

    #[test]
    fn test_consume_shield() {
        let mut bank = TimerBank::default();
        assert!(!bank.consume_shield());
        bank.arm(PowerUpKind::Shield, 180);
        assert!(bank.consume_shield());
        assert!(!bank.shield_active());
    }

    #[test]
    fn test_combo_streak_and_milestones() {
        let mut combo = Combo::default();
        let mut milestones = 0;
        for i in 0..10 {
            if combo.register_hit(i * 1000, 2000) {
                milestones += 1;
            }
        }
        assert_eq!(combo.count, 10);
        assert_eq!(combo.multiplier(), 3);
        assert_eq!(milestones, 2);
    }

    #[test]
    fn test_combo_gap_restarts_at_one() {
        let mut combo = Combo::default();
        combo.register_hit(0, 2000);
        combo.register_hit(1000, 2000);
        assert_eq!(combo.count, 2);
        combo.register_hit(3500, 2000);
        assert_eq!(combo.count, 1);
    }

    #[test]
    fn test_combo_decays_while_idle() {
        let mut combo = Combo::default();
        combo.register_hit(1000, 2000);
        combo.decay(3000, 2000);
        assert_eq!(combo.count, 1);
        combo.decay(3001, 2000);
        assert_eq!(combo.count, 0);
        assert_eq!(combo.multiplier(), 1);
    }
}
