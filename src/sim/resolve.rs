//! Hit resolution
//!
//! Turns a tap (or a target slipping past the ring) into state changes plus
//! effect requests. Priority per tap: rift activation, then hit band, then miss.

use super::events::{GameEvent, Notification, VisualEffect, colors};
use super::schedule::DelayedAction;
use super::state::{GamePhase, GameState};
use super::target::{PowerUpKind, Rift, TargetKind};
use super::tutorial;
use crate::angular_distance;
use crate::audio::{MusicRequest, SoundCue};

/// Outcome of a single tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Nothing to resolve (wrong phase or no target in flight)
    Ignored,
    RiftActivated,
    Hit,
    /// Boss took damage but survives
    BossDamaged,
    Miss,
    /// Tutorial handled the tap
    Tutorial,
}

/// Resolve a tap against the current state
pub fn handle_tap(state: &mut GameState) -> TapOutcome {
    let outcome = match state.phase {
        GamePhase::Tutorial => {
            tutorial::handle_tap(state);
            TapOutcome::Tutorial
        }
        GamePhase::Playing => resolve_play_tap(state),
        GamePhase::Idle | GamePhase::GameOver => TapOutcome::Ignored,
    };
    log::debug!("Tap at tick {}: {:?}", state.time_ticks, outcome);
    outcome
}

fn resolve_play_tap(state: &mut GameState) -> TapOutcome {
    let Some(target) = state.target.as_ref() else {
        return TapOutcome::Ignored;
    };
    let (angle, radius) = (target.angle, target.radius);

    let tolerance = state.tuning.rift_angular_tolerance;
    let rift = if state.tuning.in_rift_band(radius) {
        state
            .rifts
            .iter()
            .position(|r| angular_distance(r.angle, angle) < tolerance)
    } else {
        None
    };

    if let Some(idx) = rift {
        activate_rift(state, idx);
        TapOutcome::RiftActivated
    } else if state.tuning.in_hit_band(radius) {
        handle_success(state)
    } else {
        handle_miss(state);
        TapOutcome::Miss
    }
}

/// Rift activation: life (below cap), bonus score, fresh target
fn activate_rift(state: &mut GameState, idx: usize) {
    state.play(SoundCue::Rift);
    if state.lives < state.tuning.rift_life_cap {
        state.lives += 1;
    }
    state.score += 5;
    state.notify_score();

    state.rifts.remove(idx);
    state.emit_visual(VisualEffect::Mandala);
    state.emit_visual(VisualEffect::WaveParticles {
        color: colors::CYAN,
        count: 20,
    });

    state.spawn_target();
}

/// Successful tap inside the hit band
fn handle_success(state: &mut GameState) -> TapOutcome {
    state.play(SoundCue::Chime);

    let Some(target) = state.target.as_mut() else {
        return TapOutcome::Ignored;
    };

    if let TargetKind::Boss { health } = &mut target.kind {
        *health = health.saturating_sub(1);
        let remaining = *health;
        state.play(SoundCue::BossHit);
        if remaining > 0 {
            log::debug!("Boss hit, {} health left", remaining);
            return TapOutcome::BossDamaged;
        }
        log::info!("Boss defeated on wave {}", state.wave);
        state.emit(GameEvent::Sound {
            cue: SoundCue::Start,
            pitch: 0.7,
        });
        state.counters.bosses_defeated += 1;
    }

    let Some(target) = state.target.take() else {
        return TapOutcome::Ignored;
    };

    match target.kind {
        TargetKind::PowerUp(kind) => activate_power_up(state, kind),
        TargetKind::Special => state.score += 3,
        TargetKind::Normal | TargetKind::Boss { .. } => {}
    }

    // Combo bookkeeping
    let now = state.clock_ms;
    let window = state.tuning.combo_window_ms;
    if state.combo.register_hit(now, window) {
        state.play(SoundCue::Combo);
        state.counters.combos_achieved += 1;
    }

    // Power-ups pay out through their effect, not baseline score
    if !matches!(target.kind, TargetKind::PowerUp(_)) {
        let mut points = state.combo.multiplier() as u64;
        if state.timers.double_score_active() {
            points *= 2;
        }
        state.score += points;
    }
    state.targets_completed += 1;
    state.notify_score();

    emit_hit_visuals(state, &target.kind, target.pos());

    state.rifts.push(Rift {
        angle: target.angle,
        life_ticks: state.tuning.rift_lifetime_ticks,
    });
    state.emit_visual(VisualEffect::Mandala);

    if state.targets_completed >= state.wave_config().target_count {
        complete_wave(state);
    } else {
        state.spawn_target();
    }
    TapOutcome::Hit
}

fn emit_hit_visuals(state: &mut GameState, kind: &TargetKind, pos: glam::Vec2) {
    state.emit_visual(VisualEffect::ScoreBurst {
        count: 15 + state.combo.count,
    });

    match kind {
        TargetKind::Boss { .. } => {
            state.emit_visual(VisualEffect::Explosion { pos, color: colors::RED, count: 30 });
            state.emit_visual(VisualEffect::Sparks { pos, count: 20 });
            state.emit_visual(VisualEffect::ScreenShake { intensity: 8.0, duration_ticks: 20 });
            state.emit_visual(VisualEffect::Ripple { pos });
        }
        TargetKind::PowerUp(_) => {
            state.emit_visual(VisualEffect::Explosion { pos, color: colors::GREEN, count: 25 });
            state.emit_visual(VisualEffect::ScreenShake { intensity: 4.0, duration_ticks: 10 });
            state.emit_visual(VisualEffect::Ripple { pos });
        }
        TargetKind::Special => {
            state.emit_visual(VisualEffect::Explosion { pos, color: colors::MAGENTA, count: 20 });
            state.emit_visual(VisualEffect::Sparks { pos, count: 15 });
            state.emit_visual(VisualEffect::ScreenShake { intensity: 6.0, duration_ticks: 15 });
        }
        TargetKind::Normal => {
            state.emit_visual(VisualEffect::Explosion { pos, color: colors::GOLD, count: 15 });
            if state.combo.count > 5 {
                state.emit_visual(VisualEffect::Sparks { pos, count: 10 });
                state.emit_visual(VisualEffect::ScreenShake { intensity: 2.0, duration_ticks: 5 });
            }
        }
    }
}

/// Apply a power-up payload
fn activate_power_up(state: &mut GameState, kind: PowerUpKind) {
    state.play(SoundCue::PowerUp);
    state.counters.power_ups_collected += 1;
    log::debug!("Power-up collected: {:?}", kind);

    let tuning = &state.tuning;
    let ticks = match kind {
        PowerUpKind::ExtraLife => {
            if state.lives < tuning.max_lives {
                state.lives += 1;
            }
            return;
        }
        PowerUpKind::SlowTime => tuning.slow_time_ticks,
        PowerUpKind::DoubleScore => tuning.double_score_ticks,
        PowerUpKind::Shield => tuning.shield_ticks,
    };
    state.timers.arm(kind, ticks);
}

/// Missed tap or a target that slipped past the ring
pub(crate) fn handle_miss(state: &mut GameState) {
    if state.timers.consume_shield() {
        log::debug!("Shield absorbed a miss");
        state.play(SoundCue::Chime);
    } else {
        state.play(SoundCue::Twang);
        state.lives = state.lives.saturating_sub(1);
        state.wave_flawless = false;
        state.emit_visual(VisualEffect::Crackle {
            duration_ticks: state.tuning.failure_effect_ticks,
        });
        state.emit_visual(VisualEffect::ScreenShake {
            intensity: 5.0,
            duration_ticks: 15,
        });
        state.combo.reset();
    }

    state.notify_score();

    if state.lives == 0 {
        end_game(state);
    } else {
        state.spawn_target();
    }
}

/// Advance to the next wave after a paced transition
fn complete_wave(state: &mut GameState) {
    let finished = state.wave;
    log::info!(
        "Wave {} complete (score {}, lives {})",
        finished,
        state.score,
        state.lives
    );
    state.notify(Notification::WaveComplete { wave: finished });
    if state.wave_flawless {
        state.counters.perfect_waves += 1;
    }

    state.wave += 1;
    state.targets_completed = 0;
    state.wave_flawless = true;
    state.target = None;

    let next = state.wave_config();
    log::info!(
        "Wave {}: {} targets, speed {:.1}..{:.1}{}",
        state.wave,
        next.target_count,
        next.base_speed,
        next.max_speed,
        if next.is_boss_wave { " (boss)" } else { "" }
    );

    state.emit_visual(VisualEffect::WaveParticles {
        color: colors::GOLD,
        count: 30,
    });
    state.emit_visual(VisualEffect::WaveBanner {
        wave: state.wave,
        boss: next.is_boss_wave,
        duration_ticks: state.tuning.wave_transition_ticks,
    });
    state.notify_score();

    let delay = state.tuning.wave_transition_ticks;
    state
        .scheduler
        .schedule(state.time_ticks, delay, DelayedAction::SpawnWaveTarget);
}

/// Playing -> GameOver
fn end_game(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.target = None;
    state.scheduler.cancel_all();
    let summary = state.summary();
    log::info!(
        "Game over: score {}, waves survived {}",
        summary.score,
        summary.waves_survived
    );
    state.emit(GameEvent::Music(MusicRequest::Pause));
    state.notify(Notification::GameOver(summary));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::target::Target;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start_game();
        state.drain_events();
        state
    }

    fn set_target(state: &mut GameState, kind: TargetKind, radius: f32, angle: f32) -> u32 {
        let id = state.next_entity_id();
        state.target = Some(Target {
            id,
            angle,
            radius,
            speed: 3.0,
            kind,
        });
        id
    }

    fn ring(state: &GameState) -> f32 {
        state.tuning.hit_ring_radius
    }

    #[test]
    fn test_normal_hit_scores_and_leaves_rift() {
        let mut state = playing(1);
        let r = ring(&state);
        set_target(&mut state, TargetKind::Normal, r, 45.0);
        assert_eq!(handle_tap(&mut state), TapOutcome::Hit);
        assert_eq!(state.score, 1);
        assert_eq!(state.combo.count, 1);
        assert_eq!(state.targets_completed, 1);
        assert_eq!(state.rifts.len(), 1);
        assert_eq!(state.rifts[0].angle, 45.0);
        assert!(state.target.is_some());
    }

    #[test]
    fn test_special_adds_bonus() {
        let mut state = playing(1);
        let r = ring(&state);
        set_target(&mut state, TargetKind::Special, r, 10.0);
        handle_tap(&mut state);
        assert_eq!(state.score, 4);
    }

    #[test]
    fn test_double_score_doubles_baseline() {
        let mut state = playing(1);
        state.timers.arm(PowerUpKind::DoubleScore, 600);
        let r = ring(&state);
        set_target(&mut state, TargetKind::Normal, r, 10.0);
        handle_tap(&mut state);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_power_up_applies_payload_without_baseline() {
        let mut state = playing(1);
        let r = ring(&state);
        set_target(&mut state, TargetKind::PowerUp(PowerUpKind::Shield), r, 10.0);
        handle_tap(&mut state);
        assert_eq!(state.score, 0);
        assert_eq!(state.timers.shield_ticks, 180);
        assert_eq!(state.counters.power_ups_collected, 1);
        assert_eq!(state.targets_completed, 1);
    }

    #[test]
    fn test_extra_life_caps_at_fifteen() {
        let mut state = playing(1);
        state.lives = 15;
        let r = ring(&state);
        set_target(&mut state, TargetKind::PowerUp(PowerUpKind::ExtraLife), r, 10.0);
        handle_tap(&mut state);
        assert_eq!(state.lives, 15);

        state.lives = 12;
        set_target(&mut state, TargetKind::PowerUp(PowerUpKind::ExtraLife), r, 100.0);
        handle_tap(&mut state);
        assert_eq!(state.lives, 13);
    }

    #[test]
    fn test_boss_requires_exact_hits() {
        let mut state = playing(1);
        let r = ring(&state);
        let id = set_target(&mut state, TargetKind::Boss { health: 4 }, r, 200.0);

        for _ in 0..3 {
            assert_eq!(handle_tap(&mut state), TapOutcome::BossDamaged);
            let current = state.target.as_ref().unwrap();
            assert_eq!(current.id, id);
            assert_eq!(state.targets_completed, 0);
            assert_eq!(state.score, 0);
        }
        assert_eq!(handle_tap(&mut state), TapOutcome::Hit);
        assert_eq!(state.counters.bosses_defeated, 1);
        assert_ne!(state.target.as_ref().map(|t| t.id), Some(id));
    }

    #[test]
    fn test_miss_costs_life_and_combo() {
        let mut state = playing(1);
        state.combo.register_hit(0, 2000);
        state.combo.register_hit(10, 2000);
        set_target(&mut state, TargetKind::Normal, 300.0, 10.0);
        assert_eq!(handle_tap(&mut state), TapOutcome::Miss);
        assert_eq!(state.lives, 9);
        assert_eq!(state.combo.count, 0);
        assert!(state.target.is_some());
    }

    #[test]
    fn test_shield_absorbs_miss() {
        let mut state = playing(1);
        state.timers.arm(PowerUpKind::Shield, 180);
        state.combo.register_hit(0, 2000);
        state.combo.register_hit(10, 2000);
        set_target(&mut state, TargetKind::Normal, 300.0, 10.0);
        handle_tap(&mut state);
        assert_eq!(state.lives, 10);
        assert!(!state.timers.shield_active());
        assert_eq!(state.combo.count, 2);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = playing(1);
        state.lives = 1;
        state.wave = 4;
        state.score = 33;
        state.scheduler.schedule(0, 50, DelayedAction::SpawnWaveTarget);
        set_target(&mut state, TargetKind::Normal, 300.0, 10.0);
        handle_tap(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.target.is_none());
        assert!(state.scheduler.is_empty());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Music(MusicRequest::Pause)));
        let over = events.into_iter().find_map(|e| match e {
            GameEvent::Notify(Notification::GameOver(summary)) => Some(summary),
            _ => None,
        });
        let summary = over.expect("game over notification");
        assert_eq!(summary.waves_survived, 3);
        assert_eq!(summary.score, 33);
    }

    #[test]
    fn test_rift_takes_precedence() {
        let mut state = playing(1);
        state.lives = 5;
        state.rifts.push(Rift { angle: 355.0, life_ticks: 100 });
        let r = ring(&state);
        set_target(&mut state, TargetKind::Normal, r + 10.0, 5.0);
        assert_eq!(handle_tap(&mut state), TapOutcome::RiftActivated);
        assert_eq!(state.lives, 6);
        assert_eq!(state.score, 5);
        assert!(state.rifts.is_empty());
        assert_eq!(state.targets_completed, 0);
    }

    #[test]
    fn test_rift_respects_life_cap() {
        let mut state = playing(1);
        state.rifts.push(Rift { angle: 90.0, life_ticks: 100 });
        let r = ring(&state);
        set_target(&mut state, TargetKind::Normal, r, 100.0);
        handle_tap(&mut state);
        assert_eq!(state.lives, 10);
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_rift_outside_tolerance_is_plain_hit() {
        let mut state = playing(1);
        state.rifts.push(Rift { angle: 90.0, life_ticks: 100 });
        let r = ring(&state);
        set_target(&mut state, TargetKind::Normal, r, 105.0);
        assert_eq!(handle_tap(&mut state), TapOutcome::Hit);
        // Rift band is narrower than the hit band
        set_target(&mut state, TargetKind::Normal, r + 50.0, 90.0);
        assert_eq!(handle_tap(&mut state), TapOutcome::Hit);
    }

    #[test]
    fn test_tap_without_target_is_ignored() {
        let mut state = playing(1);
        state.target = None;
        assert_eq!(handle_tap(&mut state), TapOutcome::Ignored);
        assert_eq!(state.lives, 10);
    }

    #[test]
    fn test_tap_in_idle_and_game_over_ignored() {
        let mut state = GameState::new(1);
        assert_eq!(handle_tap(&mut state), TapOutcome::Ignored);
        state.phase = GamePhase::GameOver;
        assert_eq!(handle_tap(&mut state), TapOutcome::Ignored);
    }

    #[test]
    fn test_combo_milestone_every_fifth() {
        let mut state = playing(1);
        let r = ring(&state);
        for i in 0..5 {
            set_target(&mut state, TargetKind::Normal, r, i as f32 * 70.0);
            handle_tap(&mut state);
        }
        assert_eq!(state.combo.count, 5);
        assert_eq!(state.combo_multiplier(), 2);
        assert_eq!(state.counters.combos_achieved, 1);
        // 1 + 1 + 1 + 1 + 2
        assert_eq!(state.score, 6);
    }
}
