//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::resolve::{self, TapOutcome};
use super::state::{GamePhase, GameState};
use super::tutorial::{self, StepTrigger};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player tapped since the previous tick
    pub tap: bool,
    /// Demo mode - the simulation taps for the player
    pub autoplay: bool,
}

/// Advance the game state by one fixed timestep
///
/// A tap is resolved in full before the clock moves, so no tick ever
/// observes a half-applied tap.
pub fn tick(state: &mut GameState, input: &TickInput) -> Option<TapOutcome> {
    let tap = input.tap || (input.autoplay && autoplay_wants_tap(state));
    let outcome = tap.then(|| resolve::handle_tap(state));

    match state.phase {
        GamePhase::Idle | GamePhase::GameOver => return outcome,
        GamePhase::Tutorial | GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    state.clock_ms += state.tuning.tick_ms;
    if state.phase == GamePhase::Playing {
        state.counters.play_ticks += 1;
    }

    // Power-up countdowns and combo decay run even while no target is in flight
    state.timers.tick();
    let (now, window) = (state.clock_ms, state.tuning.combo_window_ms);
    state.combo.decay(now, window);

    for rift in &mut state.rifts {
        rift.life_ticks = rift.life_ticks.saturating_sub(1);
    }
    state.rifts.retain(|r| r.life_ticks > 0);

    for action in state.scheduler.take_due(state.time_ticks) {
        state.fire(action);
    }

    advance_target(state);

    outcome
}

/// Move the target inward and resolve a radial miss
fn advance_target(state: &mut GameState) {
    let slow = state.timers.slow_time_active();
    let factor = state.tuning.slow_time_factor;
    let inner = state.tuning.hit_zone_inner();

    let Some(target) = state.target.as_mut() else {
        return;
    };
    let speed = if slow { target.speed * factor } else { target.speed };
    target.radius -= speed;

    if target.radius < inner {
        match state.phase {
            GamePhase::Tutorial => tutorial::handle_radial_miss(state),
            GamePhase::Playing => resolve::handle_miss(state),
            GamePhase::Idle | GamePhase::GameOver => {}
        }
    }
}

/// Demo player: advance plain tutorial steps and tap when the target crosses the ring
fn autoplay_wants_tap(state: &GameState) -> bool {
    if state.phase == GamePhase::Tutorial
        && tutorial::current_step(state).is_some_and(|s| s.trigger == StepTrigger::Tap)
    {
        return true;
    }
    state
        .target
        .as_ref()
        .is_some_and(|t| t.radius <= state.tuning.hit_ring_radius && state.tuning.in_hit_band(t.radius))
}
