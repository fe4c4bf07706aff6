//! Scripted tutorial
//!
//! The tutorial is a table of steps. A single rule drives it: a tap that
//! satisfies the current step's trigger runs that step's action and moves on.
//! The tutorial never costs lives.

use super::events::Notification;
use super::schedule::DelayedAction;
use super::state::{GamePhase, GameState};
use super::target::Rift;
use crate::audio::SoundCue;

/// What a tap must do to advance a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTrigger {
    /// Any tap
    Tap,
    /// A tap while the target is inside the hit band
    TimedHit,
}

/// Side effect run when a step is advanced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    None,
    SpawnTarget,
    /// Spawn after the tutorial rift delay
    SpawnTargetDelayed,
    /// Finish the tutorial and return to Idle
    Complete,
}

#[derive(Debug, Clone, Copy)]
pub struct TutorialStep {
    pub trigger: StepTrigger,
    pub message: &'static str,
    pub on_advance: StepAction,
}

pub static TUTORIAL_STEPS: [TutorialStep; 7] = [
    TutorialStep {
        trigger: StepTrigger::Tap,
        message: "Welcome to Celestial Weaver!\nTap anywhere to continue",
        on_advance: StepAction::None,
    },
    TutorialStep {
        trigger: StepTrigger::Tap,
        message: "Golden orbs approach from the edges\nYour goal is to tap when they reach the rings",
        on_advance: StepAction::SpawnTarget,
    },
    TutorialStep {
        trigger: StepTrigger::TimedHit,
        message: "Tap when the orb is near the golden rings!\nTry it now!",
        on_advance: StepAction::SpawnTarget,
    },
    TutorialStep {
        trigger: StepTrigger::TimedHit,
        message: "Perfect! Notice the blue remnant left behind\nThese create temporal rifts",
        on_advance: StepAction::SpawnTargetDelayed,
    },
    TutorialStep {
        trigger: StepTrigger::TimedHit,
        message: "Tap a rift when an orb passes through\nto gain extra life and bonus points!",
        on_advance: StepAction::None,
    },
    TutorialStep {
        trigger: StepTrigger::Tap,
        message: "Miss too many orbs and lose all lives\nand your fate will be severed!",
        on_advance: StepAction::Complete,
    },
    TutorialStep {
        trigger: StepTrigger::Tap,
        message: "Tutorial complete!\nGet ready for the real challenge",
        on_advance: StepAction::None,
    },
];

/// Hint shown when a timed step is tapped outside the band
pub const MISS_HINT: &str = "Try tapping when the orb is closer to the rings!";

/// Current step descriptor, if the tutorial is still running
pub fn current_step(state: &GameState) -> Option<&'static TutorialStep> {
    TUTORIAL_STEPS.get(state.tutorial_step)
}

/// Publish the current step's message
pub(crate) fn announce(state: &mut GameState) {
    if let Some(step) = current_step(state) {
        state.notify(Notification::TutorialMessage {
            step: state.tutorial_step,
            message: step.message.to_string(),
        });
    }
}

/// Generic "advance on matching input" rule
pub(crate) fn handle_tap(state: &mut GameState) {
    let Some(step) = current_step(state) else {
        return;
    };

    let matched = match step.trigger {
        StepTrigger::Tap => true,
        StepTrigger::TimedHit => {
            let hit = state
                .target
                .as_ref()
                .filter(|t| state.tuning.in_hit_band(t.radius))
                .map(|t| t.angle);
            match hit {
                Some(angle) => {
                    state.play(SoundCue::Chime);
                    state.rifts.push(Rift {
                        angle,
                        life_ticks: state.tuning.rift_lifetime_ticks,
                    });
                    state.target = None;
                    true
                }
                None => {
                    state.notify(Notification::TutorialMessage {
                        step: state.tutorial_step,
                        message: MISS_HINT.to_string(),
                    });
                    false
                }
            }
        }
    };

    if !matched {
        return;
    }

    log::debug!("Tutorial step {} advanced", state.tutorial_step);
    state.tutorial_step += 1;

    match step.on_advance {
        StepAction::None => {}
        StepAction::SpawnTarget => state.spawn_tutorial_target(),
        StepAction::SpawnTargetDelayed => {
            let delay = state.tuning.tutorial_rift_delay_ticks;
            state
                .scheduler
                .schedule(state.time_ticks, delay, DelayedAction::SpawnTutorialTarget);
        }
        StepAction::Complete => {
            complete(state);
            return;
        }
    }

    announce(state);
}

/// A target slipped past the ring: respawn it with no penalty
pub(crate) fn handle_radial_miss(state: &mut GameState) {
    state.spawn_tutorial_target();
}

fn complete(state: &mut GameState) {
    announce(state);
    state.target = None;
    state.scheduler.cancel_all();
    state.phase = GamePhase::Idle;
    log::info!("Tutorial complete");
    state.notify(Notification::TutorialComplete);
}
