//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Side effects are emitted as events, never performed inline
//! - No rendering, audio or persistence dependencies

pub mod events;
pub mod resolve;
pub mod schedule;
pub mod state;
pub mod target;
pub mod tick;
pub mod timers;
pub mod tutorial;
pub mod wave;

pub use events::{GameEvent, Notification, VisualEffect};
pub use resolve::{TapOutcome, handle_tap};
pub use schedule::{DelayedAction, Scheduler};
pub use state::{Command, GameCounters, GamePhase, GameState};
pub use target::{PowerUpKind, Rift, Target, TargetKind, generate_target};
pub use tick::{TickInput, tick};
pub use timers::{Combo, TimerBank};
pub use tutorial::{TUTORIAL_STEPS, TutorialStep};
pub use wave::{WaveConfig, boss_health, wave_config};
