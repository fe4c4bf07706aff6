//! Embedding glue between the simulation and its collaborators
//!
//! A [`Session`] owns the game state, the ambient background and the injected
//! collaborators. Each frame it runs the fixed-step scheduler, then drains the
//! simulation's effect requests and routes them to audio, visuals and the
//! presentation layer. The game-end statistics and achievement flow lives
//! here so the simulation never touches persistence.

use log::{info, warn};

use crate::achievements::{self, Achievement};
use crate::ambient::Ambient;
use crate::audio::{AudioMixer, AudioSink, NullAudioSink, SoundCue};
use crate::consts::MAX_SUBSTEPS;
use crate::settings::Settings;
use crate::sim::{Command, GameEvent, GameState, Notification, TickInput, VisualEffect, tick};
use crate::stats::{GameSummary, LifetimeStats, MemoryStatsStore, StatsStore};

/// Longest frame the scheduler will catch up on (ms)
const MAX_FRAME_MS: u64 = 100;
const ACHIEVEMENT_PITCH: f32 = 1.3;

/// Renderer collaborator (fire-and-forget)
pub trait VisualSink {
    fn effect(&mut self, effect: &VisualEffect);
}

/// Shell callbacks; every notification is one-shot
pub trait Presentation {
    fn score_changed(&mut self, _score: u64, _lives: u8, _wave: u32) {}
    fn game_over(&mut self, _report: &GameEndReport) {}
    fn wave_complete(&mut self, _wave: u32) {}
    fn tutorial_complete(&mut self) {}
    fn tutorial_message(&mut self, _step: usize, _message: &str) {}
    fn achievement_unlocked(&mut self, _achievement: &Achievement) {}
}

#[derive(Debug, Default)]
pub struct NullVisualSink;

impl VisualSink for NullVisualSink {
    fn effect(&mut self, _effect: &VisualEffect) {}
}

#[derive(Debug, Default)]
pub struct NullPresentation;

impl Presentation for NullPresentation {}

/// Result of a finished game as shown on the game-over screen
#[derive(Debug, Clone, PartialEq)]
pub struct GameEndReport {
    pub summary: GameSummary,
    pub new_high_score: bool,
    pub new_best_wave: bool,
    /// First achievement unlocked by this game, in table order
    pub achievement: Option<&'static Achievement>,
}

/// Injected collaborators
pub struct Collaborators {
    pub audio: Box<dyn AudioSink>,
    pub visuals: Box<dyn VisualSink>,
    pub presentation: Box<dyn Presentation>,
    pub stats: Box<dyn StatsStore>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            audio: Box::new(NullAudioSink),
            visuals: Box::new(NullVisualSink),
            presentation: Box::new(NullPresentation),
            stats: Box::new(MemoryStatsStore::default()),
        }
    }
}

/// A running game plus everything it talks to
pub struct Session {
    state: GameState,
    ambient: Ambient,
    settings: Settings,
    mixer: AudioMixer,
    collaborators: Collaborators,
    accumulator_ms: u64,
    pending_tap: bool,
    autoplay: bool,
    last_report: Option<GameEndReport>,
}

impl Session {
    pub fn new(seed: u64, settings: Settings, collaborators: Collaborators) -> Self {
        Self::with_state(GameState::new(seed), settings, collaborators)
    }

    /// Wrap an existing state (custom tuning, restored snapshot)
    pub fn with_state(state: GameState, settings: Settings, collaborators: Collaborators) -> Self {
        let ambient = Ambient::new(state.seed.wrapping_add(1));
        Self {
            state,
            ambient,
            mixer: AudioMixer::from_settings(&settings),
            settings,
            collaborators,
            accumulator_ms: 0,
            pending_tap: false,
            autoplay: false,
            last_report: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn ambient(&self) -> &Ambient {
        &self.ambient
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.mixer = AudioMixer::from_settings(&settings);
        self.collaborators
            .audio
            .set_music_volume(self.mixer.music_volume());
        self.settings = settings;
    }

    /// Report from the most recent game end
    pub fn last_report(&self) -> Option<&GameEndReport> {
        self.last_report.as_ref()
    }

    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    /// Queue a tap; it is resolved at the start of the next tick
    pub fn tap(&mut self) {
        self.pending_tap = true;
    }

    /// Apply a host command and deliver its effects immediately
    pub fn command(&mut self, command: Command) {
        self.pending_tap = false;
        self.state.apply_command(command);
        self.dispatch();
    }

    /// Advance by wall-clock time; returns the number of ticks run
    pub fn frame(&mut self, elapsed_ms: u64) -> u32 {
        let tick_ms = self.state.tuning.tick_ms.max(1);
        self.accumulator_ms += elapsed_ms.min(MAX_FRAME_MS);

        let mut substeps = 0;
        while self.accumulator_ms >= tick_ms && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator_ms -= tick_ms;
            substeps += 1;
        }
        substeps
    }

    /// One fixed tick of both passes
    pub fn step(&mut self) {
        let input = TickInput {
            tap: std::mem::take(&mut self.pending_tap),
            autoplay: self.autoplay,
        };
        self.ambient.update();
        tick(&mut self.state, &input);
        self.dispatch();
    }

    /// Route queued effect requests to the collaborators, in order
    fn dispatch(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Sound { cue, pitch } => {
                    self.mixer.play(self.collaborators.audio.as_mut(), cue, pitch);
                }
                GameEvent::Music(request) => {
                    self.mixer.play_music(self.collaborators.audio.as_mut(), request);
                }
                GameEvent::Visual(effect) => {
                    if self.wants_visual(&effect) {
                        self.collaborators.visuals.effect(&effect);
                    }
                }
                GameEvent::Notify(notification) => self.notify(notification),
            }
        }
    }

    fn wants_visual(&self, effect: &VisualEffect) -> bool {
        match effect {
            VisualEffect::ScreenShake { .. } => self.settings.effective_screen_shake(),
            VisualEffect::Explosion { .. }
            | VisualEffect::Sparks { .. }
            | VisualEffect::ScoreBurst { .. }
            | VisualEffect::WaveParticles { .. } => self.settings.particles,
            _ => true,
        }
    }

    fn notify(&mut self, notification: Notification) {
        let presentation = &mut self.collaborators.presentation;
        match notification {
            Notification::ScoreChanged { score, lives, wave } => {
                presentation.score_changed(score, lives, wave)
            }
            Notification::WaveComplete { wave } => presentation.wave_complete(wave),
            Notification::TutorialComplete => presentation.tutorial_complete(),
            Notification::TutorialMessage { step, message } => {
                presentation.tutorial_message(step, &message)
            }
            Notification::GameOver(summary) => self.finish_game(summary),
        }
    }

    /// Record the game, evaluate achievements and surface the result
    fn finish_game(&mut self, summary: GameSummary) {
        let stats = &mut self.collaborators.stats;
        let before = stats.load().unwrap_or_else(|e| {
            warn!("Failed to load stats: {e}");
            LifetimeStats::default()
        });
        let after = match stats.record_game_end(&summary).and_then(|()| stats.load()) {
            Ok(after) => after,
            Err(e) => {
                warn!("Failed to record game: {e}");
                let mut after = before.clone();
                after.record(&summary);
                after
            }
        };

        let achievement = achievements::newly_unlocked(&before, &after)
            .into_iter()
            .next();
        let report = GameEndReport {
            new_high_score: summary.score > before.high_score,
            new_best_wave: summary.waves_survived > before.best_wave,
            achievement,
            summary,
        };

        self.collaborators.presentation.game_over(&report);
        if let Some(a) = achievement {
            info!("Achievement unlocked: {}", a.title);
            self.collaborators.presentation.achievement_unlocked(a);
            self.mixer.play(
                self.collaborators.audio.as_mut(),
                SoundCue::Chime,
                ACHIEVEMENT_PITCH,
            );
        }
        self.last_report = Some(report);
    }
}
