//! Game state and the phase state machine
//!
//! All state that must be reproducible for replay lives here. The simulation
//! owns the single active target and the rift set; wave policy and the target
//! generator are stateless helpers.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::{GameEvent, Notification, VisualEffect};
use super::schedule::{DelayedAction, Scheduler};
use super::target::{Rift, Target, TargetKind, generate_target};
use super::timers::{Combo, TimerBank};
use super::tutorial;
use super::wave::{WaveConfig, wave_config};
use crate::audio::{MusicRequest, SoundCue};
use crate::stats::GameSummary;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu / pre-game; only the ambient pass runs
    Idle,
    /// Scripted instructional sequence
    Tutorial,
    /// Active gameplay
    Playing,
    /// Run ended; waiting for restart
    GameOver,
}

/// Explicit commands from the host shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartTutorial,
    StartGame,
    Restart,
    /// Skip the wave-transition delay
    ContinueWave,
    /// Abandon tutorial or leave the game-over screen
    ReturnToMenu,
}

/// Per-game counters reported to the statistics store at game end
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCounters {
    pub power_ups_collected: u32,
    pub bosses_defeated: u32,
    /// Every 5th consecutive combo hit
    pub combos_achieved: u32,
    /// Waves cleared without losing a life
    pub perfect_waves: u32,
    /// Ticks spent in Playing
    pub play_ticks: u64,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Balance parameters
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Current wave (1-based)
    pub wave: u32,
    /// Targets finished in the current wave
    pub targets_completed: u32,
    pub combo: Combo,
    pub timers: TimerBank,
    /// The single active target (None during wave transitions)
    pub target: Option<Target>,
    pub rifts: Vec<Rift>,
    pub scheduler: Scheduler,
    /// Index into the tutorial step table
    pub tutorial_step: usize,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulation clock in milliseconds
    pub clock_ms: u64,
    pub counters: GameCounters,
    /// No life lost since the current wave began
    pub(crate) wave_flawless: bool,
    next_id: u32,
    /// Effect requests since the last drain
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            lives: tuning.starting_lives,
            tuning,
            phase: GamePhase::Idle,
            score: 0,
            wave: 1,
            targets_completed: 0,
            combo: Combo::default(),
            timers: TimerBank::default(),
            target: None,
            rifts: Vec::new(),
            scheduler: Scheduler::default(),
            tutorial_step: 0,
            time_ticks: 0,
            clock_ms: 0,
            counters: GameCounters::default(),
            wave_flawless: true,
            next_id: 1,
            events: Vec::new(),
        }
    }

    /// Allocate a new target ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Parameters of the wave in progress
    pub fn wave_config(&self) -> WaveConfig {
        wave_config(self.wave)
    }

    pub fn combo_multiplier(&self) -> u32 {
        self.combo.multiplier()
    }

    /// Waves fully cleared; the unfinished current wave does not count
    pub fn waves_survived(&self) -> u32 {
        self.wave.saturating_sub(1)
    }

    /// Take all effect requests queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn emit_visual(&mut self, effect: VisualEffect) {
        self.events.push(GameEvent::Visual(effect));
    }

    pub(crate) fn play(&mut self, cue: SoundCue) {
        self.events.push(GameEvent::sound(cue));
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.events.push(GameEvent::Notify(notification));
    }

    pub(crate) fn notify_score(&mut self) {
        self.notify(Notification::ScoreChanged {
            score: self.score,
            lives: self.lives,
            wave: self.wave,
        });
    }

    /// End-of-game totals for the statistics store
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.score,
            waves_survived: self.waves_survived(),
            power_ups_collected: self.counters.power_ups_collected,
            bosses_defeated: self.counters.bosses_defeated,
            combos_achieved: self.counters.combos_achieved,
            perfect_waves: self.counters.perfect_waves,
            play_time_ms: self.counters.play_ticks * self.tuning.tick_ms,
        }
    }

    /// Spawn the next target of the current wave
    pub(crate) fn spawn_target(&mut self) {
        let id = self.next_entity_id();
        let config = self.wave_config();
        let target = generate_target(
            &mut self.rng,
            id,
            self.wave,
            &config,
            self.targets_completed,
            self.tuning.orbital_radius,
        );
        if let TargetKind::Boss { health } = target.kind {
            log::info!("Boss spawned on wave {} with {} health", self.wave, health);
        }
        self.target = Some(target);
        self.emit_visual(VisualEffect::TrailReset);
    }

    /// Spawn a slow plain target for the tutorial
    pub(crate) fn spawn_tutorial_target(&mut self) {
        use rand::Rng;

        let id = self.next_entity_id();
        let angle = self.rng.random_range(0.0..360.0);
        self.target = Some(Target {
            id,
            angle,
            radius: self.tuning.orbital_radius,
            speed: self.tuning.tutorial_target_speed,
            kind: TargetKind::Normal,
        });
        self.emit_visual(VisualEffect::TrailReset);
    }

    /// Run a delayed action that came due
    pub(crate) fn fire(&mut self, action: DelayedAction) {
        match (action, self.phase) {
            (DelayedAction::SpawnWaveTarget, GamePhase::Playing) => {
                if self.target.is_none() {
                    log::info!("Wave {} begins", self.wave);
                    self.spawn_target();
                }
            }
            (DelayedAction::SpawnTutorialTarget, GamePhase::Tutorial) => {
                self.spawn_tutorial_target();
            }
            (action, phase) => {
                log::debug!("Dropped {:?} fired in {:?}", action, phase);
            }
        }
    }

    /// Reset all per-game counters to their defaults
    ///
    /// The RNG, entity IDs and clocks restart too, so every game started from
    /// this state replays exactly like one started from `GameState::new(seed)`.
    fn reset_run(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.next_id = 1;
        self.time_ticks = 0;
        self.clock_ms = 0;
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.wave = 1;
        self.targets_completed = 0;
        self.combo = Combo::default();
        self.timers.clear();
        self.target = None;
        self.rifts.clear();
        self.scheduler.cancel_all();
        self.counters = GameCounters::default();
        self.wave_flawless = true;
        self.tutorial_step = 0;
    }

    /// Apply a host command; commands invalid for the current phase are ignored
    pub fn apply_command(&mut self, command: Command) {
        match (command, self.phase) {
            (Command::StartTutorial, GamePhase::Idle) => self.start_tutorial(),
            (Command::StartGame, GamePhase::Idle | GamePhase::GameOver)
            | (Command::Restart, GamePhase::GameOver) => self.start_game(),
            (Command::ContinueWave, GamePhase::Playing) => self.continue_wave(),
            (Command::ReturnToMenu, GamePhase::Tutorial | GamePhase::GameOver) => {
                self.scheduler.cancel_all();
                self.target = None;
                self.phase = GamePhase::Idle;
                log::info!("Returned to menu");
            }
            (command, phase) => {
                log::debug!("Ignored {:?} in {:?}", command, phase);
            }
        }
    }

    /// Idle -> Tutorial
    pub fn start_tutorial(&mut self) {
        self.reset_run();
        self.phase = GamePhase::Tutorial;
        log::info!("Tutorial started");
        self.notify_score();
        tutorial::announce(self);
    }

    /// Idle/GameOver -> Playing
    pub fn start_game(&mut self) {
        self.reset_run();
        self.phase = GamePhase::Playing;
        log::info!("Game started (seed {})", self.seed);
        self.play(SoundCue::Start);
        self.emit(GameEvent::Music(MusicRequest::Start));
        self.notify_score();
        self.spawn_target();
    }

    /// Spawn immediately if a wave transition is pending
    pub fn continue_wave(&mut self) {
        if self.phase == GamePhase::Playing && self.target.is_none() {
            self.scheduler.cancel_all();
            log::info!("Wave {} begins early", self.wave);
            self.spawn_target();
        }
    }
}
