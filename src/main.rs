//! Celestial Weaver entry point
//!
//! Native builds run a headless autoplay demo that logs every callback.
//! Usage: `celestial-weaver [seed] [stats.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use celestial_weaver::Achievement;
    use celestial_weaver::audio::LogAudioSink;
    use celestial_weaver::session::{Collaborators, GameEndReport, Presentation, VisualSink};
    use celestial_weaver::sim::{Command, GamePhase, VisualEffect};
    use celestial_weaver::stats::{JsonFileStatsStore, MemoryStatsStore, StatsStore};
    use celestial_weaver::{Session, Settings};

    /// Simulated time limit for one demo run (10 minutes)
    const MAX_TICKS: u64 = 10 * 60 * 1000 / celestial_weaver::consts::TICK_MS;

    struct LogPresentation;

    impl Presentation for LogPresentation {
        fn score_changed(&mut self, score: u64, lives: u8, wave: u32) {
            log::debug!("score {score} lives {lives} wave {wave}");
        }

        fn game_over(&mut self, report: &GameEndReport) {
            log::info!(
                "GAME OVER score {} waves {}{}{}",
                report.summary.score,
                report.summary.waves_survived,
                if report.new_high_score { " (new high score)" } else { "" },
                if report.new_best_wave { " (new best wave)" } else { "" },
            );
        }

        fn wave_complete(&mut self, wave: u32) {
            log::info!("Wave {wave} complete");
        }

        fn tutorial_complete(&mut self) {
            log::info!("Tutorial complete");
        }

        fn tutorial_message(&mut self, step: usize, message: &str) {
            log::info!("[tutorial {step}] {message}");
        }

        fn achievement_unlocked(&mut self, achievement: &Achievement) {
            log::info!("Achievement: {} - {}", achievement.title, achievement.description);
        }
    }

    struct LogVisualSink;

    impl VisualSink for LogVisualSink {
        fn effect(&mut self, effect: &VisualEffect) {
            log::trace!("fx {:?}", effect);
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let seed = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0xC0FFEE);
        let stats: Box<dyn StatsStore> = match args.next() {
            Some(path) => Box::new(JsonFileStatsStore::new(path)),
            None => Box::new(MemoryStatsStore::default()),
        };

        let collaborators = Collaborators {
            audio: Box::new(LogAudioSink),
            visuals: Box::new(LogVisualSink),
            presentation: Box::new(LogPresentation),
            stats,
        };
        let mut session = Session::new(seed, Settings::default(), collaborators);
        session.set_autoplay(true);

        session.command(Command::StartTutorial);
        while session.state().phase == GamePhase::Tutorial
            && session.state().time_ticks < MAX_TICKS
        {
            session.step();
        }

        session.command(Command::StartGame);
        let start = session.state().time_ticks;
        while session.state().phase == GamePhase::Playing
            && session.state().time_ticks - start < MAX_TICKS
        {
            session.step();
        }

        let state = session.state();
        if state.phase == GamePhase::Playing {
            log::info!(
                "Demo stopped after {} ticks: score {}, wave {}, lives {}",
                MAX_TICKS,
                state.score,
                state.wave,
                state.lives
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Celestial Weaver (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web shell embeds the library directly
}
