//! Lifetime statistics
//!
//! The simulation reports a [`GameSummary`] when a run ends; a [`StatsStore`]
//! folds it into persisted [`LifetimeStats`]. Native builds keep a JSON file,
//! web builds use LocalStorage.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// End-of-game totals computed by the simulation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub score: u64,
    /// Completed waves (current unfinished wave excluded)
    pub waves_survived: u32,
    pub power_ups_collected: u32,
    pub bosses_defeated: u32,
    pub combos_achieved: u32,
    pub perfect_waves: u32,
    /// Simulated play time
    pub play_time_ms: u64,
}

/// Persisted lifetime counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeStats {
    pub high_score: u64,
    pub best_wave: u32,
    pub total_games: u32,
    pub total_combos: u32,
    pub total_power_ups: u32,
    pub total_bosses: u32,
    pub perfect_waves: u32,
    pub total_time_ms: u64,
}

impl LifetimeStats {
    /// Fold one finished game into the totals
    pub fn record(&mut self, game: &GameSummary) {
        self.high_score = self.high_score.max(game.score);
        self.best_wave = self.best_wave.max(game.waves_survived);
        self.total_games += 1;
        self.total_combos += game.combos_achieved;
        self.total_power_ups += game.power_ups_collected;
        self.total_bosses += game.bosses_defeated;
        self.perfect_waves += game.perfect_waves;
        self.total_time_ms += game.play_time_ms;
    }
}

/// Persistence collaborator for lifetime statistics
pub trait StatsStore {
    fn load(&self) -> Result<LifetimeStats, StoreError>;

    fn save(&mut self, stats: &LifetimeStats) -> Result<(), StoreError>;

    /// Load, fold in the finished game, persist
    fn record_game_end(&mut self, game: &GameSummary) -> Result<(), StoreError> {
        let mut stats = self.load()?;
        stats.record(game);
        self.save(&stats)
    }
}

/// Volatile store (tests, demo runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStatsStore {
    pub stats: LifetimeStats,
}

impl StatsStore for MemoryStatsStore {
    fn load(&self) -> Result<LifetimeStats, StoreError> {
        Ok(self.stats.clone())
    }

    fn save(&mut self, stats: &LifetimeStats) -> Result<(), StoreError> {
        self.stats = stats.clone();
        Ok(())
    }
}

/// JSON file on disk (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStatsStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStatsStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl StatsStore for JsonFileStatsStore {
    fn load(&self) -> Result<LifetimeStats, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No stats at {}, starting fresh", self.path.display());
                Ok(LifetimeStats::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, stats: &LifetimeStats) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(stats)?;
        std::fs::write(&self.path, json)?;
        log::info!("Stats saved ({} games)", stats.total_games);
        Ok(())
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStatsStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStatsStore {
    const STORAGE_KEY: &'static str = "celestial_weaver_stats";

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable("LocalStorage"))
    }
}

#[cfg(target_arch = "wasm32")]
impl StatsStore for LocalStorageStatsStore {
    fn load(&self) -> Result<LifetimeStats, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => Ok(serde_json::from_str(&json)?),
            _ => {
                log::info!("No stats found, starting fresh");
                Ok(LifetimeStats::default())
            }
        }
    }

    fn save(&mut self, stats: &LifetimeStats) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(stats)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| StoreError::Unavailable("LocalStorage write"))?;
        log::info!("Stats saved ({} games)", stats.total_games);
        Ok(())
    }
}
