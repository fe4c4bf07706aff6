//! Achievements
//!
//! Unlock state is never stored: it is recomputed from [`LifetimeStats`].
//! A game end unlocks whatever crossed its threshold between the snapshot
//! taken before recording and the one taken after.

use serde::{Deserialize, Serialize};

use crate::stats::LifetimeStats;

/// Lifetime counter an achievement is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    HighScore,
    BestWave,
    GamesPlayed,
    Combos,
    PowerUps,
    Bosses,
}

impl Metric {
    pub fn value(self, stats: &LifetimeStats) -> u64 {
        match self {
            Metric::HighScore => stats.high_score,
            Metric::BestWave => stats.best_wave as u64,
            Metric::GamesPlayed => stats.total_games as u64,
            Metric::Combos => stats.total_combos as u64,
            Metric::PowerUps => stats.total_power_ups as u64,
            Metric::Bosses => stats.total_bosses as u64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    FirstGame,
    Score100,
    Score500,
    Score1000,
    Wave10,
    Wave20,
    Games10,
    Combos50,
    PowerUps25,
    Bosses5,
}

/// A threshold over one lifetime counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub metric: Metric,
    pub target: u64,
}

impl Achievement {
    pub fn unlocked(&self, stats: &LifetimeStats) -> bool {
        self.metric.value(stats) >= self.target
    }

    /// Progress toward the target, capped at the target
    pub fn progress(&self, stats: &LifetimeStats) -> u64 {
        self.metric.value(stats).min(self.target)
    }

    /// Crossed between two snapshots: below before, at or above after
    pub fn crossed(&self, before: &LifetimeStats, after: &LifetimeStats) -> bool {
        self.metric.value(before) < self.target && self.unlocked(after)
    }
}

const fn achievement(
    id: AchievementId,
    title: &'static str,
    description: &'static str,
    metric: Metric,
    target: u64,
) -> Achievement {
    Achievement {
        id,
        title,
        description,
        metric,
        target,
    }
}

pub static ACHIEVEMENTS: [Achievement; 10] = [
    achievement(AchievementId::FirstGame, "First Steps", "Play your first game", Metric::GamesPlayed, 1),
    achievement(AchievementId::Score100, "Cosmic Novice", "Reach a score of 100", Metric::HighScore, 100),
    achievement(AchievementId::Score500, "Star Weaver", "Reach a score of 500", Metric::HighScore, 500),
    achievement(AchievementId::Score1000, "Celestial Master", "Reach a score of 1000", Metric::HighScore, 1000),
    achievement(AchievementId::Wave10, "Cosmic Survivor", "Survive 10 waves", Metric::BestWave, 10),
    achievement(AchievementId::Wave20, "Galactic Champion", "Survive 20 waves", Metric::BestWave, 20),
    achievement(AchievementId::Games10, "Persistent Weaver", "Play 10 games", Metric::GamesPlayed, 10),
    achievement(AchievementId::Combos50, "Combo Master", "Achieve 50 combos", Metric::Combos, 50),
    achievement(AchievementId::PowerUps25, "Power Collector", "Collect 25 power-ups", Metric::PowerUps, 25),
    achievement(AchievementId::Bosses5, "Boss Slayer", "Defeat 5 boss targets", Metric::Bosses, 5),
];

/// Look up an achievement by id
pub fn get(id: AchievementId) -> &'static Achievement {
    ACHIEVEMENTS
        .iter()
        .find(|a| a.id == id)
        .unwrap_or_else(|| unreachable!("every AchievementId has a table entry"))
}

/// Achievements whose threshold was crossed between two snapshots, in table order
pub fn newly_unlocked(before: &LifetimeStats, after: &LifetimeStats) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| a.crossed(before, after))
        .collect()
}

/// Achievements currently unlocked
pub fn unlocked(stats: &LifetimeStats) -> Vec<&'static Achievement> {
    ACHIEVEMENTS.iter().filter(|a| a.unlocked(stats)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_id() {
        for a in &ACHIEVEMENTS {
            assert_eq!(get(a.id).id, a.id);
        }
    }

    #[test]
    fn test_first_game_unlocks_once() {
        let before = LifetimeStats::default();
        let after = LifetimeStats {
            total_games: 1,
            ..Default::default()
        };
        let ids: Vec<_> = newly_unlocked(&before, &after).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![AchievementId::FirstGame]);

        let later = LifetimeStats {
            total_games: 2,
            ..Default::default()
        };
        assert!(newly_unlocked(&after, &later).is_empty());
    }

    #[test]
    fn test_crossing_is_strict() {
        let before = LifetimeStats {
            high_score: 100,
            ..Default::default()
        };
        let after = LifetimeStats {
            high_score: 600,
            ..Default::default()
        };
        let ids: Vec<_> = newly_unlocked(&before, &after).iter().map(|a| a.id).collect();
        // Score100 was already held; Score500 crossed; Score1000 not reached
        assert_eq!(ids, vec![AchievementId::Score500]);
    }

    #[test]
    fn test_progress_caps_at_target() {
        let stats = LifetimeStats {
            total_bosses: 9,
            ..Default::default()
        };
        let boss = get(AchievementId::Bosses5);
        assert!(boss.unlocked(&stats));
        assert_eq!(boss.progress(&stats), 5);
        assert_eq!(unlocked(&stats).len(), 1);
    }
}
