//! XP, level, rank, and streak math.
//!
//! Everything here is a pure function of its inputs. Levels and ranks are
//! derived on every read and never stored.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const XP_PER_LEVEL: u64 = 3000;
pub const BASE_DAILY_BONUS: u64 = 100;
pub const MIN_STREAK: u8 = 1;
pub const MAX_STREAK: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Pioneer,
    Guardian,
    Overlord,
}

impl Rank {
    pub fn for_level(level: u64) -> Self {
        if level < 2 {
            Rank::Pioneer
        } else if level < 5 {
            Rank::Guardian
        } else {
            Rank::Overlord
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rank::Pioneer => "Pioneer",
            Rank::Guardian => "Guardian",
            Rank::Overlord => "Overlord",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Level data derived from an XP total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub level: u64,
    /// Progress toward the next level, 0..=99.
    pub progress_percent: u8,
    pub rank: Rank,
}

impl LevelInfo {
    pub fn from_xp(xp: u64) -> Self {
        let level = xp / XP_PER_LEVEL + 1;
        let progress_percent = ((xp % XP_PER_LEVEL) * 100 / XP_PER_LEVEL) as u8;
        Self {
            level,
            progress_percent,
            rank: Rank::for_level(level),
        }
    }
}

/// Daily bonus for the given streak day: 100, 200, 400, 800, 1600.
pub fn daily_bonus(streak: u8) -> u64 {
    let day = streak.clamp(MIN_STREAK, MAX_STREAK);
    BASE_DAILY_BONUS << (day - 1)
}

/// Streak after a successful claim. Cycles 1 -> 2 -> 3 -> 4 -> 5 -> 1.
pub fn next_streak(streak: u8) -> u8 {
    (streak.clamp(MIN_STREAK, MAX_STREAK) % MAX_STREAK) + 1
}

/// Compact XP label: `1.2k` from 1000 upward, the plain number below.
pub fn format_xp(xp: u64) -> String {
    if xp >= 1000 {
        format!("{:.1}k", xp as f64 / 1000.0)
    } else {
        xp.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn level_boundaries() {
        let at = |xp| {
            let info = LevelInfo::from_xp(xp);
            (info.level, info.progress_percent)
        };
        assert_eq!(at(0), (1, 0));
        assert_eq!(at(2999), (1, 99));
        assert_eq!(at(3000), (2, 0));
        assert_eq!(at(6500), (3, 16));
    }

    #[test]
    fn rank_thresholds() {
        assert_eq!(LevelInfo::from_xp(0).rank, Rank::Pioneer);
        assert_eq!(LevelInfo::from_xp(3000).rank, Rank::Guardian);
        assert_eq!(LevelInfo::from_xp(11_999).rank, Rank::Guardian);
        assert_eq!(LevelInfo::from_xp(12_000).rank, Rank::Overlord);
        assert_eq!(Rank::Overlord.to_string(), "Overlord");
    }

    #[test]
    fn daily_bonus_doubles_per_day() {
        let bonuses: Vec<u64> = (1..=5).map(daily_bonus).collect();
        assert_eq!(bonuses, vec![100, 200, 400, 800, 1600]);
    }

    #[test]
    fn streak_wraps_after_day_five() {
        let mut streak = 1;
        let mut seen = vec![streak];
        for _ in 0..5 {
            streak = next_streak(streak);
            seen.push(streak);
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 1]);
    }

    #[test]
    fn format_xp_switches_to_thousands() {
        assert_eq!(format_xp(999), "999");
        assert_eq!(format_xp(1000), "1.0k");
        assert_eq!(format_xp(6500), "6.5k");
    }

    proptest! {
        #[test]
        fn progress_stays_below_hundred(xp in 0u64..10_000_000) {
            let info = LevelInfo::from_xp(xp);
            prop_assert!(info.progress_percent < 100);
            prop_assert!(info.level >= 1);
        }

        #[test]
        fn level_is_monotonic(a in 0u64..10_000_000, b in 0u64..10_000_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(LevelInfo::from_xp(lo).level <= LevelInfo::from_xp(hi).level);
            prop_assert!(LevelInfo::from_xp(lo).rank <= LevelInfo::from_xp(hi).rank);
        }

        #[test]
        fn streak_stays_in_range(s in 0u8..=255) {
            let next = next_streak(s);
            prop_assert!((MIN_STREAK..=MAX_STREAK).contains(&next));
            prop_assert!(daily_bonus(s) <= 1600);
        }
    }
}
