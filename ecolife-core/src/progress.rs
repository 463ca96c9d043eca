//! Level, badge, and streak progression rules.

use chrono::{DateTime, Utc};

/// Level n is reached at n*100 lifetime credits.
pub const CREDITS_PER_LEVEL: i32 = 100;

/// Each logged credit is assumed to avoid 0.2 kg of CO2.
pub const CO2_KG_PER_CREDIT: f64 = 0.2;

pub fn level_for_credits(credits: i32) -> i32 {
    credits.max(0) / CREDITS_PER_LEVEL + 1
}

pub fn credits_to_next_level(credits: i32) -> i32 {
    level_for_credits(credits) * CREDITS_PER_LEVEL - credits.max(0)
}

/// Everything the badge rules look at.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressSnapshot {
    pub green_credits: i32,
    pub total_co2_saved: f64,
    pub habits_logged: i64,
    pub streak_days: i32,
}

/// Badges the snapshot qualifies for, in display order. "First Steps" is
/// granted unconditionally; it marks account creation.
pub fn earned_badges(snapshot: &ProgressSnapshot) -> Vec<&'static str> {
    let mut badges = vec!["First Steps"];
    if snapshot.habits_logged >= 10 {
        badges.push("Green Warrior");
    }
    if snapshot.total_co2_saved >= 10.0 {
        badges.push("Carbon Saver");
    }
    if snapshot.streak_days >= 7 {
        badges.push("Streak Master");
    }
    if snapshot.habits_logged >= 50 {
        badges.push("Eco Champion");
    }
    if snapshot.total_co2_saved >= 100.0 {
        badges.push("Planet Guardian");
    }
    if snapshot.streak_days >= 30 {
        badges.push("Sustainability Guru");
    }
    if snapshot.green_credits >= 1000 {
        badges.push("Earth Hero");
    }
    badges
}

/// Streak carried forward when a habit is logged at `now`.
///
/// Same-day logs keep the streak, a log on the following day extends it,
/// anything else (including a first-ever log) starts over at 1.
pub fn next_streak(
    streak_days: i32,
    last_logged_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> i32 {
    let Some(last) = last_logged_at else {
        return 1;
    };

    let today = now.date_naive();
    let last_day = last.date_naive();

    if last_day == today {
        streak_days.max(1)
    } else if last_day.succ_opt() == Some(today) {
        streak_days.max(0) + 1
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(when: &str) -> DateTime<Utc> {
        when.parse::<NaiveDate>()
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_level_for_credits() {
        assert_eq!(level_for_credits(0), 1);
        assert_eq!(level_for_credits(99), 1);
        assert_eq!(level_for_credits(100), 2);
        assert_eq!(level_for_credits(247), 3);
        assert_eq!(level_for_credits(-5), 1);
    }

    #[test]
    fn test_credits_to_next_level() {
        assert_eq!(credits_to_next_level(0), 100);
        assert_eq!(credits_to_next_level(247), 53);
        assert_eq!(credits_to_next_level(100), 100);
    }

    #[test]
    fn test_earned_badges_new_user() {
        assert_eq!(
            earned_badges(&ProgressSnapshot::default()),
            vec!["First Steps"]
        );
    }

    #[test]
    fn test_earned_badges_thresholds() {
        let snapshot = ProgressSnapshot {
            green_credits: 1000,
            total_co2_saved: 100.0,
            habits_logged: 50,
            streak_days: 30,
        };
        assert_eq!(
            earned_badges(&snapshot),
            vec![
                "First Steps",
                "Green Warrior",
                "Carbon Saver",
                "Streak Master",
                "Eco Champion",
                "Planet Guardian",
                "Sustainability Guru",
                "Earth Hero",
            ]
        );
    }

    #[test]
    fn test_earned_badges_just_below_thresholds() {
        let snapshot = ProgressSnapshot {
            green_credits: 999,
            total_co2_saved: 9.9,
            habits_logged: 9,
            streak_days: 6,
        };
        assert_eq!(earned_badges(&snapshot), vec!["First Steps"]);
    }

    #[test]
    fn test_next_streak_first_log() {
        assert_eq!(next_streak(0, None, at("2025-03-10")), 1);
    }

    #[test]
    fn test_next_streak_same_day() {
        assert_eq!(next_streak(4, Some(at("2025-03-10")), at("2025-03-10")), 4);
        // A zeroed streak still counts today once something is logged.
        assert_eq!(next_streak(0, Some(at("2025-03-10")), at("2025-03-10")), 1);
    }

    #[test]
    fn test_next_streak_consecutive_day() {
        assert_eq!(next_streak(4, Some(at("2025-03-10")), at("2025-03-11")), 5);
    }

    #[test]
    fn test_next_streak_gap_resets() {
        assert_eq!(next_streak(12, Some(at("2025-03-10")), at("2025-03-13")), 1);
    }
}
