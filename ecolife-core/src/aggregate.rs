//! Habit-history aggregation for dashboard charts.
//!
//! Pure reshaping of logged habits into day buckets, month buckets, and
//! per-category totals. Ordering is chronological (and alphabetical for
//! categories) so chart output is deterministic.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Minimal view of a logged habit needed for charting.
#[derive(Debug, Clone)]
pub struct HabitSample {
    pub category: String,
    pub green_credits: i32,
    pub co2_saved: f64,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub credits: i64,
    pub co2_saved: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    /// "YYYY-MM"
    pub month: String,
    pub credits: i64,
    pub co2_saved: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub credits: i64,
    pub co2_saved: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HabitStats {
    pub daily: Vec<DayBucket>,
    pub monthly: Vec<MonthBucket>,
    pub categories: Vec<CategoryTotal>,
}

/// Bucket habit credits and CO2 savings by day, month, and category.
pub fn aggregate(samples: &[HabitSample]) -> HabitStats {
    let mut days: BTreeMap<NaiveDate, (i64, f64)> = BTreeMap::new();
    let mut months: BTreeMap<String, (i64, f64)> = BTreeMap::new();
    let mut categories: BTreeMap<String, (i64, f64)> = BTreeMap::new();

    for sample in samples {
        let date = sample.logged_at.date_naive();
        let month = format!("{:04}-{:02}", date.year(), date.month());
        let credits = i64::from(sample.green_credits);

        let day_entry = days.entry(date).or_default();
        day_entry.0 += credits;
        day_entry.1 += sample.co2_saved;

        let month_entry = months.entry(month).or_default();
        month_entry.0 += credits;
        month_entry.1 += sample.co2_saved;

        let category_entry = categories.entry(sample.category.clone()).or_default();
        category_entry.0 += credits;
        category_entry.1 += sample.co2_saved;
    }

    HabitStats {
        daily: days
            .into_iter()
            .map(|(date, (credits, co2_saved))| DayBucket {
                date,
                credits,
                co2_saved,
            })
            .collect(),
        monthly: months
            .into_iter()
            .map(|(month, (credits, co2_saved))| MonthBucket {
                month,
                credits,
                co2_saved,
            })
            .collect(),
        categories: categories
            .into_iter()
            .map(|(category, (credits, co2_saved))| CategoryTotal {
                category,
                credits,
                co2_saved,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(category: &str, credits: i32, co2: f64, when: &str) -> HabitSample {
        let logged_at = when
            .parse::<NaiveDate>()
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();
        HabitSample {
            category: category.to_string(),
            green_credits: credits,
            co2_saved: co2,
            logged_at,
        }
    }

    #[test]
    fn test_aggregate_empty() {
        let stats = aggregate(&[]);
        assert!(stats.daily.is_empty());
        assert!(stats.monthly.is_empty());
        assert!(stats.categories.is_empty());
    }

    #[test]
    fn test_aggregate_day_buckets_are_chronological() {
        let samples = vec![
            sample("transportation", 10, 2.0, "2025-03-02"),
            sample("food", 8, 1.6, "2025-03-01"),
            sample("energy", 6, 1.2, "2025-03-02"),
        ];
        let stats = aggregate(&samples);

        assert_eq!(stats.daily.len(), 2);
        assert_eq!(
            stats.daily[0].date,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert_eq!(stats.daily[0].credits, 8);
        assert_eq!(stats.daily[1].credits, 16);
        assert!((stats.daily[1].co2_saved - 3.2).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_month_buckets() {
        let samples = vec![
            sample("food", 8, 1.6, "2025-01-15"),
            sample("food", 5, 1.0, "2025-01-31"),
            sample("food", 10, 2.0, "2025-02-01"),
        ];
        let stats = aggregate(&samples);

        assert_eq!(stats.monthly.len(), 2);
        assert_eq!(stats.monthly[0].month, "2025-01");
        assert_eq!(stats.monthly[0].credits, 13);
        assert_eq!(stats.monthly[1].month, "2025-02");
        assert_eq!(stats.monthly[1].credits, 10);
    }

    #[test]
    fn test_aggregate_category_totals() {
        let samples = vec![
            sample("waste-reduction", 5, 1.0, "2025-03-01"),
            sample("transportation", 10, 2.0, "2025-03-01"),
            sample("waste-reduction", 7, 1.4, "2025-03-05"),
        ];
        let stats = aggregate(&samples);

        assert_eq!(stats.categories.len(), 2);
        // BTreeMap keeps categories alphabetical.
        assert_eq!(stats.categories[0].category, "transportation");
        assert_eq!(stats.categories[0].credits, 10);
        assert_eq!(stats.categories[1].category, "waste-reduction");
        assert_eq!(stats.categories[1].credits, 12);
        assert!((stats.categories[1].co2_saved - 2.4).abs() < 1e-9);
    }
}
