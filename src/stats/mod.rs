mod types;

pub use types::{CompletionRecord, DailyCount, DashboardStats, NameCount, PlanCompletion};

use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Displayed for the most-frequent exercise before anything was completed.
pub const NO_FAVORITE: &str = "-";

const DAILY_WINDOW_DAYS: i64 = 7;
const TOP_N: usize = 5;

/// Full recompute of all dashboard views from one batch of completions.
/// `today` is the local calendar date; comparisons are calendar-date only.
pub fn aggregate(
    records: &[CompletionRecord],
    plan_completions: &[PlanCompletion],
    today: NaiveDate,
) -> DashboardStats {
    let window_start = today - Duration::days(DAILY_WINDOW_DAYS - 1);

    let mut daily_counts: Vec<DailyCount> = (0..DAILY_WINDOW_DAYS)
        .map(|offset| DailyCount {
            day: window_start + Duration::days(offset),
            count: 0,
        })
        .collect();

    let mut completions_this_week = 0usize;
    for record in records {
        // Records without a training day still count toward the total but
        // have no bucket to land in.
        let Some(day) = record.training_day else {
            continue;
        };
        if day < window_start || day > today {
            continue;
        }
        daily_counts[(day - window_start).num_days() as usize].count += 1;
        completions_this_week += 1;
    }

    let top_exercises = top_by_frequency(records.iter().map(|r| r.exercise_description.as_str()));
    let top_plans = top_by_frequency(plan_completions.iter().map(|p| p.training_plan_name.as_str()));

    let favorite_exercise = top_exercises
        .first()
        .map(|top| format!("{} ({}x)", top.name, top.count))
        .unwrap_or_else(|| NO_FAVORITE.to_string());

    // Alphabetical by category name: this is a profile radar, not a ranking.
    let mut categories: BTreeMap<&str, u32> = BTreeMap::new();
    for record in records {
        if let Some(name) = record.body_category_name.as_deref() {
            *categories.entry(name).or_insert(0) += 1;
        }
    }
    let category_distribution = categories
        .into_iter()
        .map(|(name, count)| NameCount {
            name: name.to_string(),
            count,
        })
        .collect();

    DashboardStats {
        total_completions: records.len(),
        completions_this_week,
        favorite_exercise,
        daily_counts,
        top_exercises,
        top_plans,
        category_distribution,
    }
}

/// Frequency ranking truncated to the top 5. Counting preserves the order
/// distinct names are first encountered, and the sort is stable, so ties keep
/// that order.
fn top_by_frequency<'a>(names: impl Iterator<Item = &'a str>) -> Vec<NameCount> {
    let mut counts: Vec<NameCount> = Vec::new();
    for name in names {
        match counts.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.count += 1,
            None => counts.push(NameCount {
                name: name.to_string(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_N);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(exercise: &str, category: Option<&str>, day: Option<NaiveDate>) -> CompletionRecord {
        CompletionRecord {
            exercise_description: exercise.to_string(),
            body_category_name: category.map(str::to_string),
            training_day: day,
        }
    }

    fn plan(name: &str, day: Option<NaiveDate>) -> PlanCompletion {
        PlanCompletion {
            training_plan_name: name.to_string(),
            training_day: day,
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn empty_input_yields_empty_views_and_sentinel() {
        let stats = aggregate(&[], &[], day("2026-08-25"));

        assert_eq!(stats.total_completions, 0);
        assert_eq!(stats.completions_this_week, 0);
        assert_eq!(stats.favorite_exercise, NO_FAVORITE);
        assert!(stats.top_exercises.is_empty());
        assert!(stats.top_plans.is_empty());
        assert!(stats.category_distribution.is_empty());
        assert_eq!(stats.daily_counts.len(), 7);
        assert!(stats.daily_counts.iter().all(|d| d.count == 0));
    }

    #[test]
    fn squat_lunge_scenario() {
        let today = day("2026-08-25");
        let yesterday = day("2026-08-24");
        let records = vec![
            record("Squat", None, Some(today)),
            record("Squat", None, Some(today)),
            record("Lunge", None, Some(yesterday)),
        ];

        let stats = aggregate(&records, &[], today);

        assert_eq!(
            stats.top_exercises,
            vec![
                NameCount { name: "Squat".into(), count: 2 },
                NameCount { name: "Lunge".into(), count: 1 },
            ]
        );
        assert_eq!(stats.daily_counts[6].count, 2, "today");
        assert_eq!(stats.daily_counts[5].count, 1, "yesterday");
        assert_eq!(stats.favorite_exercise, "Squat (2x)");
        assert_eq!(stats.completions_this_week, 3);
    }

    #[test]
    fn daily_window_is_seven_days_ending_today() {
        let today = day("2026-08-25");
        let records = vec![
            record("Row", None, Some(day("2026-08-19"))), // oldest in window
            record("Row", None, Some(day("2026-08-18"))), // one day too old
            record("Row", None, Some(day("2026-08-26"))), // in the future
            record("Row", None, None),                    // no training day
        ];

        let stats = aggregate(&records, &[], today);

        assert_eq!(stats.daily_counts.len(), 7);
        assert_eq!(stats.daily_counts[0].day, day("2026-08-19"));
        assert_eq!(stats.daily_counts[6].day, today);
        assert_eq!(stats.completions_this_week, 1);
        assert_eq!(stats.total_completions, 4);

        let bucket_sum: u32 = stats.daily_counts.iter().map(|d| d.count).sum();
        assert_eq!(bucket_sum, 1);
    }

    #[test]
    fn top_five_truncates_and_breaks_ties_by_first_encounter() {
        let today = day("2026-08-25");
        let mut records = Vec::new();
        // Curl and Bench tie at 2; Curl is encountered first.
        for name in ["Curl", "Bench", "Bench", "Curl"] {
            records.push(record(name, None, None));
        }
        for name in ["Dip", "Fly", "Row", "Squat", "Lunge", "Plank"] {
            records.push(record(name, None, None));
        }

        let stats = aggregate(&records, &[], today);

        assert_eq!(stats.top_exercises.len(), 5);
        assert_eq!(stats.top_exercises[0].name, "Curl");
        assert_eq!(stats.top_exercises[1].name, "Bench");
        assert_eq!(stats.top_exercises[2].name, "Dip");

        let top_sum: u32 = stats.top_exercises.iter().map(|e| e.count).sum();
        assert!(top_sum as usize <= records.len());
    }

    #[test]
    fn plans_are_ranked_independently_of_exercises() {
        let today = day("2026-08-25");
        let records = vec![record("Squat", None, Some(today))];
        let plans = vec![
            plan("Push Day", Some(today)),
            plan("Leg Day", Some(today)),
            plan("Push Day", None),
        ];

        let stats = aggregate(&records, &plans, today);

        assert_eq!(
            stats.top_plans,
            vec![
                NameCount { name: "Push Day".into(), count: 2 },
                NameCount { name: "Leg Day".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn category_distribution_is_alphabetical() {
        let today = day("2026-08-25");
        let records = vec![
            record("Squat", Some("Legs"), None),
            record("Bench", Some("Chest"), None),
            record("Lunge", Some("Legs"), None),
            record("Curl", None, None), // no category: excluded here
        ];

        let stats = aggregate(&records, &[], today);

        assert_eq!(
            stats.category_distribution,
            vec![
                NameCount { name: "Chest".into(), count: 1 },
                NameCount { name: "Legs".into(), count: 2 },
            ]
        );
        // still counted in the views that do not need the category
        assert_eq!(stats.total_completions, 4);
        assert_eq!(stats.top_exercises.len(), 4);
    }
}
