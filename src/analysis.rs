// Module for analyzing workout history
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::model::{Workout, WorkoutExercise};

const WEEK_DAYS: i64 = 7;
const MONTH_DAYS: i64 = 30;

/// Totals for all workouts inside a trailing time window.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub since: Option<NaiveDateTime>,
    pub workouts: usize,
    pub total_volume: f64,
    pub cardio_minutes: f64,
    pub total_calories: f64,
}

fn starts_at(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Summarize workouts whose date falls at or after `since`.
///
/// Volume only counts strength sets and minutes only count cardio sets, but
/// calories are summed for every set regardless of category.
pub fn summarize(workouts: &[Workout], since: NaiveDateTime) -> PeriodSummary {
    let mut summary = PeriodSummary {
        since: Some(since),
        ..PeriodSummary::default()
    };
    for w in workouts.iter().filter(|w| starts_at(w.date) >= since) {
        summary.workouts += 1;
        for ex in &w.exercises {
            if ex.category.is_cardio() {
                summary.cardio_minutes += ex.total_duration();
            } else {
                summary.total_volume += ex.total_volume();
            }
            summary.total_calories += ex.total_calories();
        }
    }
    summary
}

/// Summary of the last seven days, start instant included.
pub fn weekly_summary(workouts: &[Workout], now: NaiveDateTime) -> PeriodSummary {
    summarize(workouts, now - Duration::days(WEEK_DAYS))
}

/// Summary of the last thirty days, start instant included.
pub fn monthly_summary(workouts: &[Workout], now: NaiveDateTime) -> PeriodSummary {
    summarize(workouts, now - Duration::days(MONTH_DAYS))
}

/// Count consecutive training days ending today or yesterday.
///
/// Dates are walked newest first. Each date may be the same day as the
/// cursor or the day before it; the first larger gap ends the streak.
pub fn current_streak(workouts: &[Workout], today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = workouts.iter().map(|w| w.date).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();

    let mut cursor = today;
    let mut streak = 0;
    for d in dates {
        if (cursor - d).num_days() > 1 {
            break;
        }
        streak += 1;
        cursor = d;
    }
    streak
}

/// Quantity plotted on the progress screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressMetric {
    Weight,
    Volume,
    Reps,
    Duration,
    Calories,
}

impl ProgressMetric {
    /// Measure one exercise entry. Strength metrics read as 0 for cardio and
    /// cardio metrics read as 0 for everything else.
    pub fn measure(self, ex: &WorkoutExercise) -> f64 {
        let cardio = ex.category.is_cardio();
        match self {
            ProgressMetric::Weight if !cardio => ex.max_weight(),
            ProgressMetric::Volume if !cardio => ex.total_volume(),
            ProgressMetric::Reps if !cardio => ex.total_reps() as f64,
            ProgressMetric::Duration if cardio => ex.total_duration(),
            ProgressMetric::Calories if cardio => ex.total_calories(),
            _ => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProgressMetric::Weight => "Max Weight (lbs)",
            ProgressMetric::Volume => "Volume (lbs)",
            ProgressMetric::Reps => "Total Reps",
            ProgressMetric::Duration => "Duration (min)",
            ProgressMetric::Calories => "Calories",
        }
    }
}

impl std::str::FromStr for ProgressMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weight" => Ok(ProgressMetric::Weight),
            "volume" => Ok(ProgressMetric::Volume),
            "reps" => Ok(ProgressMetric::Reps),
            "duration" => Ok(ProgressMetric::Duration),
            "calories" => Ok(ProgressMetric::Calories),
            other => Err(format!("unknown metric '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Per-session values of `metric` for `exercise`, oldest first.
///
/// `workouts` is history in most-recent-first order. Only the first matching
/// entry of each workout is used and zero values are skipped. The iterator
/// is lazy and can be cloned to walk the series again.
pub fn progress_series<'a>(
    workouts: &'a [Workout],
    exercise: &'a str,
    metric: ProgressMetric,
) -> impl Iterator<Item = ProgressPoint> + Clone + 'a {
    workouts.iter().rev().filter_map(move |w| {
        let ex = w.exercises.iter().find(|e| e.name == exercise)?;
        let value = metric.measure(ex);
        (value > 0.0).then_some(ProgressPoint {
            date: w.date,
            value,
        })
    })
}

/// Headline numbers for a progress series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub latest: f64,
    pub personal_best: f64,
    pub session_count: usize,
    pub improvement_pct: f64,
}

/// Compute [`ProgressStats`], or `None` when the series has no points.
pub fn progress_stats<I>(series: I) -> Option<ProgressStats>
where
    I: IntoIterator<Item = ProgressPoint>,
{
    let mut points = series.into_iter();
    let first = points.next()?.value;
    let mut latest = first;
    let mut personal_best = first;
    let mut session_count = 1;
    for p in points {
        latest = p.value;
        personal_best = personal_best.max(p.value);
        session_count += 1;
    }
    let improvement_pct = if first > 0.0 {
        (latest - first) / first * 100.0
    } else {
        0.0
    };
    Some(ProgressStats {
        latest,
        personal_best,
        session_count,
        improvement_pct,
    })
}

/// Distinct exercise names that appear in history, in first-seen order.
pub fn logged_exercise_names(workouts: &[Workout]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for ex in workouts.iter().flat_map(|w| &w.exercises) {
        if seen.insert(ex.name.as_str()) {
            names.push(ex.name.clone());
        }
    }
    log::debug!("{} exercises with logged data", names.len());
    names
}
