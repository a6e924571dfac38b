//! Domain entities persisted by the tracker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generate a fresh identity for workouts, templates and custom exercises.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Broad kind of exercise. Decides which set fields are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Weight,
    Cardio,
    Bodyweight,
}

pub const ALL_CATEGORIES: [Category; 3] = [Category::Weight, Category::Cardio, Category::Bodyweight];

impl Category {
    pub fn is_cardio(self) -> bool {
        self == Category::Cardio
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Weight => "weight",
            Category::Cardio => "cardio",
            Category::Bodyweight => "bodyweight",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CATEGORIES
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// Catalog entry the user picks from when building a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub default_sets: u32,
    pub default_reps: u32,
}

/// One logged set. Strength sets use `reps`/`weight`, cardio sets use
/// `duration` (minutes) and `calories`; the other pair stays at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Set {
    pub reps: u32,
    pub weight: f64,
    pub duration: f64,
    pub calories: f64,
}

impl Set {
    pub fn strength(reps: u32, weight: f64) -> Self {
        Self {
            reps,
            weight,
            ..Self::default()
        }
    }

    pub fn cardio(duration: f64, calories: f64) -> Self {
        Self {
            duration,
            calories,
            ..Self::default()
        }
    }

    pub fn volume(&self) -> f64 {
        self.reps as f64 * self.weight
    }
}

/// Snapshot of an exercise inside a workout. Name and category are copied
/// when the exercise is added so catalog changes never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub exercise_id: String,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub sets: Vec<Set>,
}

impl WorkoutExercise {
    /// Heaviest weight lifted in any set, 0 when there are no sets.
    pub fn max_weight(&self) -> f64 {
        self.sets.iter().map(|s| s.weight).fold(0.0, f64::max)
    }

    pub fn total_volume(&self) -> f64 {
        self.sets.iter().map(Set::volume).sum()
    }

    pub fn total_reps(&self) -> u32 {
        self.sets.iter().map(|s| s.reps).sum()
    }

    pub fn total_duration(&self) -> f64 {
        self.sets.iter().map(|s| s.duration).sum()
    }

    pub fn total_calories(&self) -> f64 {
        self.sets.iter().map(|s| s.calories).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
}

impl Workout {
    /// Empty workout with a fresh identity.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: new_id(),
            date,
            notes: String::new(),
            exercises: Vec::new(),
        }
    }
}

/// Exercise structure stored in a template. Notes are never kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExercise {
    pub exercise_id: String,
    pub name: String,
    pub category: Category,
    pub sets: Vec<Set>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub exercises: Vec<TemplateExercise>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyWeightEntry {
    pub date: NaiveDate,
    pub weight: f64,
}

/// Metric a personal record is tracked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordMetric {
    Weight,
    Volume,
}

impl fmt::Display for RecordMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordMetric::Weight => f.write_str("weight"),
            RecordMetric::Volume => f.write_str("volume"),
        }
    }
}

/// Composite lookup key for a personal record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub exercise: String,
    pub metric: RecordMetric,
}

impl RecordKey {
    pub fn new(exercise: impl Into<String>, metric: RecordMetric) -> Self {
        Self {
            exercise: exercise.into(),
            metric,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub exercise: String,
    pub metric: RecordMetric,
    pub value: f64,
    pub date: NaiveDate,
}

impl PersonalRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.exercise.clone(), self.metric)
    }
}
