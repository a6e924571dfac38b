//! Exercise catalog: seeded defaults, custom exercises and lookup.

use phf::phf_ordered_map;
use strsim::jaro_winkler;

use crate::error::{Result, TrackerError};
use crate::input::parse_count;
use crate::model::{Category, Exercise, new_id};

/// Built-in exercise definition.
#[derive(Debug, Clone, Copy)]
pub struct DefaultExercise {
    pub name: &'static str,
    pub category: Category,
    pub sets: u32,
    pub reps: u32,
}

const fn def(name: &'static str, category: Category, sets: u32, reps: u32) -> DefaultExercise {
    DefaultExercise {
        name,
        category,
        sets,
        reps,
    }
}

/// Exercises every new install starts with, keyed by id.
pub static DEFAULT_EXERCISES: phf::OrderedMap<&'static str, DefaultExercise> = phf_ordered_map! {
    "bench-press" => def("Bench Press", Category::Weight, 3, 10),
    "squat" => def("Squat", Category::Weight, 3, 10),
    "deadlift" => def("Deadlift", Category::Weight, 3, 8),
    "overhead-press" => def("Overhead Press", Category::Weight, 3, 10),
    "barbell-row" => def("Barbell Row", Category::Weight, 3, 10),
    "lat-pulldown" => def("Lat Pulldown", Category::Weight, 3, 12),
    "bicep-curl" => def("Bicep Curl", Category::Weight, 3, 12),
    "tricep-pushdown" => def("Tricep Pushdown", Category::Weight, 3, 12),
    "leg-press" => def("Leg Press", Category::Weight, 3, 12),
    "leg-curl" => def("Leg Curl", Category::Weight, 3, 12),
    "calf-raise" => def("Calf Raise", Category::Weight, 3, 15),
    "dumbbell-fly" => def("Dumbbell Fly", Category::Weight, 3, 12),
    "shoulder-lateral-raise" => def("Lateral Raise", Category::Weight, 3, 15),
    "running" => def("Running", Category::Cardio, 1, 1),
    "cycling" => def("Cycling", Category::Cardio, 1, 1),
    "rowing" => def("Rowing", Category::Cardio, 1, 1),
    "jump-rope" => def("Jump Rope", Category::Cardio, 3, 100),
    "stair-climber" => def("Stair Climber", Category::Cardio, 1, 1),
    "push-ups" => def("Push-ups", Category::Bodyweight, 3, 15),
    "pull-ups" => def("Pull-ups", Category::Bodyweight, 3, 8),
    "dips" => def("Dips", Category::Bodyweight, 3, 10),
    "lunges" => def("Lunges", Category::Bodyweight, 3, 12),
    "plank" => def("Plank", Category::Bodyweight, 3, 60),
    "burpees" => def("Burpees", Category::Bodyweight, 3, 10),
    "mountain-climbers" => def("Mountain Climbers", Category::Bodyweight, 3, 20),
    "crunches" => def("Crunches", Category::Bodyweight, 3, 20),
};

const FALLBACK_SETS: u32 = 3;
const FALLBACK_REPS: u32 = 10;
pub const MAX_DEFAULT_SETS: u32 = 100;
pub const MAX_DEFAULT_REPS: u32 = 1000;

/// Number of sets to pre-fill for `exercise`. Catalog files may be edited by
/// hand, so zero falls back to the usual 3 and the count is capped.
pub(crate) fn prefill_set_count(exercise: &Exercise) -> usize {
    match exercise.default_sets {
        0 => FALLBACK_SETS as usize,
        n => n.min(MAX_DEFAULT_SETS) as usize,
    }
}
const FUZZY_THRESHOLD: f64 = 0.85;

/// The seeded catalog in display order.
pub fn default_catalog() -> Vec<Exercise> {
    DEFAULT_EXERCISES
        .entries()
        .map(|(id, d)| Exercise {
            id: (*id).to_string(),
            name: d.name.to_string(),
            category: d.category,
            default_sets: d.sets,
            default_reps: d.reps,
        })
        .collect()
}

pub fn is_default(id: &str) -> bool {
    DEFAULT_EXERCISES.contains_key(id)
}

/// Criteria for [`list_exercises`]. An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct ExerciseFilter {
    pub category: Option<Category>,
    pub query: Option<String>,
}

impl ExerciseFilter {
    pub fn category(category: Category) -> Self {
        Self {
            category: Some(category),
            query: None,
        }
    }

    fn matches(&self, exercise: &Exercise) -> bool {
        if self.category.is_some_and(|c| c != exercise.category) {
            return false;
        }
        match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => name_matches(&exercise.name, q),
        }
    }
}

/// Case-insensitive substring match, falling back to Jaro-Winkler so small
/// typos ("bench pres") still find the exercise.
fn name_matches(name: &str, query: &str) -> bool {
    let name = name.to_lowercase();
    let query = query.to_lowercase();
    name.contains(&query) || jaro_winkler(&name, &query) >= FUZZY_THRESHOLD
}

pub fn list_exercises<'a>(catalog: &'a [Exercise], filter: &ExerciseFilter) -> Vec<&'a Exercise> {
    catalog.iter().filter(|e| filter.matches(e)).collect()
}

pub fn find_exercise<'a>(catalog: &'a [Exercise], id: &str) -> Result<&'a Exercise> {
    catalog
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| TrackerError::not_found("Exercise", id))
}

/// Define a custom exercise from raw form input and append it to `catalog`.
///
/// The default set/rep counts are parsed leniently; a missing or zero value
/// falls back to 3 sets of 10. Counts above [`MAX_DEFAULT_SETS`] /
/// [`MAX_DEFAULT_REPS`] are rejected.
pub fn create_exercise(
    catalog: &mut Vec<Exercise>,
    name: &str,
    category: Category,
    default_sets: &str,
    default_reps: &str,
) -> Result<Exercise> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TrackerError::InvalidInput(
            "exercise name must not be blank".into(),
        ));
    }
    let sets = match parse_count(default_sets) {
        0 => FALLBACK_SETS,
        n if n > MAX_DEFAULT_SETS => {
            return Err(TrackerError::InvalidInput(format!(
                "default sets must be at most {MAX_DEFAULT_SETS}"
            )));
        }
        n => n,
    };
    let reps = match parse_count(default_reps) {
        0 => FALLBACK_REPS,
        n if n > MAX_DEFAULT_REPS => {
            return Err(TrackerError::InvalidInput(format!(
                "default reps must be at most {MAX_DEFAULT_REPS}"
            )));
        }
        n => n,
    };
    let exercise = Exercise {
        id: new_id(),
        name: name.to_string(),
        category,
        default_sets: sets,
        default_reps: reps,
    };
    log::info!("Created exercise {} ({})", exercise.name, exercise.category);
    catalog.push(exercise.clone());
    Ok(exercise)
}

/// Remove a user-defined exercise. Seeded defaults are protected.
pub fn delete_exercise(catalog: &mut Vec<Exercise>, id: &str) -> Result<Exercise> {
    if is_default(id) {
        return Err(TrackerError::ProtectedExercise(id.to_string()));
    }
    let pos = catalog
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| TrackerError::not_found("Exercise", id))?;
    Ok(catalog.remove(pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_ordered_and_complete() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 26);
        assert_eq!(catalog[0].id, "bench-press");
        assert_eq!(catalog[25].name, "Crunches");
        let cardio = list_exercises(&catalog, &ExerciseFilter::category(Category::Cardio));
        assert_eq!(cardio.len(), 5);
        assert!(cardio.iter().all(|e| e.category == Category::Cardio));
    }

    #[test]
    fn query_matches_substring_and_typos() {
        let catalog = default_catalog();
        let filter = ExerciseFilter {
            category: None,
            query: Some("PRESS".into()),
        };
        let names: Vec<&str> = list_exercises(&catalog, &filter)
            .into_iter()
            .map(|e| e.name.as_str())
            .collect();
        assert!(names.contains(&"Bench Press"));
        assert!(names.contains(&"Leg Press"));

        let typo = ExerciseFilter {
            category: None,
            query: Some("deadlfit".into()),
        };
        let hits = list_exercises(&catalog, &typo);
        assert_eq!(hits.first().map(|e| e.id.as_str()), Some("deadlift"));
    }

    #[test]
    fn create_exercise_trims_and_falls_back() {
        let mut catalog = default_catalog();
        let ex = create_exercise(&mut catalog, "  Hip Thrust ", Category::Weight, "", "abc").unwrap();
        assert_eq!(ex.name, "Hip Thrust");
        assert_eq!(ex.default_sets, 3);
        assert_eq!(ex.default_reps, 10);
        assert_eq!(catalog.len(), 27);

        let err = create_exercise(&mut catalog, "   ", Category::Cardio, "1", "1").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidInput(_)));
        assert_eq!(catalog.len(), 27);
    }

    #[test]
    fn create_exercise_rejects_huge_counts() {
        let mut catalog = default_catalog();
        let err = create_exercise(&mut catalog, "Burpee", Category::Bodyweight, "4000000000", "10")
            .unwrap_err();
        assert!(matches!(err, TrackerError::InvalidInput(_)));
        let err = create_exercise(&mut catalog, "Burpee", Category::Bodyweight, "3", "1001")
            .unwrap_err();
        assert!(matches!(err, TrackerError::InvalidInput(_)));
        assert_eq!(catalog.len(), 26);

        let ex = create_exercise(&mut catalog, "Burpee", Category::Bodyweight, "100", "1000").unwrap();
        assert_eq!(ex.default_sets, MAX_DEFAULT_SETS);
        assert_eq!(ex.default_reps, MAX_DEFAULT_REPS);
    }

    #[test]
    fn prefill_count_guards_hand_edited_catalog() {
        let mut ex = Exercise {
            id: "x".into(),
            name: "X".into(),
            category: Category::Weight,
            default_sets: 0,
            default_reps: 5,
        };
        assert_eq!(prefill_set_count(&ex), 3);
        ex.default_sets = u32::MAX;
        assert_eq!(prefill_set_count(&ex), 100);
        ex.default_sets = 5;
        assert_eq!(prefill_set_count(&ex), 5);
    }

    #[test]
    fn defaults_cannot_be_deleted() {
        let mut catalog = default_catalog();
        let err = delete_exercise(&mut catalog, "squat").unwrap_err();
        assert!(matches!(err, TrackerError::ProtectedExercise(_)));

        let custom = create_exercise(&mut catalog, "Sled Push", Category::Weight, "4", "1").unwrap();
        let removed = delete_exercise(&mut catalog, &custom.id).unwrap();
        assert_eq!(removed.name, "Sled Push");
        assert!(matches!(
            delete_exercise(&mut catalog, &custom.id),
            Err(TrackerError::NotFound { .. })
        ));
    }
}
