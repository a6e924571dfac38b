//! Reusable workout templates and workout replay.

use chrono::NaiveDate;

use crate::error::{Result, TrackerError};
use crate::model::{Template, TemplateExercise, Workout, WorkoutExercise, new_id};

/// Snapshot the exercise and set structure of `session` under `name`.
///
/// Notes are dropped. The name is stored trimmed.
pub fn save_template(session: &Workout, name: &str) -> Result<Template> {
    if session.exercises.is_empty() {
        return Err(TrackerError::EmptySession);
    }
    let name = name.trim();
    if name.is_empty() {
        return Err(TrackerError::InvalidInput(
            "template name must not be blank".into(),
        ));
    }
    let exercises = session
        .exercises
        .iter()
        .map(|ex| TemplateExercise {
            exercise_id: ex.exercise_id.clone(),
            name: ex.name.clone(),
            category: ex.category,
            sets: ex.sets.clone(),
        })
        .collect();
    Ok(Template {
        id: new_id(),
        name: name.to_string(),
        exercises,
    })
}

/// Build a new workout for `date` from `template`.
pub fn load_template(template: &Template, date: NaiveDate) -> Workout {
    let mut workout = Workout::new(date);
    workout.exercises = template
        .exercises
        .iter()
        .map(|ex| WorkoutExercise {
            exercise_id: ex.exercise_id.clone(),
            name: ex.name.clone(),
            category: ex.category,
            notes: String::new(),
            sets: ex.sets.clone(),
        })
        .collect();
    workout
}

/// Remove a template by id. Returns whether anything was removed.
pub fn delete_template(templates: &mut Vec<Template>, id: &str) -> bool {
    let before = templates.len();
    templates.retain(|t| t.id != id);
    templates.len() != before
}

/// Start over from a past workout: same exercises and sets, new identity.
pub fn repeat_workout(workout: &Workout, date: NaiveDate) -> Workout {
    let mut copy = Workout::new(date);
    copy.exercises = workout.exercises.clone();
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Set};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    fn session() -> Workout {
        let mut w = Workout::new(day(1));
        w.notes = "leg day".into();
        w.exercises = vec![
            WorkoutExercise {
                exercise_id: "squat".into(),
                name: "Squat".into(),
                category: Category::Weight,
                notes: "belt on last set".into(),
                sets: vec![Set::strength(5, 225.0), Set::strength(3, 245.5)],
            },
            WorkoutExercise {
                exercise_id: "rowing".into(),
                name: "Rowing".into(),
                category: Category::Cardio,
                notes: String::new(),
                sets: vec![Set::cardio(12.5, 140.0)],
            },
        ];
        w
    }

    #[test]
    fn save_then_load_roundtrips_structure() {
        let original = session();
        let template = save_template(&original, "  Legs A ").unwrap();
        assert_eq!(template.name, "Legs A");

        let loaded = load_template(&template, day(8));
        assert_ne!(loaded.id, original.id);
        assert_eq!(loaded.date, day(8));
        assert!(loaded.notes.is_empty());
        assert_eq!(loaded.exercises.len(), 2);
        for (a, b) in loaded.exercises.iter().zip(&original.exercises) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.category, b.category);
            assert_eq!(a.sets, b.sets);
            assert!(a.notes.is_empty());
        }
    }

    #[test]
    fn loaded_workouts_are_independent_copies() {
        let template = save_template(&session(), "Legs").unwrap();
        let mut first = load_template(&template, day(2));
        first.exercises[0].sets[0].weight = 999.0;
        let second = load_template(&template, day(3));
        assert_eq!(second.exercises[0].sets[0].weight, 225.0);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn save_rejects_empty_session_and_blank_name() {
        let empty = Workout::new(day(1));
        assert!(matches!(
            save_template(&empty, "x"),
            Err(TrackerError::EmptySession)
        ));
        assert!(matches!(
            save_template(&session(), "   "),
            Err(TrackerError::InvalidInput(_))
        ));
    }

    #[test]
    fn delete_missing_template_is_noop() {
        let t = save_template(&session(), "Legs").unwrap();
        let mut templates = vec![t.clone()];
        assert!(!delete_template(&mut templates, "nope"));
        assert_eq!(templates.len(), 1);
        assert!(delete_template(&mut templates, &t.id));
        assert!(templates.is_empty());
    }

    #[test]
    fn repeat_keeps_sets_with_new_identity() {
        let past = session();
        let again = repeat_workout(&past, day(15));
        assert_ne!(again.id, past.id);
        assert_eq!(again.date, day(15));
        assert!(again.notes.is_empty());
        assert_eq!(again.exercises, past.exercises);
    }
}
