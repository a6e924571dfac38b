//! Lifecycle of the in-progress workout.
//!
//! Positional operations live on [`Workout`] so they can be exercised on any
//! draft; starting, finishing and discarding go through [`AppState`] because
//! they move the session in and out of the current-workout slot.

use chrono::NaiveDate;

use crate::catalog::{find_exercise, prefill_set_count};
use crate::error::{Result, TrackerError};
use crate::input::{parse_amount, parse_count};
use crate::model::{Category, Exercise, Set, Workout, WorkoutExercise};
use crate::records::{PrNotice, update_records};
use crate::state::AppState;

/// Raw text for one set as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum SetInput {
    Strength { reps: String, weight: String },
    Cardio { duration: String, calories: String },
}

impl SetInput {
    pub fn strength(reps: impl Into<String>, weight: impl Into<String>) -> Self {
        SetInput::Strength {
            reps: reps.into(),
            weight: weight.into(),
        }
    }

    pub fn cardio(duration: impl Into<String>, calories: impl Into<String>) -> Self {
        SetInput::Cardio {
            duration: duration.into(),
            calories: calories.into(),
        }
    }

    /// Parse into a [`Set`], rejecting input of the wrong shape for `category`.
    fn parse_for(&self, category: Category) -> Result<Set> {
        match (self, category.is_cardio()) {
            (SetInput::Strength { reps, weight }, false) => {
                Ok(Set::strength(parse_count(reps), parse_amount(weight)))
            }
            (SetInput::Cardio { duration, calories }, true) => {
                Ok(Set::cardio(parse_amount(duration), parse_amount(calories)))
            }
            (SetInput::Strength { .. }, true) => Err(TrackerError::InvalidInput(
                "cardio exercises take duration and calories".into(),
            )),
            (SetInput::Cardio { .. }, false) => Err(TrackerError::InvalidInput(
                format!("{category} exercises take reps and weight"),
            )),
        }
    }
}

/// Set pre-filled for a freshly added exercise.
fn default_set(exercise: &Exercise) -> Set {
    if exercise.category.is_cardio() {
        Set::default()
    } else {
        Set::strength(exercise.default_reps, 0.0)
    }
}

impl Workout {
    /// Append a snapshot of catalog entry `exercise_id` with its default sets.
    pub fn add_exercise(&mut self, exercise_id: &str, catalog: &[Exercise]) -> Result<&WorkoutExercise> {
        let exercise = find_exercise(catalog, exercise_id)?;
        let sets = vec![default_set(exercise); prefill_set_count(exercise)];
        self.exercises.push(WorkoutExercise {
            exercise_id: exercise.id.clone(),
            name: exercise.name.clone(),
            category: exercise.category,
            notes: String::new(),
            sets,
        });
        Ok(&self.exercises[self.exercises.len() - 1])
    }

    pub fn remove_exercise(&mut self, index: usize) -> Result<WorkoutExercise> {
        TrackerError::check_index(index, self.exercises.len())?;
        Ok(self.exercises.remove(index))
    }

    fn exercise_mut(&mut self, index: usize) -> Result<&mut WorkoutExercise> {
        TrackerError::check_index(index, self.exercises.len())?;
        Ok(&mut self.exercises[index])
    }

    /// Replace every set of one exercise. All input is validated before the
    /// exercise is touched.
    pub fn log_sets(&mut self, exercise_index: usize, sets: &[SetInput]) -> Result<()> {
        let exercise = self.exercise_mut(exercise_index)?;
        let category = exercise.category;
        let parsed = sets
            .iter()
            .map(|s| s.parse_for(category))
            .collect::<Result<Vec<_>>>()?;
        exercise.sets = parsed;
        Ok(())
    }

    /// Append a set copied from the last one, or a blank one if none exist.
    pub fn add_set(&mut self, exercise_index: usize) -> Result<Set> {
        let exercise = self.exercise_mut(exercise_index)?;
        let set = exercise.sets.last().copied().unwrap_or_default();
        exercise.sets.push(set);
        Ok(set)
    }

    /// Remove one set; later sets move up a position. The last remaining set
    /// cannot be removed.
    pub fn remove_set(&mut self, exercise_index: usize, set_index: usize) -> Result<Set> {
        let exercise = self.exercise_mut(exercise_index)?;
        TrackerError::check_index(set_index, exercise.sets.len())?;
        if exercise.sets.len() == 1 {
            return Err(TrackerError::InvalidInput(
                "an exercise needs at least one set".into(),
            ));
        }
        Ok(exercise.sets.remove(set_index))
    }

    pub fn set_notes(&mut self, text: &str) {
        self.notes = text.to_string();
    }

    pub fn set_exercise_notes(&mut self, index: usize, text: &str) -> Result<()> {
        self.exercise_mut(index)?.notes = text.to_string();
        Ok(())
    }
}

impl AppState {
    pub fn current_session(&self) -> Result<&Workout> {
        self.current_workout.as_ref().ok_or(TrackerError::NoActiveSession)
    }

    pub fn current_session_mut(&mut self) -> Result<&mut Workout> {
        self.current_workout.as_mut().ok_or(TrackerError::NoActiveSession)
    }

    /// Install `workout` as the current session unless one is already open.
    pub(crate) fn begin(&mut self, workout: Workout) -> Result<&mut Workout> {
        if self.current_workout.is_some() {
            return Err(TrackerError::SessionActive);
        }
        log::info!("Starting workout {} for {}", workout.id, workout.date);
        Ok(self.current_workout.insert(workout))
    }

    pub fn start_session(&mut self, date: NaiveDate) -> Result<&mut Workout> {
        self.begin(Workout::new(date))
    }

    /// Catalog-aware wrapper around [`Workout::add_exercise`].
    pub fn add_exercise(&mut self, exercise_id: &str) -> Result<&WorkoutExercise> {
        let session = self.current_workout.as_mut().ok_or(TrackerError::NoActiveSession)?;
        session.add_exercise(exercise_id, &self.exercises)
    }

    /// Move the current session into history and update personal records.
    ///
    /// On [`TrackerError::EmptySession`] nothing changes.
    pub fn finish_session(&mut self) -> Result<(Workout, Vec<PrNotice>)> {
        let session = self.current_session()?;
        if session.exercises.is_empty() {
            return Err(TrackerError::EmptySession);
        }
        let Some(workout) = self.current_workout.take() else {
            return Err(TrackerError::NoActiveSession);
        };
        let notices = update_records(&mut self.personal_records, &workout);
        log::info!(
            "Finished workout {} with {} exercises, {} new PRs",
            workout.id,
            workout.exercises.len(),
            notices.len()
        );
        self.workouts.insert(0, workout.clone());
        Ok((workout, notices))
    }

    /// Drop the current session without recording anything.
    pub fn discard_session(&mut self) -> Result<Workout> {
        let workout = self.current_workout.take().ok_or(TrackerError::NoActiveSession)?;
        log::info!("Discarded workout {}", workout.id);
        Ok(workout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordMetric;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn state_with_session() -> AppState {
        let mut state = AppState::default();
        state.start_session(today()).unwrap();
        state
    }

    #[test]
    fn start_creates_empty_session_and_rejects_second() {
        let mut state = AppState::default();
        let id = {
            let w = state.start_session(today()).unwrap();
            assert!(w.exercises.is_empty());
            assert!(w.notes.is_empty());
            assert_eq!(w.date, today());
            w.id.clone()
        };
        assert!(matches!(
            state.start_session(today()),
            Err(TrackerError::SessionActive)
        ));
        assert_eq!(state.current_session().unwrap().id, id);
    }

    #[test]
    fn add_exercise_caps_oversized_catalog_entry() {
        let mut state = state_with_session();
        let squat = state.exercises.iter_mut().find(|e| e.id == "squat").unwrap();
        squat.default_sets = 4_000_000_000;
        let added = state.add_exercise("squat").unwrap();
        assert_eq!(added.sets.len(), 100);
    }

    #[test]
    fn add_exercise_prefills_default_sets() {
        let mut state = state_with_session();
        let deadlift = state.add_exercise("deadlift").unwrap().clone();
        assert_eq!(deadlift.name, "Deadlift");
        assert_eq!(deadlift.sets.len(), 3);
        assert!(deadlift.sets.iter().all(|s| s.reps == 8 && s.weight == 0.0));

        let rope = state.add_exercise("jump-rope").unwrap().clone();
        assert_eq!(rope.category, Category::Cardio);
        assert_eq!(rope.sets.len(), 3);
        assert!(rope.sets.iter().all(|s| *s == Set::default()));
    }

    #[test]
    fn add_unknown_exercise_is_not_found() {
        let mut state = state_with_session();
        assert!(matches!(
            state.add_exercise("zercher-squat"),
            Err(TrackerError::NotFound { .. })
        ));
        assert!(state.current_session().unwrap().exercises.is_empty());
    }

    #[test]
    fn snapshot_survives_catalog_changes() {
        let mut state = state_with_session();
        state.add_exercise("squat").unwrap();
        state.exercises[1].name = "Back Squat".into();
        assert_eq!(state.current_session().unwrap().exercises[0].name, "Squat");
    }

    #[test]
    fn remove_exercise_shifts_entries() {
        let mut state = state_with_session();
        state.add_exercise("squat").unwrap();
        state.add_exercise("bench-press").unwrap();
        state.add_exercise("running").unwrap();
        let session = state.current_session_mut().unwrap();
        let removed = session.remove_exercise(1).unwrap();
        assert_eq!(removed.name, "Bench Press");
        assert_eq!(session.exercises[1].name, "Running");
        assert!(matches!(
            session.remove_exercise(2),
            Err(TrackerError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn log_sets_parses_defensively() {
        let mut state = state_with_session();
        state.add_exercise("bench-press").unwrap();
        let session = state.current_session_mut().unwrap();
        session
            .log_sets(
                0,
                &[
                    SetInput::strength("10", "135"),
                    SetInput::strength("8", "-5"),
                    SetInput::strength("six", "155.5"),
                ],
            )
            .unwrap();
        let sets = &session.exercises[0].sets;
        assert_eq!(
            sets,
            &vec![
                Set::strength(10, 135.0),
                Set::strength(8, 0.0),
                Set::strength(0, 155.5)
            ]
        );
    }

    #[test]
    fn log_sets_rejects_wrong_shape_without_mutating() {
        let mut state = state_with_session();
        state.add_exercise("running").unwrap();
        let session = state.current_session_mut().unwrap();
        let before = session.exercises[0].sets.clone();
        let err = session
            .log_sets(0, &[SetInput::cardio("30", "250"), SetInput::strength("5", "100")])
            .unwrap_err();
        assert!(matches!(err, TrackerError::InvalidInput(_)));
        assert_eq!(session.exercises[0].sets, before);

        session.log_sets(0, &[SetInput::cardio("30", "250")]).unwrap();
        assert_eq!(session.exercises[0].sets, vec![Set::cardio(30.0, 250.0)]);
        assert!(session.log_sets(3, &[]).is_err());
    }

    #[test]
    fn set_add_and_remove_keep_order() {
        let mut state = state_with_session();
        state.add_exercise("squat").unwrap();
        let session = state.current_session_mut().unwrap();
        session
            .log_sets(0, &[SetInput::strength("5", "100"), SetInput::strength("5", "110")])
            .unwrap();
        assert_eq!(session.add_set(0).unwrap(), Set::strength(5, 110.0));
        let removed = session.remove_set(0, 0).unwrap();
        assert_eq!(removed.weight, 100.0);
        let weights: Vec<f64> = session.exercises[0].sets.iter().map(|s| s.weight).collect();
        assert_eq!(weights, vec![110.0, 110.0]);

        session.remove_set(0, 1).unwrap();
        assert!(matches!(
            session.remove_set(0, 0),
            Err(TrackerError::InvalidInput(_))
        ));
        assert!(matches!(
            session.remove_set(0, 4),
            Err(TrackerError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn notes_are_free_text() {
        let mut state = state_with_session();
        state.add_exercise("plank").unwrap();
        let session = state.current_session_mut().unwrap();
        session.set_notes("felt strong");
        session.set_exercise_notes(0, "").unwrap();
        session.set_exercise_notes(0, "hold longer").unwrap();
        assert_eq!(session.notes, "felt strong");
        assert_eq!(session.exercises[0].notes, "hold longer");
        assert!(session.set_exercise_notes(1, "x").is_err());
    }

    #[test]
    fn finishing_empty_session_leaves_it_current() {
        let mut state = state_with_session();
        let before = state.current_workout.clone();
        assert!(matches!(state.finish_session(), Err(TrackerError::EmptySession)));
        assert_eq!(state.current_workout, before);
        assert!(state.workouts.is_empty());
    }

    #[test]
    fn finishing_moves_session_to_history_front() {
        let mut state = AppState::default();
        for (offset, weight) in [(2, "100"), (1, "120")] {
            let date = today() - chrono::Duration::days(offset);
            state.start_session(date).unwrap();
            state.add_exercise("bench-press").unwrap();
            state
                .current_session_mut()
                .unwrap()
                .log_sets(0, &[SetInput::strength("5", weight)])
                .unwrap();
            let (workout, notices) = state.finish_session().unwrap();
            assert_eq!(workout.date, date);
            assert_eq!(notices.len(), 1);
        }
        assert!(state.current_workout.is_none());
        assert_eq!(state.workouts.len(), 2);
        assert_eq!(state.workouts[0].date, today() - chrono::Duration::days(1));
        assert_eq!(
            state.get_record("Bench Press", RecordMetric::Weight).unwrap().value,
            120.0
        );
    }

    #[test]
    fn operations_without_session_fail() {
        let mut state = AppState::default();
        assert!(matches!(state.finish_session(), Err(TrackerError::NoActiveSession)));
        assert!(matches!(state.discard_session(), Err(TrackerError::NoActiveSession)));
        assert!(matches!(
            state.add_exercise("squat"),
            Err(TrackerError::NoActiveSession)
        ));
    }

    #[test]
    fn discard_clears_slot_only() {
        let mut state = state_with_session();
        state.add_exercise("squat").unwrap();
        state.discard_session().unwrap();
        assert!(state.current_workout.is_none());
        assert!(state.workouts.is_empty());
        assert!(state.personal_records.is_empty());
    }
}
