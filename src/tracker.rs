//! Application facade used by the presentation layer.
//!
//! [`Tracker`] owns the [`AppState`] and a [`Store`]. Every mutating call
//! runs the engine operation first and only persists the collections it
//! touched once the operation succeeded. A rejected call or a failed write
//! changes neither memory nor disk.

use chrono::{NaiveDate, NaiveDateTime};

use crate::analysis::{
    self, PeriodSummary, ProgressMetric, ProgressPoint, ProgressStats,
};
use crate::body_weight;
use crate::catalog::{self, ExerciseFilter};
use crate::error::Result;
use crate::model::{
    BodyWeightEntry, Category, Exercise, PersonalRecord, RecordMetric, Set, Template, Workout,
};
use crate::records::PrNotice;
use crate::repository::{self, Collection, Store};
use crate::session::SetInput;
use crate::state::AppState;
use crate::templates;

pub struct Tracker<S: Store> {
    state: AppState,
    store: S,
}

impl<S: Store> Tracker<S> {
    /// Load all collections from `store`, seeding the catalog on first run.
    pub fn open(mut store: S) -> Result<Self> {
        let state = repository::load_state(&mut store)?;
        Ok(Self { state, store })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn persist(&mut self, collections: &[Collection]) -> Result<()> {
        for c in collections {
            repository::save_collection(&mut self.store, &self.state, *c)?;
        }
        Ok(())
    }

    /// Apply `op` to the state and save `touched`.
    ///
    /// When a write fails the in-memory state is restored and the touched
    /// collections are rewritten from it, so memory and disk both end up
    /// where they were before the call.
    fn commit<T>(
        &mut self,
        touched: &[Collection],
        op: impl FnOnce(&mut AppState) -> Result<T>,
    ) -> Result<T> {
        let snapshot = self.state.clone();
        let out = match op(&mut self.state) {
            Ok(out) => out,
            Err(e) => {
                self.state = snapshot;
                return Err(e);
            }
        };
        if let Err(e) = self.persist(touched) {
            log::error!("Save failed, rolling back: {e}");
            self.state = snapshot;
            for c in touched {
                if let Err(undo) = repository::save_collection(&mut self.store, &self.state, *c) {
                    log::warn!("Could not restore {}: {undo}", c.key());
                }
            }
            return Err(e);
        }
        Ok(out)
    }

    // ---- catalog ----

    pub fn list_exercises(&self, filter: &ExerciseFilter) -> Vec<&Exercise> {
        catalog::list_exercises(&self.state.exercises, filter)
    }

    pub fn create_exercise(
        &mut self,
        name: &str,
        category: Category,
        default_sets: &str,
        default_reps: &str,
    ) -> Result<Exercise> {
        self.commit(&[Collection::Exercises], |state| {
            catalog::create_exercise(
                &mut state.exercises,
                name,
                category,
                default_sets,
                default_reps,
            )
        })
    }

    pub fn delete_exercise(&mut self, id: &str) -> Result<Exercise> {
        self.commit(&[Collection::Exercises], |state| {
            catalog::delete_exercise(&mut state.exercises, id)
        })
    }

    // ---- session ----

    pub fn current_session(&self) -> Option<&Workout> {
        self.state.current_workout.as_ref()
    }

    pub fn start_session(&mut self, date: NaiveDate) -> Result<&Workout> {
        self.commit(&[Collection::CurrentWorkout], |state| {
            state.start_session(date).map(drop)
        })?;
        self.state.current_session()
    }

    /// Run `edit` against the current session and save it afterwards.
    fn edit_session<T>(&mut self, edit: impl FnOnce(&mut Workout) -> Result<T>) -> Result<T> {
        self.commit(&[Collection::CurrentWorkout], |state| {
            edit(state.current_session_mut()?)
        })
    }

    pub fn add_exercise(&mut self, exercise_id: &str) -> Result<()> {
        self.commit(&[Collection::CurrentWorkout], |state| {
            state.add_exercise(exercise_id).map(drop)
        })
    }

    pub fn remove_exercise(&mut self, index: usize) -> Result<()> {
        self.edit_session(|w| w.remove_exercise(index).map(drop))
    }

    pub fn log_sets(&mut self, exercise_index: usize, sets: &[SetInput]) -> Result<()> {
        self.edit_session(|w| w.log_sets(exercise_index, sets))
    }

    pub fn add_set(&mut self, exercise_index: usize) -> Result<Set> {
        self.edit_session(|w| w.add_set(exercise_index))
    }

    pub fn remove_set(&mut self, exercise_index: usize, set_index: usize) -> Result<()> {
        self.edit_session(|w| w.remove_set(exercise_index, set_index).map(drop))
    }

    pub fn set_notes(&mut self, text: &str) -> Result<()> {
        self.edit_session(|w| {
            w.set_notes(text);
            Ok(())
        })
    }

    pub fn set_exercise_notes(&mut self, index: usize, text: &str) -> Result<()> {
        self.edit_session(|w| w.set_exercise_notes(index, text))
    }

    /// History and records are written before the current slot is cleared;
    /// a reload drops a current workout that already sits in history.
    pub fn finish_session(&mut self) -> Result<(Workout, Vec<PrNotice>)> {
        self.commit(
            &[
                Collection::Workouts,
                Collection::PersonalRecords,
                Collection::CurrentWorkout,
            ],
            AppState::finish_session,
        )
    }

    pub fn discard_session(&mut self) -> Result<()> {
        self.commit(&[Collection::CurrentWorkout], |state| {
            state.discard_session().map(drop)
        })
    }

    // ---- templates ----

    pub fn save_template(&mut self, name: &str) -> Result<Template> {
        self.commit(&[Collection::Templates], |state| {
            let template = templates::save_template(state.current_session()?, name)?;
            log::info!("Saved template {}", template.name);
            state.templates.push(template.clone());
            Ok(template)
        })
    }

    /// Start a new session from a stored template.
    pub fn load_template(&mut self, id: &str, date: NaiveDate) -> Result<&Workout> {
        self.commit(&[Collection::CurrentWorkout], |state| {
            let workout = templates::load_template(state.get_template(id)?, date);
            state.begin(workout).map(drop)
        })?;
        self.state.current_session()
    }

    pub fn delete_template(&mut self, id: &str) -> Result<bool> {
        if self.state.get_template(id).is_err() {
            return Ok(false);
        }
        self.commit(&[Collection::Templates], |state| {
            Ok(templates::delete_template(&mut state.templates, id))
        })
    }

    /// Start a new session repeating a finished workout.
    pub fn repeat_workout(&mut self, id: &str, date: NaiveDate) -> Result<&Workout> {
        self.commit(&[Collection::CurrentWorkout], |state| {
            let workout = templates::repeat_workout(state.get_workout(id)?, date);
            state.begin(workout).map(drop)
        })?;
        self.state.current_session()
    }

    // ---- body weight ----

    /// Log body weight from raw text; anything that does not parse to a
    /// positive number is rejected.
    pub fn log_body_weight(&mut self, date: NaiveDate, weight: &str) -> Result<()> {
        let weight = crate::input::parse_amount(weight);
        self.commit(&[Collection::BodyWeightLog], |state| {
            body_weight::log_body_weight(&mut state.body_weight_log, date, weight)
        })
    }

    pub fn get_weight_history(&self, limit: usize) -> &[BodyWeightEntry] {
        body_weight::weight_history(&self.state.body_weight_log, limit)
    }

    // ---- read accessors and analytics ----

    pub fn get_workout(&self, id: &str) -> Result<&Workout> {
        self.state.get_workout(id)
    }

    pub fn get_template(&self, id: &str) -> Result<&Template> {
        self.state.get_template(id)
    }

    pub fn get_record(&self, exercise: &str, metric: RecordMetric) -> Option<&PersonalRecord> {
        self.state.get_record(exercise, metric)
    }

    pub fn weekly_summary(&self, now: NaiveDateTime) -> PeriodSummary {
        analysis::weekly_summary(&self.state.workouts, now)
    }

    pub fn monthly_summary(&self, now: NaiveDateTime) -> PeriodSummary {
        analysis::monthly_summary(&self.state.workouts, now)
    }

    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        analysis::current_streak(&self.state.workouts, today)
    }

    pub fn progress_series<'a>(
        &'a self,
        exercise: &'a str,
        metric: ProgressMetric,
    ) -> impl Iterator<Item = ProgressPoint> + Clone + 'a {
        analysis::progress_series(&self.state.workouts, exercise, metric)
    }

    pub fn progress_stats(&self, exercise: &str, metric: ProgressMetric) -> Option<ProgressStats> {
        analysis::progress_stats(self.progress_series(exercise, metric))
    }
}
