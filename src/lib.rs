//! Workout logging and training analytics engine.
//!
//! The crate records workout sessions, keeps personal records, derives
//! streaks, period summaries and progress series, and manages reusable
//! templates. All state lives in an [`AppState`] owned by a [`Tracker`],
//! which persists each collection through a [`repository::Store`].

pub mod analysis;
pub mod body_weight;
pub mod catalog;
pub mod error;
pub mod export;
pub mod input;
pub mod model;
pub mod records;
pub mod report;
pub mod repository;
pub mod session;
pub mod settings;
pub mod state;
pub mod templates;
pub mod timer;
pub mod tracker;

pub use analysis::{PeriodSummary, ProgressMetric, ProgressPoint, ProgressStats};
pub use catalog::ExerciseFilter;
pub use error::{Result, TrackerError};
pub use model::{
    BodyWeightEntry, Category, Exercise, PersonalRecord, RecordKey, RecordMetric, Set, Template,
    TemplateExercise, Workout, WorkoutExercise,
};
pub use records::PrNotice;
pub use session::SetInput;
pub use settings::Settings;
pub use state::{AppState, PersonalRecords};
pub use tracker::Tracker;
