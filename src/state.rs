//! In-memory application state: every persisted collection in one place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::{Result, TrackerError};
use crate::model::{
    BodyWeightEntry, Exercise, PersonalRecord, RecordKey, RecordMetric, Template, Workout,
};

/// Personal records keyed by exercise name and metric.
///
/// Stored on disk as a flat list because JSON object keys must be strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PersonalRecord>", into = "Vec<PersonalRecord>")]
pub struct PersonalRecords(BTreeMap<RecordKey, PersonalRecord>);

impl PersonalRecords {
    pub fn get(&self, exercise: &str, metric: RecordMetric) -> Option<&PersonalRecord> {
        self.0.get(&RecordKey::new(exercise, metric))
    }

    pub fn insert(&mut self, record: PersonalRecord) {
        self.0.insert(record.key(), record);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonalRecord> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PersonalRecord>> for PersonalRecords {
    fn from(records: Vec<PersonalRecord>) -> Self {
        let mut map = PersonalRecords::default();
        for r in records {
            map.insert(r);
        }
        map
    }
}

impl From<PersonalRecords> for Vec<PersonalRecord> {
    fn from(records: PersonalRecords) -> Self {
        records.0.into_values().collect()
    }
}

/// Everything the engines operate on. History is kept most recent first.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub exercises: Vec<Exercise>,
    pub workouts: Vec<Workout>,
    pub current_workout: Option<Workout>,
    pub templates: Vec<Template>,
    pub body_weight_log: Vec<BodyWeightEntry>,
    pub personal_records: PersonalRecords,
}

impl Default for AppState {
    /// Fresh install: seeded catalog, nothing logged.
    fn default() -> Self {
        Self {
            exercises: catalog::default_catalog(),
            workouts: Vec::new(),
            current_workout: None,
            templates: Vec::new(),
            body_weight_log: Vec::new(),
            personal_records: PersonalRecords::default(),
        }
    }
}

impl AppState {
    pub fn get_workout(&self, id: &str) -> Result<&Workout> {
        self.workouts
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| TrackerError::not_found("Workout", id))
    }

    pub fn get_template(&self, id: &str) -> Result<&Template> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TrackerError::not_found("Template", id))
    }

    pub fn get_record(&self, exercise: &str, metric: RecordMetric) -> Option<&PersonalRecord> {
        self.personal_records.get(exercise, metric)
    }
}
