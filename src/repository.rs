//! Persistence of the tracker collections.
//!
//! Each collection is stored as one JSON document under a fixed key and is
//! rewritten in full after every change. No business logic lives here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::catalog;
use crate::error::{Result, TrackerError};
use crate::model::Workout;
use crate::state::AppState;

/// Named collection in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Exercises,
    Workouts,
    CurrentWorkout,
    Templates,
    BodyWeightLog,
    PersonalRecords,
}

impl Collection {
    pub fn key(self) -> &'static str {
        match self {
            Collection::Exercises => "exercises",
            Collection::Workouts => "workouts",
            Collection::CurrentWorkout => "currentWorkout",
            Collection::Templates => "templates",
            Collection::BodyWeightLog => "bodyWeightLog",
            Collection::PersonalRecords => "personalRecords",
        }
    }
}

/// Key-value backend holding one serialized document per key.
pub trait Store {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, data: &str) -> Result<()>;
}

/// Store keeping everything in memory. Used by tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.docs.get(key).cloned())
    }

    fn write(&mut self, key: &str, data: &str) -> Result<()> {
        self.docs.insert(key.to_string(), data.to_string());
        Ok(())
    }
}

/// Store writing `<key>.json` files into a directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Store for JsonStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, data: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        // write then rename so a crash never leaves a half-written document
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, self.path(key))?;
        Ok(())
    }
}

fn read_doc<T: DeserializeOwned>(store: &impl Store, collection: Collection) -> Result<Option<T>> {
    let key = collection.key();
    let Some(data) = store.read(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&data)
        .map(Some)
        .map_err(|source| TrackerError::Serialization { key, source })
}

fn write_doc<T: Serialize + ?Sized>(
    store: &mut impl Store,
    collection: Collection,
    value: &T,
) -> Result<()> {
    let key = collection.key();
    let data = serde_json::to_string_pretty(value)
        .map_err(|source| TrackerError::Serialization { key, source })?;
    store.write(key, &data)
}

/// Load every collection. A store without an exercise catalog is treated as
/// a first run: the default catalog is seeded and written back.
pub fn load_state(store: &mut impl Store) -> Result<AppState> {
    let exercises = match read_doc(&*store, Collection::Exercises)? {
        Some(exercises) => exercises,
        None => {
            log::info!("Seeding default exercise catalog");
            let defaults = catalog::default_catalog();
            write_doc(store, Collection::Exercises, &defaults)?;
            defaults
        }
    };
    let workouts: Vec<Workout> = read_doc(&*store, Collection::Workouts)?.unwrap_or_default();
    let mut current_workout =
        read_doc::<Option<Workout>>(&*store, Collection::CurrentWorkout)?.flatten();
    // a finish interrupted after history was written
    if let Some(current) = &current_workout {
        if workouts.iter().any(|w| w.id == current.id) {
            log::warn!("Dropping current workout {} already in history", current.id);
            current_workout = None;
            write_doc(store, Collection::CurrentWorkout, &current_workout)?;
        }
    }
    let state = AppState {
        exercises,
        workouts,
        current_workout,
        templates: read_doc(&*store, Collection::Templates)?.unwrap_or_default(),
        body_weight_log: read_doc(&*store, Collection::BodyWeightLog)?.unwrap_or_default(),
        personal_records: read_doc(&*store, Collection::PersonalRecords)?.unwrap_or_default(),
    };
    log::info!(
        "Loaded {} exercises, {} workouts, {} templates",
        state.exercises.len(),
        state.workouts.len(),
        state.templates.len()
    );
    Ok(state)
}

/// Overwrite one collection with its current in-memory value.
pub fn save_collection(store: &mut impl Store, state: &AppState, collection: Collection) -> Result<()> {
    log::debug!("Saving {}", collection.key());
    match collection {
        Collection::Exercises => write_doc(store, collection, &state.exercises),
        Collection::Workouts => write_doc(store, collection, &state.workouts),
        Collection::CurrentWorkout => write_doc(store, collection, &state.current_workout),
        Collection::Templates => write_doc(store, collection, &state.templates),
        Collection::BodyWeightLog => write_doc(store, collection, &state.body_weight_log),
        Collection::PersonalRecords => write_doc(store, collection, &state.personal_records),
    }
}
