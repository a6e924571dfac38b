//! Personal record detection for finished workouts.

use std::fmt;

use serde::Serialize;

use crate::model::{PersonalRecord, RecordMetric, Workout};
use crate::state::PersonalRecords;

/// A new weight PR, reported back to the user after finishing a workout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrNotice {
    pub exercise: String,
    pub value: f64,
}

impl fmt::Display for PrNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} lbs", self.exercise, self.value)
    }
}

/// Fold a finished workout into the record book.
///
/// Every non-cardio exercise is scored on its heaviest set and its total
/// volume. A metric is replaced only when the new value is positive and
/// strictly beats the stored one, so equal efforts never overwrite the
/// original date. Only weight records produce a [`PrNotice`].
pub fn update_records(records: &mut PersonalRecords, workout: &Workout) -> Vec<PrNotice> {
    let mut notices = Vec::new();
    for ex in workout.exercises.iter().filter(|e| !e.category.is_cardio()) {
        let scores = [
            (RecordMetric::Weight, ex.max_weight()),
            (RecordMetric::Volume, ex.total_volume()),
        ];
        for (metric, value) in scores {
            if value <= 0.0 {
                continue;
            }
            let beats = records
                .get(&ex.name, metric)
                .map_or(true, |existing| value > existing.value);
            if !beats {
                continue;
            }
            log::debug!("New {metric} record for {}: {value}", ex.name);
            records.insert(PersonalRecord {
                exercise: ex.name.clone(),
                metric,
                value,
                date: workout.date,
            });
            if metric == RecordMetric::Weight {
                notices.push(PrNotice {
                    exercise: ex.name.clone(),
                    value,
                });
            }
        }
    }
    notices
}
