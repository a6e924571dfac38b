use crate::analysis::{PeriodSummary, ProgressPoint};
use crate::model::{BodyWeightEntry, Category, PersonalRecord, RecordMetric, Workout};
use crate::state::PersonalRecords;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(
    value: &T,
    path: P,
) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, value).map_err(std::io::Error::other)
}

pub fn write_csv<T: Serialize>(writer: impl Write, records: &[T]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for r in records {
        wtr.serialize(r)?;
    }
    wtr.flush().map_err(Into::into)
}

/// One row per logged set.
#[derive(Debug, Serialize)]
struct SetRow<'a> {
    workout_id: &'a str,
    date: NaiveDate,
    exercise: &'a str,
    category: Category,
    set: usize,
    reps: u32,
    weight: f64,
    duration: f64,
    calories: f64,
}

fn set_rows(workouts: &[Workout]) -> Vec<SetRow<'_>> {
    let mut rows = Vec::new();
    for w in workouts {
        for ex in &w.exercises {
            for (i, s) in ex.sets.iter().enumerate() {
                rows.push(SetRow {
                    workout_id: &w.id,
                    date: w.date,
                    exercise: &ex.name,
                    category: ex.category,
                    set: i + 1,
                    reps: s.reps,
                    weight: s.weight,
                    duration: s.duration,
                    calories: s.calories,
                });
            }
        }
    }
    rows
}

/// Flatten history into a set-per-row CSV.
pub fn write_history_csv(writer: impl Write, workouts: &[Workout]) -> csv::Result<()> {
    write_csv(writer, &set_rows(workouts))
}

pub fn save_history_csv<P: AsRef<Path>>(path: P, workouts: &[Workout]) -> csv::Result<()> {
    write_history_csv(std::fs::File::create(path)?, workouts)
}

pub fn save_history_json<P: AsRef<Path>>(path: P, workouts: &[Workout]) -> std::io::Result<()> {
    write_json(workouts, path)
}

pub fn save_records_csv<P: AsRef<Path>>(path: P, records: &PersonalRecords) -> csv::Result<()> {
    let rows: Vec<&PersonalRecord> = records.iter().collect();
    write_csv(std::fs::File::create(path)?, &rows)
}

pub fn save_records_json<P: AsRef<Path>>(path: P, records: &PersonalRecords) -> std::io::Result<()> {
    write_json(records, path)
}

pub fn save_body_weight_csv<P: AsRef<Path>>(path: P, log: &[BodyWeightEntry]) -> csv::Result<()> {
    write_csv(std::fs::File::create(path)?, log)
}

pub fn save_progress_csv<P: AsRef<Path>>(path: P, series: &[ProgressPoint]) -> csv::Result<()> {
    write_csv(std::fs::File::create(path)?, series)
}

#[derive(Serialize)]
pub struct SummaryExport<'a> {
    pub weekly: &'a PeriodSummary,
    pub monthly: &'a PeriodSummary,
    pub streak: u32,
    pub records: Vec<&'a PersonalRecord>,
}

pub fn save_summary_json<P: AsRef<Path>>(
    path: P,
    weekly: &PeriodSummary,
    monthly: &PeriodSummary,
    streak: u32,
    records: &PersonalRecords,
) -> std::io::Result<()> {
    let export = SummaryExport {
        weekly,
        monthly,
        streak,
        records: records
            .iter()
            .filter(|r| r.metric == RecordMetric::Weight)
            .collect(),
    };
    write_json(&export, path)
}
