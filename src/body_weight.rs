use chrono::NaiveDate;

use crate::error::{Result, TrackerError};
use crate::model::BodyWeightEntry;

pub const DEFAULT_HISTORY_LIMIT: usize = 30;

/// Record the body weight for `date`, replacing any entry already logged
/// that day. The log stays sorted by date.
pub fn log_body_weight(log: &mut Vec<BodyWeightEntry>, date: NaiveDate, weight: f64) -> Result<()> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(TrackerError::InvalidInput(format!(
            "body weight must be positive, got {weight}"
        )));
    }
    let entry = BodyWeightEntry { date, weight };
    match log.binary_search_by_key(&date, |e| e.date) {
        Ok(i) => log[i] = entry,
        Err(i) => log.insert(i, entry),
    }
    Ok(())
}

/// The `limit` most recent entries, oldest first.
pub fn weight_history(log: &[BodyWeightEntry], limit: usize) -> &[BodyWeightEntry] {
    &log[log.len().saturating_sub(limit)..]
}
