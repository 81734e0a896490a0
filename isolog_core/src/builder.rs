//! Record builder: turns raw form input into a `WorkoutRecord`.
//!
//! The form is an explicit value rather than ambient UI state, so the whole
//! input path can be exercised without a front end. Per-set slots are kept
//! in step with the set count by [`resize`], and "same for all sets" values
//! are broadcast when the record is built, never at read time.

use crate::{Category, ExerciseType, ValidationError, WeightUnit, WorkoutRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on sets per record
pub const MAX_SET_COUNT: u32 = 100;

/// Raw, loosely typed form state as entered by the user
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkoutForm {
    pub gym_location: String,
    pub category: String,
    pub name: String,
    pub exercise_type: String,
    pub cable_height: String,
    pub set_count: String,
    pub same_weight: bool,
    pub weights: Vec<String>,
    pub same_reps: bool,
    pub reps: Vec<String>,
    pub weight_unit: String,
}

impl Default for WorkoutForm {
    fn default() -> Self {
        Self::with_unit(WeightUnit::default())
    }
}

/// Resize a list of per-set values.
///
/// Trailing values beyond `new_len` are dropped for good; new slots are
/// filled with `default`.
pub fn resize<T: Clone>(values: &[T], new_len: usize, default: T) -> Vec<T> {
    let mut resized: Vec<T> = values.iter().take(new_len).cloned().collect();
    resized.resize(new_len, default);
    resized
}

/// Interpret a raw set count.
///
/// The leading run of digits is taken as the count, so `"2.5"` is 2 and
/// `"3x"` is 3. Input with no leading digits (blank, `"abc"`, `"-2"`) or a
/// count below 1 becomes 1. Unlike weights and reps, a bad set count is
/// coerced rather than rejected. Counts too large for `u64` saturate.
pub fn parse_set_count(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];
    if digits.is_empty() {
        return 1;
    }

    match digits.parse::<u64>() {
        Ok(n) => n.max(1),
        Err(_) => u64::MAX,
    }
}

/// Fit raw per-set input into `slots` slots.
///
/// Missing values become blank slots for the builder to report. Supplying
/// more values than there are slots is an error rather than a silent drop.
pub fn fill_slots(
    values: &[String],
    slots: usize,
    field: &'static str,
) -> Result<Vec<String>, ValidationError> {
    if values.len() > slots {
        return Err(ValidationError::TooManyValues {
            field,
            given: values.len(),
            expected: slots,
        });
    }
    Ok(resize(values, slots, String::new()))
}

impl WorkoutForm {
    /// Empty form with the given weight unit preselected
    pub fn with_unit(unit: WeightUnit) -> Self {
        Self {
            gym_location: String::new(),
            category: String::new(),
            name: String::new(),
            exercise_type: ExerciseType::Freeweight.to_string(),
            cable_height: String::new(),
            set_count: "1".into(),
            same_weight: true,
            weights: vec![String::new()],
            same_reps: true,
            reps: vec![String::new()],
            weight_unit: unit.to_string(),
        }
    }

    /// Number of per-set slots the current set count calls for
    fn per_set_slots(&self) -> usize {
        parse_set_count(&self.set_count).min(u64::from(MAX_SET_COUNT)) as usize
    }

    fn slots_for(&self, uniform: bool) -> usize {
        if uniform {
            1
        } else {
            self.per_set_slots()
        }
    }

    /// Update the set count and resize the per-set slots to match
    pub fn set_set_count(&mut self, raw: &str) {
        self.set_count = raw.to_string();
        self.weights = resize(&self.weights, self.slots_for(self.same_weight), String::new());
        self.reps = resize(&self.reps, self.slots_for(self.same_reps), String::new());
    }

    /// Toggle weight broadcasting. Switching to uniform keeps only the first slot.
    pub fn set_same_weight(&mut self, same: bool) {
        self.same_weight = same;
        self.weights = resize(&self.weights, self.slots_for(same), String::new());
    }

    /// Toggle rep broadcasting. Switching to uniform keeps only the first slot.
    pub fn set_same_reps(&mut self, same: bool) {
        self.same_reps = same;
        self.reps = resize(&self.reps, self.slots_for(same), String::new());
    }

    /// Build a record stamped with the current time
    pub fn build_now(&self) -> Result<WorkoutRecord, ValidationError> {
        self.build(Utc::now())
    }

    /// Validate the form and build a record stamped with `now`
    pub fn build(&self, now: DateTime<Utc>) -> Result<WorkoutRecord, ValidationError> {
        let gym_location = required(&self.gym_location, "gym location")?;
        let name = required(&self.name, "exercise name")?;

        let category = if self.category.trim().is_empty() {
            Category::Uncategorized
        } else {
            self.category.parse()?
        };

        let exercise_type: ExerciseType = self.exercise_type.parse()?;
        let cable_height = match exercise_type {
            ExerciseType::Cable => Some(required(&self.cable_height, "cable height")?),
            ExerciseType::Freeweight => None,
        };

        let set_count = match u32::try_from(parse_set_count(&self.set_count)) {
            Ok(n) if n <= MAX_SET_COUNT => n,
            _ => {
                return Err(ValidationError::TooManySets {
                    input: self.set_count.trim().to_string(),
                    max: MAX_SET_COUNT,
                })
            }
        };

        let weights = expand(&self.weights, self.same_weight, set_count, "weight", parse_weight)?;
        let reps = expand(&self.reps, self.same_reps, set_count, "reps", parse_reps)?;
        let weight_unit: WeightUnit = self.weight_unit.parse()?;

        let record = WorkoutRecord {
            id: Uuid::new_v4(),
            gym_location,
            category,
            name,
            exercise_type,
            cable_height,
            set_count,
            reps,
            weights,
            weight_unit,
            timestamp: now,
        };

        tracing::debug!(
            "Built workout {} ({} x {} sets)",
            record.id,
            record.name,
            record.set_count
        );
        Ok(record)
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(trimmed.to_string())
}

/// Expand raw per-set input to exactly `set_count` parsed values
fn expand<T: Clone>(
    raw: &[String],
    uniform: bool,
    set_count: u32,
    field: &'static str,
    parse: fn(&str, &'static str, usize) -> Result<T, ValidationError>,
) -> Result<Vec<T>, ValidationError> {
    let slot = |i: usize| -> Result<T, ValidationError> {
        match raw.get(i).map(|s| s.trim()).filter(|s| !s.is_empty()) {
            Some(value) => parse(value, field, i + 1),
            None => Err(ValidationError::MissingSetValue { field, set: i + 1 }),
        }
    };

    if uniform {
        let value = slot(0)?;
        Ok(vec![value; set_count as usize])
    } else {
        (0..set_count as usize).map(slot).collect()
    }
}

fn parse_weight(value: &str, field: &'static str, set: usize) -> Result<f64, ValidationError> {
    match value.parse::<f64>() {
        Ok(w) if w.is_finite() && w >= 0.0 => Ok(w),
        _ => Err(ValidationError::InvalidSetValue {
            field,
            set,
            expected: "a number of at least 0",
            value: value.to_string(),
        }),
    }
}

fn parse_reps(value: &str, field: &'static str, set: usize) -> Result<u32, ValidationError> {
    match value.parse::<u32>() {
        Ok(r) if r >= 1 => Ok(r),
        _ => Err(ValidationError::InvalidSetValue {
            field,
            set,
            expected: "a whole number of at least 1",
            value: value.to_string(),
        }),
    }
}
