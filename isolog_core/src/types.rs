//! Core domain types for IsoLog.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise categories, equipment type and weight units
//! - The persisted workout record
//! - Sort order for the history view

use crate::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Exercise Classification
// ============================================================================

/// Muscle-group category a workout is filed under
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    Cardio,
    /// Stored when the form leaves the category blank
    Uncategorized,
}

impl Category {
    /// The categories a user can pick from (excludes `Uncategorized`)
    pub const SELECTABLE: [Category; 7] = [
        Category::Chest,
        Category::Back,
        Category::Legs,
        Category::Shoulders,
        Category::Arms,
        Category::Core,
        Category::Cardio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Chest => "Chest",
            Category::Back => "Back",
            Category::Legs => "Legs",
            Category::Shoulders => "Shoulders",
            Category::Arms => "Arms",
            Category::Core => "Core",
            Category::Cardio => "Cardio",
            Category::Uncategorized => "Uncategorized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::SELECTABLE
            .iter()
            .chain(std::iter::once(&Category::Uncategorized))
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| ValidationError::UnknownCategory(wanted.to_string()))
    }
}

/// Equipment used for the exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    #[default]
    Freeweight,
    Cable,
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseType::Freeweight => f.write_str("freeweight"),
            ExerciseType::Cable => f.write_str("cable"),
        }
    }
}

impl FromStr for ExerciseType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "freeweight" | "free" | "free_weight" => Ok(ExerciseType::Freeweight),
            "cable" => Ok(ExerciseType::Cable),
            other => Err(ValidationError::UnknownExerciseType(other.to_string())),
        }
    }
}

/// Unit all weights of a record are expressed in
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Lb,
    Kg,
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Lb => f.write_str("lb"),
            WeightUnit::Kg => f.write_str("kg"),
        }
    }
}

impl FromStr for WeightUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lb" | "lbs" => Ok(WeightUnit::Lb),
            "kg" | "kgs" => Ok(WeightUnit::Kg),
            other => Err(ValidationError::UnknownWeightUnit(other.to_string())),
        }
    }
}

// ============================================================================
// Workout Record
// ============================================================================

/// One logged exercise instance.
///
/// Records are immutable once built; the store only ever inserts or
/// deletes them. Field names on disk follow the camelCase layout of the
/// `workouts` storage key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub gym_location: String,
    pub category: Category,
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    #[serde(default)]
    pub cable_height: Option<String>,
    #[serde(rename = "sets")]
    pub set_count: u32,
    pub reps: Vec<u32>,
    pub weights: Vec<f64>,
    pub weight_unit: WeightUnit,
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
}

impl WorkoutRecord {
    /// Check the structural invariants every stored record must hold.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.set_count < 1 {
            return Err(ValidationError::Invariant("set count is zero".into()));
        }

        let sets = self.set_count as usize;
        if self.reps.len() != sets || self.weights.len() != sets {
            return Err(ValidationError::Invariant(format!(
                "{} sets but {} reps and {} weights",
                sets,
                self.reps.len(),
                self.weights.len()
            )));
        }

        if self.reps.iter().any(|&r| r < 1) {
            return Err(ValidationError::Invariant("reps below 1".into()));
        }

        if self.weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ValidationError::Invariant("negative or non-finite weight".into()));
        }

        let has_height = self
            .cable_height
            .as_deref()
            .is_some_and(|h| !h.trim().is_empty());
        match (self.exercise_type, has_height, self.cable_height.is_some()) {
            (ExerciseType::Cable, false, _) => Err(ValidationError::Invariant(
                "cable exercise without a cable height".into(),
            )),
            (ExerciseType::Freeweight, _, true) => Err(ValidationError::Invariant(
                "free-weight exercise with a cable height".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Calendar date (UTC) used for display and search
    pub fn date_key(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }
}

// ============================================================================
// View State
// ============================================================================

/// Display ordering of the history view
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Newest => f.write_str("newest"),
            SortOrder::Oldest => f.write_str("oldest"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            other => Err(format!("unknown sort order '{}' (expected newest or oldest)", other)),
        }
    }
}
