//! CSV export of the workout history.
//!
//! Each set becomes its own row so the file can be pivoted in a
//! spreadsheet without unpacking the reps/weights arrays.

use crate::view::expand_sets;
use crate::{Result, WorkoutRecord};
use std::fs::File;
use std::path::Path;

/// Column names, in `CsvRow` field order
const HEADERS: [&str; 11] = [
    "id",
    "date",
    "gym_location",
    "category",
    "name",
    "type",
    "cable_height",
    "set",
    "reps",
    "weight",
    "unit",
];

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    id: String,
    date: String,
    gym_location: &'a str,
    category: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    exercise_type: String,
    cable_height: Option<&'a str>,
    set: u32,
    reps: u32,
    weight: f64,
    unit: String,
}

/// Write `records` to `path` as CSV, one row per set.
///
/// The file is created (or truncated) with a header row and synced to disk.
/// Returns the number of rows written.
pub fn export_csv(records: &[WorkoutRecord], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    // Written up front so an empty history still gets a header row
    writer.write_record(HEADERS)?;

    let mut rows = 0;
    for record in records {
        for line in expand_sets(record) {
            writer.serialize(CsvRow {
                id: record.id.to_string(),
                date: record.timestamp.to_rfc3339(),
                gym_location: &record.gym_location,
                category: record.category.as_str(),
                name: &record.name,
                exercise_type: record.exercise_type.to_string(),
                cable_height: record.cable_height.as_deref(),
                set: line.set,
                reps: line.reps,
                weight: line.weight,
                unit: line.unit.to_string(),
            })?;
            rows += 1;
        }
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} workouts ({} sets) to {:?}", records.len(), rows, path);
    Ok(rows)
}
