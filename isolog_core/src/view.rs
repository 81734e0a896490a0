//! History view: filter, sort and per-set expansion.
//!
//! Everything here is a pure function of the canonical collection and the
//! current query. Each entry carries the record's id and canonical index so
//! actions on the view (delete) can be mapped back to the store.

use crate::{SortOrder, WeightUnit, WorkoutRecord};
use uuid::Uuid;

/// Ephemeral view state: search box and sort selector
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub order: SortOrder,
}

impl ViewQuery {
    pub fn new(search: impl Into<String>, order: SortOrder) -> Self {
        Self {
            search: search.into(),
            order,
        }
    }
}

/// A record as displayed, with its position in the canonical collection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewEntry<'a> {
    pub index: usize,
    pub record: &'a WorkoutRecord,
}

impl ViewEntry<'_> {
    pub fn id(&self) -> Uuid {
        self.record.id
    }
}

/// One expanded set of a record
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SetLine {
    /// 1-based
    pub set: u32,
    pub reps: u32,
    pub weight: f64,
    pub unit: WeightUnit,
}

/// Whether `record` matches a search term.
///
/// Matches case-insensitively against the record's `YYYY-MM-DD` date, its
/// category and its gym location. An empty term matches everything.
/// The term is used as typed; surrounding spaces are part of it.
pub fn matches(record: &WorkoutRecord, search: &str) -> bool {
    let term = search.to_lowercase();
    if term.is_empty() {
        return true;
    }

    record.date_key().contains(&term)
        || record.category.as_str().to_lowercase().contains(&term)
        || record.gym_location.to_lowercase().contains(&term)
}

/// Compute the displayed list for `records` under `query`
pub fn compute<'a>(records: &'a [WorkoutRecord], query: &ViewQuery) -> Vec<ViewEntry<'a>> {
    let mut entries: Vec<ViewEntry<'a>> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(record, &query.search))
        .map(|(index, record)| ViewEntry { index, record })
        .collect();

    // sort_by is stable: equal timestamps keep canonical order in both directions
    match query.order {
        SortOrder::Newest => {
            entries.sort_by(|a, b| b.record.timestamp.cmp(&a.record.timestamp))
        }
        SortOrder::Oldest => {
            entries.sort_by(|a, b| a.record.timestamp.cmp(&b.record.timestamp))
        }
    }

    tracing::debug!(
        "View {:?}/{}: {} of {} records",
        query.search,
        query.order,
        entries.len(),
        records.len()
    );
    entries
}

/// Id of the record shown at `position`, if any
pub fn id_at(entries: &[ViewEntry<'_>], position: usize) -> Option<Uuid> {
    entries.get(position).map(ViewEntry::id)
}

/// Expand a record into one line per set
pub fn expand_sets(record: &WorkoutRecord) -> Vec<SetLine> {
    record
        .reps
        .iter()
        .zip(record.weights.iter())
        .zip(1u32..)
        .map(|((&reps, &weight), set)| SetLine {
            set,
            reps,
            weight,
            unit: record.weight_unit,
        })
        .collect()
}
