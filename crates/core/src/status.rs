//! Tree condition vocabulary and current-status resolution.
//!
//! Status history is append-only. The *current* status of a tree is its
//! newest observed record: latest `date_recorded`, ties broken by the highest
//! id. Future-plan records stay in the history but are never current.

use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::types::{DbId, RecordDate};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_EXCELLENT: &str = "excellent";
pub const STATUS_GOOD: &str = "good";
pub const STATUS_SATISFACTORY: &str = "satisfactory";
pub const STATUS_POOR: &str = "poor";
pub const STATUS_CRITICAL: &str = "critical";

/// The informal condition scale used by the field teams. Storage accepts any
/// non-blank value.
pub const KNOWN_STATUSES: &[&str] = &[
    STATUS_EXCELLENT,
    STATUS_GOOD,
    STATUS_SATISFACTORY,
    STATUS_POOR,
    STATUS_CRITICAL,
];

/// Maximum length of a status label in characters.
pub const MAX_STATUS_LENGTH: usize = 64;

/// Maximum length of status notes in characters.
pub const MAX_NOTES_LENGTH: usize = 2_000;

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Read access to the fields that drive status resolution.
pub trait StatusEntry {
    fn id(&self) -> DbId;
    fn tree_id(&self) -> DbId;
    fn date_recorded(&self) -> RecordDate;
    fn is_future_plan(&self) -> bool;
}

/// Newest-first ordering: `date_recorded` descending, then id descending.
pub fn newest_first<T: StatusEntry>(a: &T, b: &T) -> Ordering {
    b.date_recorded()
        .cmp(&a.date_recorded())
        .then_with(|| b.id().cmp(&a.id()))
}

/// Sort a history slice in place, newest first.
pub fn sort_history<T: StatusEntry>(records: &mut [T]) {
    records.sort_by(newest_first);
}

/// Select the current status from one tree's records.
///
/// Returns `None` when the slice is empty or holds only future plans.
pub fn resolve_current<T: StatusEntry>(records: &[T]) -> Option<&T> {
    records
        .iter()
        .filter(|r| !r.is_future_plan())
        .min_by(|a, b| newest_first(*a, *b))
}

/// Select the current status for every tree present in `records`.
///
/// Equivalent to grouping by `tree_id` and calling [`resolve_current`] on
/// each group. Trees whose records are all future plans are absent from the
/// map.
pub fn resolve_current_by_tree<T: StatusEntry>(records: &[T]) -> BTreeMap<DbId, &T> {
    let mut current: BTreeMap<DbId, &T> = BTreeMap::new();
    for record in records.iter().filter(|r| !r.is_future_plan()) {
        match current.entry(record.tree_id()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                if newest_first(record, *slot.get()) == Ordering::Less {
                    slot.insert(record);
                }
            }
        }
    }
    current
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a status label: required, non-blank, bounded. Returns the trimmed
/// value. Labels outside [`KNOWN_STATUSES`] are accepted.
pub fn validate_status(status: Option<&str>) -> Result<String, CoreError> {
    let status = status.map(str::trim).unwrap_or_default();
    if status.is_empty() {
        return Err(CoreError::missing("status"));
    }
    if status.chars().count() > MAX_STATUS_LENGTH {
        return Err(CoreError::validation(
            "status",
            format!("must be at most {MAX_STATUS_LENGTH} characters"),
        ));
    }
    Ok(status.to_string())
}

/// Validate optional notes. Blank notes collapse to `None`.
pub fn validate_notes(notes: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(notes) = notes.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if notes.chars().count() > MAX_NOTES_LENGTH {
        return Err(CoreError::validation(
            "notes",
            format!("must be at most {MAX_NOTES_LENGTH} characters"),
        ));
    }
    Ok(Some(notes.to_string()))
}

/// Whether a label belongs to the informal condition scale.
pub fn is_known_status(status: &str) -> bool {
    KNOWN_STATUSES.contains(&status)
}
