use super::TeacherId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One free period of a teacher on a given day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub teacher_id: TeacherId,
    /// Day of week, 1-based (1 = Monday)
    pub day: u8,
    /// Period ordem within the day, 1-based
    pub ordem: u8,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "livre".to_string()
}

/// Fast lookup of a teacher's free `(day, ordem)` slots.
///
/// A teacher with no entry is treated as free everywhere.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    slots: BTreeMap<TeacherId, BTreeSet<(u8, u8)>>,
}

impl AvailabilityIndex {
    pub fn from_records(records: &[AvailabilityRecord]) -> Self {
        let mut slots: BTreeMap<TeacherId, BTreeSet<(u8, u8)>> = BTreeMap::new();
        for rec in records {
            slots
                .entry(rec.teacher_id)
                .or_default()
                .insert((rec.day, rec.ordem));
        }
        Self { slots }
    }

    /// Whether any availability was recorded for this teacher
    pub fn has_records_for(&self, teacher_id: TeacherId) -> bool {
        self.slots.contains_key(&teacher_id)
    }

    /// Whether the teacher may teach at `(day, ordem)`
    pub fn is_free(&self, teacher_id: TeacherId, day: u8, ordem: u8) -> bool {
        match self.slots.get(&teacher_id) {
            Some(set) => set.contains(&(day, ordem)),
            None => true,
        }
    }
}
