use super::{
    Assignment, AvailabilityRecord, Class, ClassId, Demand, Lock, PedagogicalRules, SchoolId,
    SubjectId, TeacherId, TimeGrid,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The self-contained scheduling problem for one request.
///
/// Built once by the payload builder, read-only thereafter. All collections
/// are sorted by ascending id so iteration is deterministic for a given
/// store snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemInstance {
    pub school_id: SchoolId,
    pub shift: String,
    pub year_ref: Option<i32>,
    pub level: Option<String>,
    /// Max period ordem observed in the grid, clamped to `[1, 10]`; 6 when
    /// the grid is empty
    pub periods_per_day: u8,
    /// True when the pedagogical rule row was absent or malformed and the
    /// defaults were used instead
    pub config_defaulted: bool,
    pub time_grid: TimeGrid,
    pub classes: Vec<Class>,
    pub demand: Vec<Demand>,
    pub assignments: Vec<Assignment>,
    pub availabilities: Vec<AvailabilityRecord>,
    /// Raw per-teacher preference payloads, scoped to assigned teachers
    #[serde(default)]
    pub preferences: BTreeMap<TeacherId, serde_json::Value>,
    #[serde(default)]
    pub locks: Vec<Lock>,
    pub rules: PedagogicalRules,
}

impl ProblemInstance {
    /// Distinct class ids, ascending
    pub fn class_ids(&self) -> Vec<ClassId> {
        let mut ids: Vec<ClassId> = self.classes.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Distinct teacher ids appearing in assignments, ascending
    pub fn teacher_ids(&self) -> Vec<TeacherId> {
        let mut ids: Vec<TeacherId> = self.assignments.iter().map(|a| a.teacher_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Total weekly lessons demanded across all classes
    pub fn total_demand(&self) -> u32 {
        self.demand.iter().map(|d| d.weekly_lessons).sum()
    }

    /// The owning teacher per `(class, subject)`; the first assignment row
    /// wins when duplicates exist.
    pub fn effective_assignments(&self) -> BTreeMap<(ClassId, SubjectId), TeacherId> {
        let mut map = BTreeMap::new();
        for a in &self.assignments {
            map.entry((a.class_id, a.subject_id)).or_insert(a.teacher_id);
        }
        map
    }
}

/// One lesson occurrence awaiting placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    /// Occurrence index within the week, 0-based
    pub seq: u32,
}
