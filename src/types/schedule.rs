use super::{ClassCell, ClassId, SubjectId, TeacherCell, TeacherId, WeekGrid};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Why a lesson could not be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnplacedReason {
    #[serde(rename = "NO_FREE_SLOT_IN_CLASS")]
    NoFreeSlotInClass,
    #[serde(rename = "TEACHER_FULLY_BUSY")]
    TeacherFullyBusy,
    #[serde(rename = "TEACHER_UNAVAILABLE")]
    TeacherUnavailable,
    #[serde(rename = "OTHER")]
    Other,
}

/// An unplaced lesson with its classified reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnplacedLesson {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub reason: UnplacedReason,
}

/// Per-reason counts for unplaced lessons
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReasonCounts {
    #[serde(rename = "NO_FREE_SLOT_IN_CLASS")]
    pub no_free_slot_in_class: u32,
    #[serde(rename = "TEACHER_FULLY_BUSY")]
    pub teacher_fully_busy: u32,
    #[serde(rename = "TEACHER_UNAVAILABLE")]
    pub teacher_unavailable: u32,
    #[serde(rename = "OTHER")]
    pub other: u32,
}

impl ReasonCounts {
    pub fn record(&mut self, reason: UnplacedReason) {
        match reason {
            UnplacedReason::NoFreeSlotInClass => self.no_free_slot_in_class += 1,
            UnplacedReason::TeacherFullyBusy => self.teacher_fully_busy += 1,
            UnplacedReason::TeacherUnavailable => self.teacher_unavailable += 1,
            UnplacedReason::Other => self.other += 1,
        }
    }
}

/// Coverage diagnostics, always present even on full success
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub nao_alocadas: Vec<UnplacedLesson>,
    pub contadores: ReasonCounts,
    /// Locks that conflicted with an earlier placement and were skipped
    #[serde(default)]
    pub conflicting_locks: Vec<String>,
}

/// RC-02 settings echoed in the response metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rc02Metrics {
    pub modo: String,
    pub max_por_dia_padrao: u8,
    pub bloqueio_hard: bool,
    pub strict_cap_mock: bool,
}

/// Solve metrics, wire-named
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub aulas_alocadas: u32,
    pub aulas_demanda: u32,
    /// Percentage of placed over demanded lessons, rounded; 100 when the
    /// demand is zero
    pub cobertura: u32,
    pub rc01_max_consecutivas: u8,
    pub rc02: Rc02Metrics,
    pub periodos_por_dia: u8,
}

/// The solved weekly timetable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub per_class: BTreeMap<ClassId, WeekGrid<ClassCell>>,
    pub per_teacher: BTreeMap<TeacherId, WeekGrid<TeacherCell>>,
    pub metrics: Metrics,
    pub diagnostic: Diagnostic,
    pub solve_time_ms: u64,
}

impl Schedule {
    /// Total non-empty cells across all class grids
    pub fn placed_count(&self) -> u32 {
        self.per_class
            .values()
            .flat_map(|grid| grid.values())
            .flat_map(|row| row.values())
            .filter(|cell| cell.is_some())
            .count() as u32
    }
}

/// Round `100 * placed / demand`, with 100 for zero demand
pub fn coverage_pct(placed: u32, demand: u32) -> u32 {
    if demand == 0 {
        100
    } else {
        ((100.0 * placed as f64 / demand as f64).round()) as u32
    }
}
