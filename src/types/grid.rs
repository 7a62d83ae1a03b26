use super::{ClassId, SubjectId, TeacherId, DAYS_PER_WEEK};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A cell of a class grid: which subject is taught and by whom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCell {
    pub subject_id: SubjectId,
    /// Absent only for teacherless locks
    pub teacher_id: Option<TeacherId>,
}

/// A cell of a teacher grid: which class the teacher is in, teaching what
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherCell {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
}

/// Dense `day -> ordem -> cell` matrix. Every day 1..=5 and every ordem
/// 1..=periods_per_day is an addressable key; empty cells are explicit None.
pub type WeekGrid<C> = BTreeMap<u8, BTreeMap<u8, Option<C>>>;

/// Build a structurally complete empty grid
pub fn empty_week_grid<C>(periods_per_day: u8) -> WeekGrid<C> {
    let mut grid = BTreeMap::new();
    for day in 1..=DAYS_PER_WEEK {
        let mut row = BTreeMap::new();
        for ordem in 1..=periods_per_day {
            row.insert(ordem, None);
        }
        grid.insert(day, row);
    }
    grid
}

/// Cell accessor tolerating out-of-grid coordinates
pub fn cell_at<C: Copy>(grid: &WeekGrid<C>, day: u8, ordem: u8) -> Option<C> {
    grid.get(&day).and_then(|row| row.get(&ordem)).copied().flatten()
}

pub fn is_cell_empty<C: Copy>(grid: &WeekGrid<C>, day: u8, ordem: u8) -> bool {
    cell_at(grid, day, ordem).is_none()
}
