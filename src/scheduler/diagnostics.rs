use crate::types::{
    cell_at, AvailabilityIndex, ClassCell, Lesson, ProblemInstance, TeacherCell, UnplacedReason,
    WeekGrid,
};

/// Classify why a lesson found no feasible slot, by re-scanning the grids
/// over the instance's slot set.
pub fn classify_unplaced(
    instance: &ProblemInstance,
    class_grid: &WeekGrid<ClassCell>,
    teacher_grid: &WeekGrid<TeacherCell>,
    availability: &AvailabilityIndex,
    lesson: &Lesson,
) -> UnplacedReason {
    let slots = instance.time_grid.slots();

    let class_free: Vec<(u8, u8)> = slots
        .iter()
        .copied()
        .filter(|&(day, ordem)| cell_at(class_grid, day, ordem).is_none())
        .collect();
    if class_free.is_empty() {
        return UnplacedReason::NoFreeSlotInClass;
    }

    let both_free: Vec<(u8, u8)> = class_free
        .iter()
        .copied()
        .filter(|&(day, ordem)| cell_at(teacher_grid, day, ordem).is_none())
        .collect();
    if both_free.is_empty() {
        return UnplacedReason::TeacherFullyBusy;
    }

    let within_availability = both_free
        .iter()
        .any(|&(day, ordem)| availability.is_free(lesson.teacher_id, day, ordem));
    if !within_availability {
        return UnplacedReason::TeacherUnavailable;
    }

    // Free intersecting slots existed but were rejected for another reason
    // (hard pedagogical rule); fall through.
    UnplacedReason::Other
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;
    use std::collections::BTreeMap;

    fn tiny_instance() -> ProblemInstance {
        let mut days = BTreeMap::new();
        days.insert(1, vec![GridPeriod::new(1, "07:00", "07:50")]);
        days.insert(2, vec![GridPeriod::new(1, "07:00", "07:50")]);
        ProblemInstance {
            school_id: SchoolId(1),
            shift: "manha".to_string(),
            year_ref: None,
            level: None,
            periods_per_day: 1,
            config_defaulted: true,
            time_grid: TimeGrid { days },
            classes: vec![],
            demand: vec![],
            assignments: vec![],
            availabilities: vec![],
            preferences: BTreeMap::new(),
            locks: vec![],
            rules: PedagogicalRules::default(),
        }
    }

    fn lesson() -> Lesson {
        Lesson {
            class_id: ClassId(1),
            subject_id: SubjectId(2),
            teacher_id: TeacherId(5),
            seq: 0,
        }
    }

    #[test]
    fn test_no_free_slot_in_class() {
        let instance = tiny_instance();
        let mut class_grid: WeekGrid<ClassCell> = empty_week_grid(1);
        for day in [1u8, 2] {
            class_grid.get_mut(&day).unwrap().insert(
                1,
                Some(ClassCell {
                    subject_id: SubjectId(9),
                    teacher_id: Some(TeacherId(9)),
                }),
            );
        }
        let teacher_grid: WeekGrid<TeacherCell> = empty_week_grid(1);
        let availability = AvailabilityIndex::from_records(&[]);

        assert_eq!(
            classify_unplaced(&instance, &class_grid, &teacher_grid, &availability, &lesson()),
            UnplacedReason::NoFreeSlotInClass
        );
    }

    #[test]
    fn test_teacher_fully_busy() {
        let instance = tiny_instance();
        let class_grid: WeekGrid<ClassCell> = empty_week_grid(1);
        let mut teacher_grid: WeekGrid<TeacherCell> = empty_week_grid(1);
        for day in [1u8, 2] {
            teacher_grid.get_mut(&day).unwrap().insert(
                1,
                Some(TeacherCell {
                    class_id: ClassId(8),
                    subject_id: SubjectId(9),
                }),
            );
        }
        let availability = AvailabilityIndex::from_records(&[]);

        assert_eq!(
            classify_unplaced(&instance, &class_grid, &teacher_grid, &availability, &lesson()),
            UnplacedReason::TeacherFullyBusy
        );
    }

    #[test]
    fn test_teacher_unavailable() {
        let instance = tiny_instance();
        let class_grid: WeekGrid<ClassCell> = empty_week_grid(1);
        let teacher_grid: WeekGrid<TeacherCell> = empty_week_grid(1);
        // Teacher 5 only free at a slot outside the grid
        let availability = AvailabilityIndex::from_records(&[AvailabilityRecord {
            teacher_id: TeacherId(5),
            day: 5,
            ordem: 1,
            status: "livre".to_string(),
        }]);

        assert_eq!(
            classify_unplaced(&instance, &class_grid, &teacher_grid, &availability, &lesson()),
            UnplacedReason::TeacherUnavailable
        );
    }

    #[test]
    fn test_empty_grid_counts_as_no_free_slot() {
        let mut instance = tiny_instance();
        instance.time_grid = TimeGrid::default();
        let class_grid: WeekGrid<ClassCell> = empty_week_grid(1);
        let teacher_grid: WeekGrid<TeacherCell> = empty_week_grid(1);
        let availability = AvailabilityIndex::from_records(&[]);

        assert_eq!(
            classify_unplaced(&instance, &class_grid, &teacher_grid, &availability, &lesson()),
            UnplacedReason::NoFreeSlotInClass
        );
    }
}
