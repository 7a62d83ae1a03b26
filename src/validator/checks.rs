use super::PreSolveReport;
use crate::types::{AvailabilityIndex, ClassId, ProblemInstance, SubjectId};
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};

/// Check 1: the time grid exists and has no overlapping periods
pub fn check_time_grid(instance: &ProblemInstance, report: &mut PreSolveReport) {
    if instance.time_grid.is_empty() {
        report.add_error(format!(
            "Time grid missing for school {}, shift '{}'",
            instance.school_id, instance.shift
        ));
        return;
    }

    let mut samples: Vec<(u8, u8, u8)> = Vec::new();
    for day in instance.time_grid.days.keys() {
        for (a, b) in instance.time_grid.overlaps_on_day(*day) {
            samples.push((*day, a, b));
        }
    }

    if !samples.is_empty() {
        let total = samples.len();
        let listed = samples
            .iter()
            .take(3)
            .map(|(day, a, b)| format!("day {} ordem {}/{}", day, a, b))
            .join(", ");
        report.add_error(format!(
            "Time grid has {} overlapping period pair(s): {}",
            total, listed
        ));
    }
}

/// Check 2: every assignment has a demand row and loads do not overrun it
pub fn check_demand_vs_assignments(instance: &ProblemInstance, report: &mut PreSolveReport) {
    let demand_map: BTreeMap<(ClassId, SubjectId), u32> = instance
        .demand
        .iter()
        .map(|d| ((d.class_id, d.subject_id), d.weekly_lessons))
        .collect();

    // Sum of assigned loads per (class, subject); a load-less row counts as
    // covering the full demand.
    let mut assigned: BTreeMap<(ClassId, SubjectId), u32> = BTreeMap::new();
    for a in &instance.assignments {
        let key = (a.class_id, a.subject_id);
        match demand_map.get(&key) {
            None => {
                report.add_error(format!(
                    "Assignment of teacher {} to class {} subject {} has no demand row",
                    a.teacher_id, a.class_id, a.subject_id
                ));
            }
            Some(&weekly) => {
                *assigned.entry(key).or_insert(0) += a.weekly_load.unwrap_or(weekly);
            }
        }
    }

    for (&(class_id, subject_id), &weekly) in &demand_map {
        if weekly == 0 {
            continue;
        }
        let covered = assigned.get(&(class_id, subject_id)).copied().unwrap_or(0);
        if covered > weekly {
            report.add_error(format!(
                "Assigned load {} exceeds demand {} for class {} subject {}",
                covered, weekly, class_id, subject_id
            ));
        } else if covered == 0 {
            report.add_warning(format!(
                "No teacher assigned for class {} subject {} ({} weekly lessons)",
                class_id, subject_id, weekly
            ));
        } else if covered < weekly {
            report.add_warning(format!(
                "Partial demand for class {} subject {}: {} of {} lessons covered",
                class_id, subject_id, covered, weekly
            ));
        }
    }
}

/// Check 3: availability rows reference grid slots; assigned teachers
/// without any availability row are flagged
pub fn check_availabilities(instance: &ProblemInstance, report: &mut PreSolveReport) {
    for rec in &instance.availabilities {
        if !instance.time_grid.contains(rec.day, rec.ordem) {
            report.add_error(format!(
                "Availability of teacher {} references day {} ordem {} absent from the time grid",
                rec.teacher_id, rec.day, rec.ordem
            ));
        }
    }

    let with_records: BTreeSet<_> = instance
        .availabilities
        .iter()
        .map(|r| r.teacher_id)
        .collect();
    for teacher_id in instance.teacher_ids() {
        if !with_records.contains(&teacher_id) {
            report.add_warning(format!(
                "Teacher {} has no availability records (treated as always free)",
                teacher_id
            ));
        }
    }
}

/// Check 4: locks sit on grid slots, no teacher is locked twice at one slot,
/// and a named teacher's availability contains the lock
pub fn check_locks(instance: &ProblemInstance, report: &mut PreSolveReport) {
    let index = AvailabilityIndex::from_records(&instance.availabilities);
    let mut teacher_slots: BTreeSet<(i64, u8, u8)> = BTreeSet::new();

    for lock in &instance.locks {
        if !instance.time_grid.contains(lock.day, lock.ordem) {
            report.add_error(format!(
                "Lock for class {} references day {} ordem {} absent from the time grid",
                lock.class_id, lock.day, lock.ordem
            ));
        }

        if let Some(teacher_id) = lock.teacher_id {
            if !teacher_slots.insert((teacher_id.0, lock.day, lock.ordem)) {
                report.add_error(format!(
                    "Teacher {} locked twice at day {} ordem {}",
                    teacher_id, lock.day, lock.ordem
                ));
            }

            if index.has_records_for(teacher_id)
                && !index.is_free(teacher_id, lock.day, lock.ordem)
            {
                report.add_error(format!(
                    "Lock for class {} puts teacher {} outside their availability (day {} ordem {})",
                    lock.class_id, teacher_id, lock.day, lock.ordem
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;
    use std::collections::BTreeMap;

    fn base_instance() -> ProblemInstance {
        let mut days = BTreeMap::new();
        for day in 1..=5u8 {
            days.insert(
                day,
                vec![
                    GridPeriod::new(1, "07:00", "07:50"),
                    GridPeriod::new(2, "07:50", "08:40"),
                ],
            );
        }
        ProblemInstance {
            school_id: SchoolId(1),
            shift: "manha".to_string(),
            year_ref: None,
            level: None,
            periods_per_day: 2,
            config_defaulted: true,
            time_grid: TimeGrid { days },
            classes: vec![Class {
                id: ClassId(1),
                name: "6A".to_string(),
                stage: String::new(),
                series: String::new(),
                shift: "manha".to_string(),
            }],
            demand: vec![],
            assignments: vec![],
            availabilities: vec![],
            preferences: BTreeMap::new(),
            locks: vec![],
            rules: PedagogicalRules::default(),
        }
    }

    #[test]
    fn test_missing_grid_is_an_error() {
        let mut instance = base_instance();
        instance.time_grid = TimeGrid::default();

        let report = crate::validator::run_pre_solve(&instance);
        assert!(report.errors.iter().any(|e| e.contains("Time grid missing")));
    }

    #[test]
    fn test_overlap_reported_with_samples() {
        let mut instance = base_instance();
        instance
            .time_grid
            .days
            .get_mut(&1)
            .unwrap()
            .push(GridPeriod::new(3, "07:20", "07:40"));

        let mut report = PreSolveReport::default();
        check_time_grid(&instance, &mut report);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("day 1 ordem 1/3"));
    }

    #[test]
    fn test_assignment_without_demand_is_an_error() {
        let mut instance = base_instance();
        instance.assignments = vec![Assignment {
            teacher_id: TeacherId(5),
            class_id: ClassId(1),
            subject_id: SubjectId(9),
            weekly_load: None,
        }];

        let mut report = PreSolveReport::default();
        check_demand_vs_assignments(&instance, &mut report);
        assert!(report.errors.iter().any(|e| e.contains("no demand row")));
    }

    #[test]
    fn test_demand_without_teacher_warns() {
        let mut instance = base_instance();
        instance.demand = vec![Demand {
            class_id: ClassId(1),
            subject_id: SubjectId(9),
            weekly_lessons: 4,
        }];

        let mut report = PreSolveReport::default();
        check_demand_vs_assignments(&instance, &mut report);
        assert!(report.errors.is_empty());
        assert!(report.warnings.iter().any(|w| w.contains("No teacher assigned")));
    }

    #[test]
    fn test_partial_and_overrun_loads() {
        let mut instance = base_instance();
        instance.demand = vec![
            Demand {
                class_id: ClassId(1),
                subject_id: SubjectId(9),
                weekly_lessons: 4,
            },
            Demand {
                class_id: ClassId(1),
                subject_id: SubjectId(10),
                weekly_lessons: 2,
            },
        ];
        instance.assignments = vec![
            Assignment {
                teacher_id: TeacherId(5),
                class_id: ClassId(1),
                subject_id: SubjectId(9),
                weekly_load: Some(2),
            },
            Assignment {
                teacher_id: TeacherId(5),
                class_id: ClassId(1),
                subject_id: SubjectId(10),
                weekly_load: Some(3),
            },
        ];

        let mut report = PreSolveReport::default();
        check_demand_vs_assignments(&instance, &mut report);
        assert!(report.warnings.iter().any(|w| w.contains("Partial demand")));
        assert!(report.errors.iter().any(|e| e.contains("exceeds demand")));
    }

    #[test]
    fn test_availability_outside_grid_and_missing_records() {
        let mut instance = base_instance();
        instance.demand = vec![Demand {
            class_id: ClassId(1),
            subject_id: SubjectId(9),
            weekly_lessons: 1,
        }];
        instance.assignments = vec![
            Assignment {
                teacher_id: TeacherId(5),
                class_id: ClassId(1),
                subject_id: SubjectId(9),
                weekly_load: None,
            },
            Assignment {
                teacher_id: TeacherId(6),
                class_id: ClassId(1),
                subject_id: SubjectId(9),
                weekly_load: None,
            },
        ];
        instance.availabilities = vec![AvailabilityRecord {
            teacher_id: TeacherId(5),
            day: 1,
            ordem: 7,
            status: "livre".to_string(),
        }];

        let mut report = PreSolveReport::default();
        check_availabilities(&instance, &mut report);
        assert!(report.errors.iter().any(|e| e.contains("ordem 7")));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("Teacher 6 has no availability")));
    }

    #[test]
    fn test_lock_checks() {
        let mut instance = base_instance();
        instance.availabilities = vec![AvailabilityRecord {
            teacher_id: TeacherId(5),
            day: 1,
            ordem: 1,
            status: "livre".to_string(),
        }];
        instance.locks = vec![
            // Outside the grid
            Lock {
                class_id: ClassId(1),
                day: 1,
                ordem: 9,
                subject_id: SubjectId(9),
                teacher_id: None,
            },
            // Outside teacher 5's availability
            Lock {
                class_id: ClassId(1),
                day: 2,
                ordem: 1,
                subject_id: SubjectId(9),
                teacher_id: Some(TeacherId(5)),
            },
            // Same teacher twice at one slot
            Lock {
                class_id: ClassId(1),
                day: 1,
                ordem: 1,
                subject_id: SubjectId(9),
                teacher_id: Some(TeacherId(7)),
            },
            Lock {
                class_id: ClassId(2),
                day: 1,
                ordem: 1,
                subject_id: SubjectId(9),
                teacher_id: Some(TeacherId(7)),
            },
        ];

        let mut report = PreSolveReport::default();
        check_locks(&instance, &mut report);
        assert!(report.errors.iter().any(|e| e.contains("absent from the time grid")));
        assert!(report.errors.iter().any(|e| e.contains("outside their availability")));
        assert!(report.errors.iter().any(|e| e.contains("locked twice")));
    }
}
