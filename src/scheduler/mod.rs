mod diagnostics;
mod lessons;
mod placement;

pub use diagnostics::*;
pub use lessons::*;
pub use placement::*;

use crate::types::{
    cell_at, empty_week_grid, AvailabilityIndex, ClassCell, ClassId, Diagnostic, Metrics,
    ProblemInstance, Rc02Metrics, RuleMode, Schedule, TeacherCell, TeacherId, UnplacedLesson,
    WeekGrid, coverage_pct, DAYS_PER_WEEK,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::time::Instant;

/// Place every required lesson of the instance into the weekly grids.
///
/// Never fails on data quality: conflicting locks and unplaceable lessons
/// are reported through the diagnostic instead.
pub fn solve(instance: &ProblemInstance, quiet: bool) -> Schedule {
    let start = Instant::now();
    let lessons = build_lessons(instance);

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(lessons.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Placing lessons...");
        pb
    };

    let mut per_class: BTreeMap<ClassId, WeekGrid<ClassCell>> = instance
        .class_ids()
        .into_iter()
        .map(|id| (id, empty_week_grid(instance.periods_per_day)))
        .collect();
    let mut per_teacher: BTreeMap<TeacherId, WeekGrid<TeacherCell>> = instance
        .teacher_ids()
        .into_iter()
        .map(|id| (id, empty_week_grid(instance.periods_per_day)))
        .collect();
    let mut diagnostic = Diagnostic::default();

    apply_locks(instance, &mut per_class, &mut per_teacher, &mut diagnostic);

    let availability = AvailabilityIndex::from_records(&instance.availabilities);

    let mut placed = 0u32;
    for lesson in &lessons {
        let class_grid = per_class
            .entry(lesson.class_id)
            .or_insert_with(|| empty_week_grid(instance.periods_per_day));
        let teacher_grid = per_teacher
            .entry(lesson.teacher_id)
            .or_insert_with(|| empty_week_grid(instance.periods_per_day));

        match find_best_slot(instance, class_grid, teacher_grid, &availability, lesson) {
            Some((day, ordem)) => {
                class_grid.entry(day).or_default().insert(
                    ordem,
                    Some(ClassCell {
                        subject_id: lesson.subject_id,
                        teacher_id: Some(lesson.teacher_id),
                    }),
                );
                teacher_grid.entry(day).or_default().insert(
                    ordem,
                    Some(TeacherCell {
                        class_id: lesson.class_id,
                        subject_id: lesson.subject_id,
                    }),
                );
                placed += 1;
            }
            None => {
                let reason =
                    classify_unplaced(instance, class_grid, teacher_grid, &availability, lesson);
                diagnostic.contadores.record(reason);
                diagnostic.nao_alocadas.push(UnplacedLesson {
                    class_id: lesson.class_id,
                    subject_id: lesson.subject_id,
                    teacher_id: lesson.teacher_id,
                    reason,
                });
            }
        }
        progress.inc(1);
    }
    progress.finish_with_message("Timetable generated");

    let demand = instance.total_demand();
    let metrics = Metrics {
        aulas_alocadas: placed,
        aulas_demanda: demand,
        cobertura: coverage_pct(placed, demand),
        rc01_max_consecutivas: instance.rules.max_consecutive(),
        rc02: Rc02Metrics {
            modo: match instance.rules.rc02.mode {
                RuleMode::Hard => "hard".to_string(),
                RuleMode::Soft => "soft".to_string(),
            },
            max_por_dia_padrao: instance.rules.rc02.default_per_day,
            bloqueio_hard: instance.rules.rc02.mode == RuleMode::Hard,
            strict_cap_mock: instance.rules.rc02.strict_cap_mock,
        },
        periodos_por_dia: instance.periods_per_day,
    };

    Schedule {
        per_class,
        per_teacher,
        metrics,
        diagnostic,
        solve_time_ms: start.elapsed().as_millis() as u64,
    }
}

/// Pin every lock into both grids before any placement runs.
///
/// A lock that falls outside the grid or collides with an earlier lock is
/// recorded on the diagnostic and skipped.
fn apply_locks(
    instance: &ProblemInstance,
    per_class: &mut BTreeMap<ClassId, WeekGrid<ClassCell>>,
    per_teacher: &mut BTreeMap<TeacherId, WeekGrid<TeacherCell>>,
    diagnostic: &mut Diagnostic,
) {
    for lock in &instance.locks {
        if !(1..=DAYS_PER_WEEK).contains(&lock.day)
            || !(1..=instance.periods_per_day).contains(&lock.ordem)
        {
            diagnostic.conflicting_locks.push(format!(
                "Lock for class {} at day {} ordem {} falls outside the grid",
                lock.class_id, lock.day, lock.ordem
            ));
            continue;
        }

        let class_grid = per_class
            .entry(lock.class_id)
            .or_insert_with(|| empty_week_grid(instance.periods_per_day));
        if cell_at(class_grid, lock.day, lock.ordem).is_some() {
            diagnostic.conflicting_locks.push(format!(
                "Lock for class {} at day {} ordem {} collides with an earlier lock",
                lock.class_id, lock.day, lock.ordem
            ));
            continue;
        }

        if let Some(teacher_id) = lock.teacher_id {
            let teacher_grid = per_teacher
                .entry(teacher_id)
                .or_insert_with(|| empty_week_grid(instance.periods_per_day));
            if cell_at(teacher_grid, lock.day, lock.ordem).is_some() {
                diagnostic.conflicting_locks.push(format!(
                    "Lock for class {} double-books teacher {} at day {} ordem {}",
                    lock.class_id, teacher_id, lock.day, lock.ordem
                ));
                continue;
            }
            teacher_grid.entry(lock.day).or_default().insert(
                lock.ordem,
                Some(TeacherCell {
                    class_id: lock.class_id,
                    subject_id: lock.subject_id,
                }),
            );
        }

        per_class
            .entry(lock.class_id)
            .or_insert_with(|| empty_week_grid(instance.periods_per_day))
            .entry(lock.day)
            .or_default()
            .insert(
                lock.ordem,
                Some(ClassCell {
                    subject_id: lock.subject_id,
                    teacher_id: lock.teacher_id,
                }),
            );
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::types::*;
    use proptest::prelude::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn grid_5x(periods: u8) -> TimeGrid {
        let mut days = BTreeMap::new();
        for day in 1..=5u8 {
            let periods: Vec<GridPeriod> = (1..=periods)
                .map(|o| {
                    GridPeriod::new(o, &format!("{:02}:00", 6 + o), &format!("{:02}:50", 6 + o))
                })
                .collect();
            days.insert(day, periods);
        }
        TimeGrid { days }
    }

    prop_compose! {
        fn arb_instance()(
            n_classes in 1usize..=3,
            n_subjects in 1usize..=3,
            periods in 2u8..=4,
            weekly in proptest::collection::vec(0u32..=3, 9),
            owners in proptest::collection::vec(0i64..3, 9),
            avail in proptest::collection::vec((0i64..3, 1u8..=5, 1u8..=4), 0..12),
            rc01_hard in any::<bool>(),
            rc02_hard in any::<bool>(),
            strict_cap in any::<bool>(),
            max_consecutive in 1u8..=3,
            default_per_day in 1u8..=3,
        ) -> ProblemInstance {
            let mut demand = Vec::new();
            let mut assignments = Vec::new();
            for c in 0..n_classes {
                for s in 0..n_subjects {
                    let idx = c * 3 + s;
                    if weekly[idx] == 0 {
                        continue;
                    }
                    let class_id = ClassId(c as i64 + 1);
                    let subject_id = SubjectId(10 * (s as i64 + 1));
                    demand.push(Demand { class_id, subject_id, weekly_lessons: weekly[idx] });
                    assignments.push(Assignment {
                        teacher_id: TeacherId(100 + owners[idx]),
                        class_id,
                        subject_id,
                        weekly_load: None,
                    });
                }
            }

            let availabilities = avail
                .into_iter()
                .map(|(t, day, ordem)| AvailabilityRecord {
                    teacher_id: TeacherId(100 + t),
                    day,
                    ordem,
                    status: "livre".to_string(),
                })
                .collect();

            let classes = (0..n_classes)
                .map(|c| Class {
                    id: ClassId(c as i64 + 1),
                    name: format!("Class {}", c + 1),
                    stage: String::new(),
                    series: String::new(),
                    shift: "manha".to_string(),
                })
                .collect();

            ProblemInstance {
                school_id: SchoolId(1),
                shift: "manha".to_string(),
                year_ref: None,
                level: None,
                periods_per_day: periods,
                config_defaulted: true,
                time_grid: grid_5x(periods),
                classes,
                demand,
                assignments,
                availabilities,
                preferences: BTreeMap::new(),
                locks: vec![],
                rules: PedagogicalRules {
                    level: None,
                    rc01: Rc01Rule {
                        mode: if rc01_hard { RuleMode::Hard } else { RuleMode::Soft },
                        max_consecutive,
                    },
                    rc02: Rc02Rule {
                        mode: if rc02_hard { RuleMode::Hard } else { RuleMode::Soft },
                        default_per_day,
                        per_subject: BTreeMap::new(),
                        strict_cap_mock: strict_cap,
                    },
                },
            }
        }
    }

    proptest! {
        #[test]
        fn prop_schedule_invariants(instance in arb_instance()) {
            let schedule = solve(&instance, true);
            let ppd = instance.periods_per_day;

            // Grids are structurally complete
            for grid in schedule.per_class.values() {
                prop_assert_eq!(grid.len(), 5);
                for row in grid.values() {
                    for ordem in 1..=ppd {
                        prop_assert!(row.contains_key(&ordem));
                    }
                }
            }
            for grid in schedule.per_teacher.values() {
                prop_assert_eq!(grid.len(), 5);
                for row in grid.values() {
                    prop_assert_eq!(row.len(), ppd as usize);
                }
            }

            // No teacher double-booking across class grids; every cell on a
            // grid slot; every placement within availability
            let availability = AvailabilityIndex::from_records(&instance.availabilities);
            let mut teacher_usage: BTreeSet<(i64, u8, u8)> = BTreeSet::new();
            for grid in schedule.per_class.values() {
                for (&day, row) in grid {
                    for (&ordem, cell) in row {
                        let Some(cell) = cell else { continue };
                        prop_assert!(instance.time_grid.contains(day, ordem));
                        if let Some(teacher_id) = cell.teacher_id {
                            prop_assert!(
                                teacher_usage.insert((teacher_id.0, day, ordem)),
                                "teacher {} double-booked at day {} ordem {}",
                                teacher_id.0, day, ordem
                            );
                            prop_assert!(availability.is_free(teacher_id, day, ordem));
                        }
                    }
                }
            }

            // Metrics bounds
            prop_assert!(schedule.metrics.aulas_alocadas <= schedule.metrics.aulas_demanda);
            prop_assert!(schedule.metrics.cobertura <= 100);
            if schedule.metrics.aulas_demanda == 0 {
                prop_assert_eq!(schedule.metrics.cobertura, 100);
            }
            let lessons = build_lessons(&instance).len() as u32;
            prop_assert_eq!(
                schedule.metrics.aulas_alocadas + schedule.diagnostic.nao_alocadas.len() as u32,
                lessons
            );
            // With no locks every non-empty cell is a solver placement
            prop_assert_eq!(schedule.placed_count(), schedule.metrics.aulas_alocadas);

            // Hard rules hold strictly
            let max_consecutive = instance.rules.max_consecutive();
            for grid in schedule.per_class.values() {
                for day in 1..=5u8 {
                    let mut counts: BTreeMap<i64, u8> = BTreeMap::new();
                    let mut run_subject: Option<i64> = None;
                    let mut run = 0u8;
                    for ordem in 1..=ppd {
                        let subject = cell_at(grid, day, ordem).map(|c| c.subject_id.0);
                        match subject {
                            Some(s) => {
                                *counts.entry(s).or_insert(0) += 1;
                                if run_subject == Some(s) {
                                    run += 1;
                                } else {
                                    run_subject = Some(s);
                                    run = 1;
                                }
                                if instance.rules.rc01.mode == RuleMode::Hard {
                                    prop_assert!(run <= max_consecutive);
                                }
                            }
                            None => {
                                run_subject = None;
                                run = 0;
                            }
                        }
                    }
                    if instance.rules.rc02.blocks() {
                        for (&subject, &count) in &counts {
                            prop_assert!(count <= instance.rules.rc02.max_for(SubjectId(subject)));
                        }
                    }
                }
            }

            // Determinism
            let again = solve(&instance, true);
            prop_assert_eq!(&schedule.per_class, &again.per_class);
            prop_assert_eq!(&schedule.per_teacher, &again.per_teacher);
            prop_assert_eq!(&schedule.diagnostic, &again.diagnostic);
        }
    }
}
