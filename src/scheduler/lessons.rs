use crate::types::{Lesson, ProblemInstance};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Explode demand joined with assignments into one lesson per weekly
/// occurrence, heaviest (class, subject) pairs first.
///
/// The sort key `(-weekly_lessons, class, subject, teacher, seq)` fixes the
/// placement order completely, so equal instances solve identically.
pub fn build_lessons(instance: &ProblemInstance) -> Vec<Lesson> {
    let owners = instance.effective_assignments();
    let mut weekly: BTreeMap<(i64, i64), u32> = BTreeMap::new();
    let mut lessons = Vec::new();

    for demand in &instance.demand {
        if demand.weekly_lessons == 0 {
            continue;
        }
        let Some(&teacher_id) = owners.get(&(demand.class_id, demand.subject_id)) else {
            // Demand with no teacher: counted in the demand metric, but
            // there is nothing to place.
            continue;
        };
        weekly.insert(
            (demand.class_id.0, demand.subject_id.0),
            demand.weekly_lessons,
        );
        for seq in 0..demand.weekly_lessons {
            lessons.push(Lesson {
                class_id: demand.class_id,
                subject_id: demand.subject_id,
                teacher_id,
                seq,
            });
        }
    }

    lessons.sort_by_key(|l| {
        (
            Reverse(weekly[&(l.class_id.0, l.subject_id.0)]),
            l.class_id,
            l.subject_id,
            l.teacher_id,
            l.seq,
        )
    });
    lessons
}
