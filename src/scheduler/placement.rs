use crate::types::{
    cell_at, AvailabilityIndex, ClassCell, Lesson, PedagogicalRules, ProblemInstance, SubjectId,
    TeacherCell, WeekGrid,
};

/// Soft-penalty constants of the placement score
const EARLY_PERIOD_WEIGHT: f64 = 0.5;
const EARLY_DAY_WEIGHT: f64 = 0.05;
const LEFT_NEIGHBOR_BONUS: f64 = 0.7;
const RIGHT_NEIGHBOR_BONUS: f64 = 0.4;
const TEACHER_SAME_DAY_BONUS: f64 = 0.3;
const RC01_BASE_PENALTY: f64 = 1000.0;
const RC01_STEP_PENALTY: f64 = 200.0;
const RC02_BASE_PENALTY: f64 = 1500.0;
const RC02_STEP_PENALTY: f64 = 400.0;

/// Length of the same-subject run through `(day, ordem)` if the subject
/// were placed there
fn run_length_if_placed(
    class_grid: &WeekGrid<ClassCell>,
    subject_id: SubjectId,
    day: u8,
    ordem: u8,
) -> u8 {
    let same_subject = |o: u8| {
        cell_at(class_grid, day, o)
            .map(|cell| cell.subject_id == subject_id)
            .unwrap_or(false)
    };

    let mut run = 1u8;
    let mut left = ordem;
    while left > 1 && same_subject(left - 1) {
        run += 1;
        left -= 1;
    }
    let mut right = ordem;
    while same_subject(right + 1) {
        run += 1;
        right += 1;
    }
    run
}

fn same_day_subject_count(class_grid: &WeekGrid<ClassCell>, subject_id: SubjectId, day: u8) -> u8 {
    class_grid
        .get(&day)
        .map(|row| {
            row.values()
                .filter(|cell| cell.map(|c| c.subject_id == subject_id).unwrap_or(false))
                .count() as u8
        })
        .unwrap_or(0)
}

fn teacher_busy_on_day(teacher_grid: &WeekGrid<TeacherCell>, day: u8) -> bool {
    teacher_grid
        .get(&day)
        .map(|row| row.values().any(|cell| cell.is_some()))
        .unwrap_or(false)
}

/// Score of placing `subject` at `(day, ordem)`; lower is better.
///
/// Returns None when a hard-mode pedagogical rule forbids the slot (RC-01
/// hard over the consecutive cap; RC-02 hard or strict mock at the per-day
/// cap).
pub fn place_score(
    class_grid: &WeekGrid<ClassCell>,
    teacher_grid: &WeekGrid<TeacherCell>,
    rules: &PedagogicalRules,
    subject_id: SubjectId,
    day: u8,
    ordem: u8,
) -> Option<f64> {
    let mut score = ordem as f64 * EARLY_PERIOD_WEIGHT + day as f64 * EARLY_DAY_WEIGHT;

    if ordem > 1 && cell_at(class_grid, day, ordem - 1).is_some() {
        score -= LEFT_NEIGHBOR_BONUS;
    }
    if cell_at(class_grid, day, ordem + 1).is_some() {
        score -= RIGHT_NEIGHBOR_BONUS;
    }

    let run = run_length_if_placed(class_grid, subject_id, day, ordem);
    let max_consecutive = rules.max_consecutive();
    if run > max_consecutive {
        if rules.rc01.mode == crate::types::RuleMode::Hard {
            return None;
        }
        score += RC01_BASE_PENALTY + RC01_STEP_PENALTY * (run - max_consecutive) as f64;
    }

    let count = same_day_subject_count(class_grid, subject_id, day);
    let cap = rules.rc02.max_for(subject_id);
    if count >= cap {
        if rules.rc02.blocks() {
            return None;
        }
        score += RC02_BASE_PENALTY + RC02_STEP_PENALTY * (count - cap) as f64;
    }

    if teacher_busy_on_day(teacher_grid, day) {
        score -= TEACHER_SAME_DAY_BONUS;
    }

    Some(score)
}

/// The feasible slot of minimum score for a lesson, ties broken by smaller
/// day then smaller period.
pub fn find_best_slot(
    instance: &ProblemInstance,
    class_grid: &WeekGrid<ClassCell>,
    teacher_grid: &WeekGrid<TeacherCell>,
    availability: &AvailabilityIndex,
    lesson: &Lesson,
) -> Option<(u8, u8)> {
    let mut best: Option<((u8, u8), f64)> = None;

    // Slots come out in ascending (day, ordem) order, so a strict `<`
    // realizes the tie-break.
    for (day, ordem) in instance.time_grid.slots() {
        if cell_at(class_grid, day, ordem).is_some() {
            continue;
        }
        if cell_at(teacher_grid, day, ordem).is_some() {
            continue;
        }
        if !availability.is_free(lesson.teacher_id, day, ordem) {
            continue;
        }

        let Some(score) = place_score(
            class_grid,
            teacher_grid,
            &instance.rules,
            lesson.subject_id,
            day,
            ordem,
        ) else {
            continue;
        };

        if best.map(|(_, s)| score < s).unwrap_or(true) {
            best = Some(((day, ordem), score));
        }
    }

    best.map(|(slot, _)| slot)
}
