use crate::types::{cell_at, ProblemInstance, Schedule, TimeGrid};
use crate::validator::PreSolveReport;

/// Generate a markdown report with one weekly table per class
pub fn generate_markdown_report(
    instance: &ProblemInstance,
    schedule: &Schedule,
    pre_solve: &PreSolveReport,
) -> String {
    let mut lines = vec![
        "# Timetable Report".to_string(),
        String::new(),
        format!("School: {}  ", instance.school_id),
        format!("Shift: {}  ", instance.shift),
        format!("Solve time: {}ms", schedule.solve_time_ms),
        String::new(),
    ];

    // Summary
    lines.push("## Summary\n".to_string());
    lines.push("| Metric | Value |".to_string());
    lines.push("|--------|-------|".to_string());
    lines.push(format!("| Lessons placed | {} |", schedule.metrics.aulas_alocadas));
    lines.push(format!("| Lessons demanded | {} |", schedule.metrics.aulas_demanda));
    lines.push(format!("| Coverage | {}% |", schedule.metrics.cobertura));
    lines.push(format!("| Periods per day | {} |", schedule.metrics.periodos_por_dia));
    lines.push(format!("| Pre-solve errors | {} |", pre_solve.errors.len()));
    lines.push(format!("| Pre-solve warnings | {} |", pre_solve.warnings.len()));
    lines.push(String::new());

    if !pre_solve.errors.is_empty() {
        lines.push("## Pre-Solve Errors\n".to_string());
        for error in &pre_solve.errors {
            lines.push(format!("- {}", error));
        }
        lines.push(String::new());
    }

    // One weekly table per class
    for (class_id, grid) in &schedule.per_class {
        let name = instance
            .classes
            .iter()
            .find(|c| c.id == *class_id)
            .map(|c| c.name.as_str())
            .unwrap_or("Unknown");
        lines.push(format!("## {} (class {})\n", name, class_id));

        let mut header = "| Period |".to_string();
        let mut separator = "|--------|".to_string();
        for day in 1..=5u8 {
            header.push_str(&format!(" {} |", TimeGrid::day_name(day)));
            separator.push_str("--------|");
        }
        lines.push(header);
        lines.push(separator);

        for ordem in 1..=instance.periods_per_day {
            let mut row = format!("| P{} |", ordem);
            for day in 1..=5u8 {
                match cell_at(grid, day, ordem) {
                    Some(cell) => {
                        let teacher = cell
                            .teacher_id
                            .map(|t| format!(" (t{})", t))
                            .unwrap_or_default();
                        row.push_str(&format!(" s{}{} |", cell.subject_id, teacher));
                    }
                    None => row.push_str(" — |"),
                }
            }
            lines.push(row);
        }
        lines.push(String::new());
    }

    // Unplaced lessons
    if !schedule.diagnostic.nao_alocadas.is_empty() {
        lines.push("## Unplaced Lessons\n".to_string());
        for lesson in &schedule.diagnostic.nao_alocadas {
            lines.push(format!(
                "- class {}, subject {}, teacher {}: {:?}",
                lesson.class_id, lesson.subject_id, lesson.teacher_id, lesson.reason
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::solve;
    use crate::types::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_markdown_has_class_table() {
        let mut days = BTreeMap::new();
        days.insert(1, vec![GridPeriod::new(1, "07:00", "07:50")]);
        let instance = ProblemInstance {
            school_id: SchoolId(1),
            shift: "manha".to_string(),
            year_ref: None,
            level: None,
            periods_per_day: 1,
            config_defaulted: true,
            time_grid: TimeGrid { days },
            classes: vec![Class {
                id: ClassId(4),
                name: "7B".to_string(),
                stage: String::new(),
                series: String::new(),
                shift: "manha".to_string(),
            }],
            demand: vec![Demand {
                class_id: ClassId(4),
                subject_id: SubjectId(2),
                weekly_lessons: 1,
            }],
            assignments: vec![Assignment {
                teacher_id: TeacherId(9),
                class_id: ClassId(4),
                subject_id: SubjectId(2),
                weekly_load: None,
            }],
            availabilities: vec![],
            preferences: BTreeMap::new(),
            locks: vec![],
            rules: PedagogicalRules::default(),
        };
        let schedule = solve(&instance, true);
        let report = run_report(&instance, &schedule);

        assert!(report.contains("## 7B (class 4)"));
        assert!(report.contains("| Monday |"));
        assert!(report.contains("s2 (t9)"));
    }

    fn run_report(instance: &ProblemInstance, schedule: &Schedule) -> String {
        let pre_solve = crate::validator::run_pre_solve(instance);
        generate_markdown_report(instance, schedule, &pre_solve)
    }
}
