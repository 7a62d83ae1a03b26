use crate::types::{ProblemInstance, Schedule};
use crate::validator::PreSolveReport;
use colored::Colorize;

/// Generate a plain text report (with colors for terminal)
pub fn generate_text_report(
    instance: &ProblemInstance,
    schedule: &Schedule,
    pre_solve: &PreSolveReport,
) -> String {
    let mut lines = Vec::new();

    lines.push("═".repeat(60));
    lines.push("               TIMETABLE REPORT".to_string());
    lines.push("═".repeat(60));
    lines.push(String::new());

    lines.push(format!("School:      {}", instance.school_id));
    lines.push(format!("Shift:       {}", instance.shift));
    lines.push(format!("Solve Time:  {}ms", schedule.solve_time_ms));
    lines.push(String::new());

    lines.push("─".repeat(40));
    lines.push("METRICS".to_string());
    lines.push("─".repeat(40));
    lines.push(format!("  Placed:        {}", schedule.metrics.aulas_alocadas));
    lines.push(format!("  Demanded:      {}", schedule.metrics.aulas_demanda));
    lines.push(format!("  Coverage:      {}%", schedule.metrics.cobertura));
    lines.push(format!("  Periods/day:   {}", schedule.metrics.periodos_por_dia));
    lines.push(String::new());

    lines.push("─".repeat(40));
    if pre_solve.is_clean() {
        lines.push("PRE-SOLVE: CLEAN".green().to_string());
    } else {
        lines.push("PRE-SOLVE: ERRORS".red().to_string());
        for error in &pre_solve.errors {
            lines.push(format!("  ! {}", error));
        }
    }
    for warning in &pre_solve.warnings {
        lines.push(format!("  ~ {}", warning.yellow()));
    }
    lines.push("─".repeat(40));
    lines.push(String::new());

    if !schedule.diagnostic.nao_alocadas.is_empty() {
        lines.push("UNPLACED LESSONS".to_string());
        lines.push("─".repeat(40));
        for lesson in &schedule.diagnostic.nao_alocadas {
            lines.push(format!(
                "  class {} | subject {} | teacher {} | {:?}",
                lesson.class_id, lesson.subject_id, lesson.teacher_id, lesson.reason
            ));
        }
        lines.push(String::new());
    }

    lines.push("═".repeat(60));
    lines.join("\n")
}

/// Print a quick summary to stdout after a run
pub fn print_summary(schedule: &Schedule, pre_solve: &PreSolveReport) {
    println!();
    if schedule.metrics.cobertura == 100 {
        println!("{}", "✓ Timetable generated with full coverage".green().bold());
    } else {
        println!(
            "{}",
            format!(
                "! Timetable generated with {}% coverage",
                schedule.metrics.cobertura
            )
            .yellow()
            .bold()
        );
    }
    println!();
    println!("  Placed:    {}/{}", schedule.metrics.aulas_alocadas, schedule.metrics.aulas_demanda);
    println!("  Unplaced:  {}", schedule.diagnostic.nao_alocadas.len());
    println!(
        "  Pre-solve: {} error(s), {} warning(s)",
        pre_solve.errors.len(),
        pre_solve.warnings.len()
    );
    println!("  Time:      {}ms", schedule.solve_time_ms);
    println!();
}
