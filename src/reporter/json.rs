use crate::types::{
    ClassCell, ClassId, Diagnostic, Metrics, ProblemInstance, Schedule, SchoolId, TeacherCell,
    TeacherId, WeekGrid,
};
use crate::validator::PreSolveReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Instance headline numbers echoed in the run response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadSummary {
    pub school_id: SchoolId,
    pub shift: String,
    pub year_ref: Option<i32>,
    pub level: Option<String>,
    pub classes: usize,
    pub demand: usize,
    pub teachers: usize,
}

/// The run endpoint response. Grid maps are dense: every day 1..=5 and
/// every period 1..=periods_per_day is a present key, empty cells are
/// explicit nulls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResponse {
    pub ok: bool,
    pub trace_id: String,
    pub payload_summary: PayloadSummary,
    pub grade_por_turma: BTreeMap<ClassId, WeekGrid<ClassCell>>,
    pub grade_por_professor: BTreeMap<TeacherId, WeekGrid<TeacherCell>>,
    pub diagnostico: Diagnostic,
    pub metrics: Metrics,
}

/// The pre-solve endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreSolveResponse {
    pub pre_solve: PreSolveReport,
    pub payload: ProblemInstance,
}

pub fn build_payload_summary(instance: &ProblemInstance) -> PayloadSummary {
    PayloadSummary {
        school_id: instance.school_id,
        shift: instance.shift.clone(),
        year_ref: instance.year_ref,
        level: instance.level.clone(),
        classes: instance.classes.len(),
        demand: instance.demand.len(),
        teachers: instance.teacher_ids().len(),
    }
}

pub fn build_run_response(instance: &ProblemInstance, schedule: &Schedule) -> RunResponse {
    RunResponse {
        ok: true,
        trace_id: new_trace_id(instance.school_id),
        payload_summary: build_payload_summary(instance),
        grade_por_turma: schedule.per_class.clone(),
        grade_por_professor: schedule.per_teacher.clone(),
        diagnostico: schedule.diagnostic.clone(),
        metrics: schedule.metrics.clone(),
    }
}

pub fn build_pre_solve_response(
    instance: ProblemInstance,
    pre_solve: PreSolveReport,
) -> PreSolveResponse {
    PreSolveResponse {
        pre_solve,
        payload: instance,
    }
}

fn new_trace_id(school_id: SchoolId) -> String {
    format!(
        "run-{}-{}",
        school_id,
        chrono::Utc::now().format("%Y%m%d%H%M%S%3f")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::solve;
    use crate::types::*;
    use std::collections::BTreeMap as Map;

    fn small_instance() -> ProblemInstance {
        let mut days = Map::new();
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
            school_id: SchoolId(3),
            shift: "manha".to_string(),
            year_ref: Some(2026),
            level: None,
            periods_per_day: 2,
            config_defaulted: true,
            time_grid: TimeGrid { days },
            classes: vec![Class {
                id: ClassId(11),
                name: "6A".to_string(),
                stage: String::new(),
                series: String::new(),
                shift: "manha".to_string(),
            }],
            demand: vec![Demand {
                class_id: ClassId(11),
                subject_id: SubjectId(2),
                weekly_lessons: 1,
            }],
            assignments: vec![Assignment {
                teacher_id: TeacherId(5),
                class_id: ClassId(11),
                subject_id: SubjectId(2),
                weekly_load: None,
            }],
            availabilities: vec![],
            preferences: Map::new(),
            locks: vec![],
            rules: PedagogicalRules::default(),
        }
    }

    #[test]
    fn test_run_response_grids_are_dense_with_explicit_nulls() {
        let instance = small_instance();
        let schedule = solve(&instance, true);
        let response = build_run_response(&instance, &schedule);
        let value = serde_json::to_value(&response).unwrap();

        let class_grid = value["grade_por_turma"]["11"].as_object().unwrap();
        for day in 1..=5 {
            let row = class_grid[&day.to_string()].as_object().unwrap();
            for ordem in 1..=2 {
                assert!(
                    row.contains_key(&ordem.to_string()),
                    "day {} ordem {} must be a present key",
                    day,
                    ordem
                );
            }
        }
        // The one placement sits at Monday P1; everything else is null
        assert!(class_grid["1"]["1"].is_object());
        assert!(class_grid["1"]["2"].is_null());
        assert!(class_grid["5"]["2"].is_null());

        assert_eq!(value["metrics"]["aulas_alocadas"], 1);
        assert_eq!(value["metrics"]["cobertura"], 100);
        assert_eq!(value["payload_summary"]["teachers"], 1);
        assert!(value["trace_id"].as_str().unwrap().starts_with("run-3-"));
    }

    #[test]
    fn test_pre_solve_response_carries_payload() {
        let instance = small_instance();
        let report = crate::validator::run_pre_solve(&instance);
        let response = build_pre_solve_response(instance, report);
        let value = serde_json::to_value(&response).unwrap();

        assert!(value["pre_solve"]["errors"].is_array());
        assert!(value["pre_solve"]["stats"]["demand_rows"].is_number());
        assert_eq!(value["payload"]["shift"], "manha");
    }
}
