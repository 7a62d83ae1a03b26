mod checks;

pub use checks::*;

use crate::types::ProblemInstance;
use serde::{Deserialize, Serialize};

/// Result of the pre-solve consistency checks.
///
/// The report never blocks: the scheduler always runs and the caller
/// decides whether to surface errors downstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreSolveReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: PreSolveStats,
}

impl PreSolveReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Instance counts reported alongside errors and warnings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreSolveStats {
    pub classes: usize,
    pub demand_rows: usize,
    pub total_weekly_lessons: u32,
    pub teachers: usize,
    pub availability_rows: usize,
    pub locks: usize,
}

/// Run all four consistency checks over a built instance
pub fn run_pre_solve(instance: &ProblemInstance) -> PreSolveReport {
    let mut report = PreSolveReport::default();

    check_time_grid(instance, &mut report);
    check_demand_vs_assignments(instance, &mut report);
    check_availabilities(instance, &mut report);
    check_locks(instance, &mut report);

    report.stats = PreSolveStats {
        classes: instance.classes.len(),
        demand_rows: instance.demand.len(),
        total_weekly_lessons: instance.total_demand(),
        teachers: instance.teacher_ids().len(),
        availability_rows: instance.availabilities.len(),
        locks: instance.locks.len(),
    };

    report
}
