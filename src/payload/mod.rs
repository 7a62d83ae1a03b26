mod config;

pub use config::*;

use crate::error::Result;
use crate::gateway::{normalize_shift, Gateway};
use crate::types::{ClassId, ProblemInstance, SchoolId};

/// Fallback periods-per-day when the time grid is empty
pub const DEFAULT_PERIODS_PER_DAY: u8 = 6;

/// Consolidate the store's relational inputs into one scheduling problem.
///
/// Deterministic for a given store snapshot: every collection on the
/// returned instance is ordered by ascending id.
pub fn build_problem(
    gateway: &dyn Gateway,
    school_id: SchoolId,
    shift: &str,
    class_ids: &[ClassId],
    year_ref: Option<i32>,
    level: Option<&str>,
) -> Result<ProblemInstance> {
    let shift = normalize_shift(shift);

    let time_grid = gateway.fetch_time_grid(school_id, &shift)?;
    let classes = gateway.fetch_classes(school_id, &shift, class_ids)?;
    let demand = gateway.fetch_demand(school_id, &shift, class_ids)?;
    let assignments = gateway.fetch_assignments(school_id, class_ids)?;
    let locks = gateway.fetch_locks(school_id, &shift, class_ids)?;

    // Availability and preference queries are scoped to the teachers that
    // actually appear in the assignments.
    let mut teacher_ids: Vec<_> = assignments.iter().map(|a| a.teacher_id).collect();
    teacher_ids.sort_unstable();
    teacher_ids.dedup();

    let availabilities =
        gateway.fetch_availabilities(school_id, &shift, Some(teacher_ids.as_slice()))?;
    let preferences = gateway.fetch_preferences(school_id, &shift, Some(teacher_ids.as_slice()))?;

    let (rules, config_defaulted) = load_rules(gateway, school_id, &shift, year_ref, level);

    let periods_per_day = time_grid
        .max_ordem()
        .map(|max| max.clamp(1, 10))
        .unwrap_or(DEFAULT_PERIODS_PER_DAY);

    Ok(ProblemInstance {
        school_id,
        shift,
        year_ref,
        level: level.map(str::to_string),
        periods_per_day,
        config_defaulted,
        time_grid,
        classes,
        demand,
        assignments,
        availabilities,
        preferences,
        locks,
        rules,
    })
}
