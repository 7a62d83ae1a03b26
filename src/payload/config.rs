use crate::gateway::Gateway;
use crate::types::{PedagogicalRules, SchoolId};

/// Load the rule set for `(school, shift, year_ref, level)`.
///
/// Never fails: a missing store, missing row, malformed payload, or store
/// error all fall back to the defaults. The boolean is true when the
/// defaults were used.
pub fn load_rules(
    gateway: &dyn Gateway,
    school: SchoolId,
    shift: &str,
    year_ref: Option<i32>,
    level: Option<&str>,
) -> (PedagogicalRules, bool) {
    if year_ref.is_none() {
        return (PedagogicalRules::default(), true);
    }

    if !gateway.pedagogical_config_store_exists() {
        return (PedagogicalRules::default(), true);
    }

    match gateway.fetch_pedagogical_config(school, shift, year_ref, level) {
        Ok(Some(partial)) => (partial.into_rules(), false),
        Ok(None) | Err(_) => (PedagogicalRules::default(), true),
    }
}
