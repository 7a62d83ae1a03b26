mod json;

pub use json::*;

use crate::error::{Result, TimetableError};
use crate::types::{
    Assignment, AvailabilityRecord, Class, ClassId, Demand, Lock, PartialRules, SchoolId,
    TeacherId, TimeGrid,
};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Read-only query surface over the relational store.
///
/// Implementations normalize `shift` case, reject non-positive ids, and
/// return empty collections when a relation is absent. Only I/O failures
/// propagate as errors.
pub trait Gateway {
    fn fetch_time_grid(&self, school: SchoolId, shift: &str) -> Result<TimeGrid>;

    fn fetch_classes(
        &self,
        school: SchoolId,
        shift: &str,
        class_ids: &[ClassId],
    ) -> Result<Vec<Class>>;

    fn fetch_demand(
        &self,
        school: SchoolId,
        shift: &str,
        class_ids: &[ClassId],
    ) -> Result<Vec<Demand>>;

    fn fetch_assignments(&self, school: SchoolId, class_ids: &[ClassId])
        -> Result<Vec<Assignment>>;

    fn fetch_availabilities(
        &self,
        school: SchoolId,
        shift: &str,
        teacher_ids: Option<&[TeacherId]>,
    ) -> Result<Vec<AvailabilityRecord>>;

    fn fetch_preferences(
        &self,
        school: SchoolId,
        shift: &str,
        teacher_ids: Option<&[TeacherId]>,
    ) -> Result<BTreeMap<TeacherId, serde_json::Value>>;

    fn fetch_locks(&self, school: SchoolId, shift: &str, class_ids: &[ClassId])
        -> Result<Vec<Lock>>;

    /// The rule row for `(school, shift, year_ref, level)`, or None when the
    /// row is absent or its payload is malformed
    fn fetch_pedagogical_config(
        &self,
        school: SchoolId,
        shift: &str,
        year_ref: Option<i32>,
        level: Option<&str>,
    ) -> Result<Option<PartialRules>>;

    /// Cached capability probe; older deployments may lack the rules table
    fn pedagogical_config_store_exists(&self) -> bool;
}

/// Lowercase a shift for case-insensitive matching
pub fn normalize_shift(shift: &str) -> String {
    shift.trim().to_lowercase()
}

/// Queries reject non-positive ids before touching the store
pub fn ensure_positive_class_ids(class_ids: &[ClassId]) -> Result<()> {
    for id in class_ids {
        if id.0 <= 0 {
            return Err(TimetableError::InvalidClassId(id.0.to_string()).into());
        }
    }
    Ok(())
}

pub fn ensure_positive_school(school: SchoolId) -> Result<()> {
    if school.0 <= 0 {
        return Err(TimetableError::InvalidSchoolId(school.0).into());
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct PeriodBlobItem {
    ordem: u8,
    #[serde(default)]
    status: Option<String>,
}

/// Parse a serialized period-list blob into `(ordem, status)` pairs.
///
/// Accepts an already-materialized array, a JSON string, or a byte buffer
/// (array of u8 holding UTF-8 JSON). Anything unparseable degrades to the
/// empty list rather than failing the request.
pub fn parse_period_blob(value: &serde_json::Value) -> Vec<(u8, String)> {
    match value {
        serde_json::Value::Array(items) => {
            // Byte buffer: all numbers, decode as UTF-8 JSON text
            if !items.is_empty() && items.iter().all(|v| v.is_u64()) {
                let bytes: Vec<u8> = items
                    .iter()
                    .filter_map(|v| v.as_u64())
                    .filter(|&b| b <= u8::MAX as u64)
                    .map(|b| b as u8)
                    .collect();
                return match String::from_utf8(bytes) {
                    Ok(text) => parse_period_text(&text),
                    Err(_) => Vec::new(),
                };
            }
            parse_period_items(value)
        }
        serde_json::Value::String(text) => parse_period_text(text),
        _ => Vec::new(),
    }
}

fn parse_period_text(text: &str) -> Vec<(u8, String)> {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => parse_period_items(&value),
        Err(_) => Vec::new(),
    }
}

fn parse_period_items(value: &serde_json::Value) -> Vec<(u8, String)> {
    match serde_json::from_value::<Vec<PeriodBlobItem>>(value.clone()) {
        Ok(items) => items
            .into_iter()
            .map(|item| (item.ordem, item.status.unwrap_or_else(|| "livre".to_string())))
            .collect(),
        Err(_) => Vec::new(),
    }
}
