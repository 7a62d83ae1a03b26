use super::{ensure_positive_class_ids, ensure_positive_school, normalize_shift, parse_period_blob, Gateway};
use crate::error::{Result, TimetableError};
use crate::types::{
    Assignment, AvailabilityRecord, Class, ClassId, Demand, GridPeriod, Lock, PartialRules,
    SchoolId, SubjectId, TeacherId, TimeGrid,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const RULES_FILE: &str = "pedagogical_rules.json";

/// Directory-backed store: one JSON file per relation, rows carrying their
/// school/shift scope. Queries filter in memory.
#[derive(Debug)]
pub struct JsonStore {
    dir: PathBuf,
    rules_store_probe: OnceLock<bool>,
}

#[derive(Debug, Deserialize)]
struct TimeGridRow {
    school_id: SchoolId,
    shift: String,
    day: u8,
    periods: Vec<GridPeriod>,
}

#[derive(Debug, Deserialize)]
struct ClassRow {
    school_id: SchoolId,
    id: ClassId,
    name: String,
    #[serde(default)]
    stage: String,
    #[serde(default)]
    series: String,
    shift: String,
}

#[derive(Debug, Deserialize)]
struct DemandRow {
    school_id: SchoolId,
    shift: String,
    class_id: ClassId,
    subject_id: SubjectId,
    weekly_lessons: u32,
}

#[derive(Debug, Deserialize)]
struct AssignmentRow {
    school_id: SchoolId,
    teacher_id: TeacherId,
    class_id: ClassId,
    subject_id: SubjectId,
    #[serde(default)]
    weekly_load: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct AvailabilityRow {
    school_id: SchoolId,
    shift: String,
    teacher_id: TeacherId,
    day: u8,
    /// Serialized period list; array, JSON string, or byte buffer
    periods: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct PreferenceRow {
    school_id: SchoolId,
    shift: String,
    teacher_id: TeacherId,
    rules: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct LockRow {
    school_id: SchoolId,
    shift: String,
    class_id: ClassId,
    day: u8,
    ordem: u8,
    subject_id: SubjectId,
    #[serde(default)]
    teacher_id: Option<TeacherId>,
}

#[derive(Debug, Deserialize)]
struct RulesRow {
    school_id: SchoolId,
    shift: String,
    #[serde(default)]
    year_ref: Option<i32>,
    #[serde(default)]
    level: Option<String>,
    rules: serde_json::Value,
}

impl JsonStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            rules_store_probe: OnceLock::new(),
        }
    }

    /// Generic row loader; an absent file is an empty relation
    fn load_rows<T: serde::de::DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.dir.join(file);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(TimetableError::FileRead {
                    path: path.display().to_string(),
                    source: e,
                }
                .into())
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            TimetableError::JsonParse {
                file: path.display().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Gateway for JsonStore {
    fn fetch_time_grid(&self, school: SchoolId, shift: &str) -> Result<TimeGrid> {
        ensure_positive_school(school)?;
        let shift = normalize_shift(shift);

        let rows: Vec<TimeGridRow> = self.load_rows("time_grid.json")?;
        let mut days: BTreeMap<u8, Vec<GridPeriod>> = BTreeMap::new();
        for row in rows {
            if row.school_id == school && normalize_shift(&row.shift) == shift {
                let periods = days.entry(row.day).or_default();
                periods.extend(row.periods);
                periods.sort_by_key(|p| p.ordem);
            }
        }
        Ok(TimeGrid { days })
    }

    fn fetch_classes(
        &self,
        school: SchoolId,
        shift: &str,
        class_ids: &[ClassId],
    ) -> Result<Vec<Class>> {
        ensure_positive_school(school)?;
        ensure_positive_class_ids(class_ids)?;
        let shift = normalize_shift(shift);

        let rows: Vec<ClassRow> = self.load_rows("classes.json")?;
        let mut classes: Vec<Class> = rows
            .into_iter()
            .filter(|row| {
                row.school_id == school
                    && normalize_shift(&row.shift) == shift
                    && class_ids.contains(&row.id)
            })
            .map(|row| Class {
                id: row.id,
                name: row.name,
                stage: row.stage,
                series: row.series,
                shift: normalize_shift(&row.shift),
            })
            .collect();
        classes.sort_by_key(|c| c.id);
        Ok(classes)
    }

    fn fetch_demand(
        &self,
        school: SchoolId,
        shift: &str,
        class_ids: &[ClassId],
    ) -> Result<Vec<Demand>> {
        ensure_positive_school(school)?;
        ensure_positive_class_ids(class_ids)?;
        let shift = normalize_shift(shift);

        let rows: Vec<DemandRow> = self.load_rows("demand.json")?;
        let mut demand: Vec<Demand> = rows
            .into_iter()
            .filter(|row| {
                row.school_id == school
                    && normalize_shift(&row.shift) == shift
                    && class_ids.contains(&row.class_id)
            })
            .map(|row| Demand {
                class_id: row.class_id,
                subject_id: row.subject_id,
                weekly_lessons: row.weekly_lessons,
            })
            .collect();
        demand.sort_by_key(|d| (d.class_id, d.subject_id));
        Ok(demand)
    }

    fn fetch_assignments(
        &self,
        school: SchoolId,
        class_ids: &[ClassId],
    ) -> Result<Vec<Assignment>> {
        ensure_positive_school(school)?;
        ensure_positive_class_ids(class_ids)?;

        let rows: Vec<AssignmentRow> = self.load_rows("assignments.json")?;
        let mut assignments: Vec<Assignment> = rows
            .into_iter()
            .filter(|row| row.school_id == school && class_ids.contains(&row.class_id))
            .map(|row| Assignment {
                teacher_id: row.teacher_id,
                class_id: row.class_id,
                subject_id: row.subject_id,
                weekly_load: row.weekly_load,
            })
            .collect();
        assignments.sort_by_key(|a| (a.class_id, a.subject_id, a.teacher_id));
        Ok(assignments)
    }

    fn fetch_availabilities(
        &self,
        school: SchoolId,
        shift: &str,
        teacher_ids: Option<&[TeacherId]>,
    ) -> Result<Vec<AvailabilityRecord>> {
        ensure_positive_school(school)?;
        let shift = normalize_shift(shift);

        let rows: Vec<AvailabilityRow> = self.load_rows("availabilities.json")?;
        let mut records = Vec::new();
        for row in rows {
            if row.school_id != school || normalize_shift(&row.shift) != shift {
                continue;
            }
            if let Some(ids) = teacher_ids {
                if !ids.contains(&row.teacher_id) {
                    continue;
                }
            }
            for (ordem, status) in parse_period_blob(&row.periods) {
                records.push(AvailabilityRecord {
                    teacher_id: row.teacher_id,
                    day: row.day,
                    ordem,
                    status,
                });
            }
        }
        records.sort_by_key(|r| (r.teacher_id, r.day, r.ordem));
        Ok(records)
    }

    fn fetch_preferences(
        &self,
        school: SchoolId,
        shift: &str,
        teacher_ids: Option<&[TeacherId]>,
    ) -> Result<BTreeMap<TeacherId, serde_json::Value>> {
        ensure_positive_school(school)?;
        let shift = normalize_shift(shift);

        let rows: Vec<PreferenceRow> = self.load_rows("preferences.json")?;
        let mut preferences = BTreeMap::new();
        for row in rows {
            if row.school_id != school || normalize_shift(&row.shift) != shift {
                continue;
            }
            if let Some(ids) = teacher_ids {
                if !ids.contains(&row.teacher_id) {
                    continue;
                }
            }
            preferences.entry(row.teacher_id).or_insert(row.rules);
        }
        Ok(preferences)
    }

    fn fetch_locks(
        &self,
        school: SchoolId,
        shift: &str,
        class_ids: &[ClassId],
    ) -> Result<Vec<Lock>> {
        ensure_positive_school(school)?;
        ensure_positive_class_ids(class_ids)?;
        let shift = normalize_shift(shift);

        let rows: Vec<LockRow> = self.load_rows("locks.json")?;
        let mut locks: Vec<Lock> = rows
            .into_iter()
            .filter(|row| {
                row.school_id == school
                    && normalize_shift(&row.shift) == shift
                    && class_ids.contains(&row.class_id)
            })
            .map(|row| Lock {
                class_id: row.class_id,
                day: row.day,
                ordem: row.ordem,
                subject_id: row.subject_id,
                teacher_id: row.teacher_id,
            })
            .collect();
        locks.sort_by_key(|l| (l.class_id, l.day, l.ordem));
        Ok(locks)
    }

    fn fetch_pedagogical_config(
        &self,
        school: SchoolId,
        shift: &str,
        year_ref: Option<i32>,
        level: Option<&str>,
    ) -> Result<Option<PartialRules>> {
        ensure_positive_school(school)?;
        let shift = normalize_shift(shift);

        let rows: Vec<RulesRow> = self.load_rows(RULES_FILE)?;
        let row = rows.into_iter().find(|row| {
            row.school_id == school
                && normalize_shift(&row.shift) == shift
                && row.year_ref == year_ref
                && row.level.as_deref() == level
        });

        // A malformed rules payload degrades to "no row"; the loader then
        // falls back to defaults. Payloads stored as JSON strings are
        // unwrapped transparently.
        Ok(row.and_then(|row| match row.rules {
            serde_json::Value::String(text) => serde_json::from_str::<PartialRules>(&text).ok(),
            value => serde_json::from_value::<PartialRules>(value).ok(),
        }))
    }

    fn pedagogical_config_store_exists(&self) -> bool {
        *self
            .rules_store_probe
            .get_or_init(|| self.dir.join(RULES_FILE).exists())
    }
}
