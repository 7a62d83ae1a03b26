use crate::error::{Result, TimetableError};
use crate::types::ClassId;
use serde::Deserialize;

/// Class ids as either a materialized integer list or a "1,2,3" string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ClassIdsInput {
    List(Vec<i64>),
    Csv(String),
}

/// Input of the pre-solve and run endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct RunRequest {
    pub shift: String,
    pub class_ids: ClassIdsInput,
    #[serde(default)]
    pub year_ref: Option<i32>,
    #[serde(default)]
    pub level: Option<String>,
}

/// A validated request: non-empty lowercased shift, sorted positive class ids
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub shift: String,
    pub class_ids: Vec<ClassId>,
    pub year_ref: Option<i32>,
    pub level: Option<String>,
}

impl RunRequest {
    pub fn validate(self) -> Result<ValidatedRequest> {
        let shift = self.shift.trim().to_lowercase();
        if shift.is_empty() {
            return Err(TimetableError::MissingShift.into());
        }

        let mut class_ids = match self.class_ids {
            ClassIdsInput::List(ids) => ids,
            ClassIdsInput::Csv(text) => parse_class_id_csv(&text)?,
        };
        if class_ids.is_empty() {
            return Err(TimetableError::EmptyClassIds.into());
        }
        for &id in &class_ids {
            if id <= 0 {
                return Err(TimetableError::InvalidClassId(id.to_string()).into());
            }
        }
        class_ids.sort_unstable();
        class_ids.dedup();

        Ok(ValidatedRequest {
            shift,
            class_ids: class_ids.into_iter().map(ClassId).collect(),
            year_ref: self.year_ref,
            level: self.level,
        })
    }
}

fn parse_class_id_csv(text: &str) -> Result<Vec<i64>> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| TimetableError::InvalidClassId(token.to_string()).into())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_form() {
        let request: RunRequest =
            serde_json::from_str(r#"{"shift": "Manha", "class_ids": [3, 1, 3]}"#).unwrap();
        let validated = request.validate().unwrap();
        assert_eq!(validated.shift, "manha");
        assert_eq!(validated.class_ids, vec![ClassId(1), ClassId(3)]);
        assert_eq!(validated.year_ref, None);
    }

    #[test]
    fn test_csv_form() {
        let request: RunRequest =
            serde_json::from_str(r#"{"shift": "tarde", "class_ids": "1, 2,3"}"#).unwrap();
        let validated = request.validate().unwrap();
        assert_eq!(
            validated.class_ids,
            vec![ClassId(1), ClassId(2), ClassId(3)]
        );
    }

    #[test]
    fn test_missing_shift_rejected() {
        let request: RunRequest =
            serde_json::from_str(r#"{"shift": "  ", "class_ids": [1]}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_and_invalid_class_ids_rejected() {
        let empty: RunRequest =
            serde_json::from_str(r#"{"shift": "manha", "class_ids": []}"#).unwrap();
        assert!(empty.validate().is_err());

        let garbage: RunRequest =
            serde_json::from_str(r#"{"shift": "manha", "class_ids": "1,x"}"#).unwrap();
        assert!(garbage.validate().is_err());

        let negative: RunRequest =
            serde_json::from_str(r#"{"shift": "manha", "class_ids": [-2]}"#).unwrap();
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_non_integer_year_ref_rejected_at_parse() {
        let result = serde_json::from_str::<RunRequest>(
            r#"{"shift": "manha", "class_ids": [1], "year_ref": "2026x"}"#,
        );
        assert!(result.is_err());
    }
}
