use super::{ClassId, SubjectId, TeacherId};
use serde::{Deserialize, Serialize};

/// The binding of a teacher to a `(class, subject)` pair (modulacao).
///
/// Unique per `(class_id, subject_id)`; when duplicate rows exist the first
/// one in ascending id order wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub teacher_id: TeacherId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    /// How many of the weekly lessons this row covers. Absent means the full
    /// demand; only the pre-solve load-sum check consults this.
    #[serde(default)]
    pub weekly_load: Option<u32>,
}
