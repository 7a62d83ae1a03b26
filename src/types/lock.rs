use super::{ClassId, SubjectId, TeacherId};
use serde::{Deserialize, Serialize};

/// A pre-pinned cell the solver must place first and never move
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lock {
    pub class_id: ClassId,
    /// Day of week, 1-based
    pub day: u8,
    /// Period ordem within the day, 1-based
    pub ordem: u8,
    pub subject_id: SubjectId,
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
}
