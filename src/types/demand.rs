use super::{ClassId, SubjectId};
use serde::{Deserialize, Serialize};

/// Weekly lesson count a class owes to a subject (turma_cargas).
///
/// Unique per `(class_id, subject_id)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demand {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub weekly_lessons: u32,
}
