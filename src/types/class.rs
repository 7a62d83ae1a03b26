use super::ClassId;
use serde::{Deserialize, Serialize};

/// A fixed group of students (turma) moving through the weekly schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    /// Educational stage (e.g. "fundamental", "medio")
    #[serde(default)]
    pub stage: String,
    /// Series/grade label within the stage
    #[serde(default)]
    pub series: String,
    pub shift: String,
}
