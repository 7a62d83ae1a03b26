use thiserror::Error;

/// Domain-specific errors for the timetable core
#[derive(Error, Debug)]
pub enum TimetableError {
    // Input errors (rejected before any store query runs)
    #[error("Missing or empty shift")]
    MissingShift,

    #[error("Class id list is empty")]
    EmptyClassIds,

    #[error("Invalid class id '{0}': ids must be positive integers")]
    InvalidClassId(String),

    #[error("Invalid year reference '{0}': must be an integer")]
    InvalidYearRef(String),

    #[error("Invalid school id {0}: must be a positive integer")]
    InvalidSchoolId(i64),

    // Infrastructure errors (propagate to the caller)
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    #[error("Store query '{query}' failed: {message}")]
    StoreQuery { query: String, message: String },
}

/// Use anyhow::Result at application boundaries
pub type Result<T> = anyhow::Result<T>;
