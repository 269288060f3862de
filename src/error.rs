use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    /// A level request that cannot be satisfied (e.g. target not above current).
    #[error("Invalid {field} ({value}): {constraint}")]
    InvalidRange {
        field: &'static str,
        value: i64,
        constraint: String,
    },

    /// Candy experience table yields no progress, the candy loop would never end.
    #[error("Candy experience gain is zero at level {level}")]
    ZeroExpGain { level: u32 },

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CalcError {
    pub fn invalid_range(field: &'static str, value: i64, constraint: impl Into<String>) -> Self {
        CalcError::InvalidRange {
            field,
            value,
            constraint: constraint.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
