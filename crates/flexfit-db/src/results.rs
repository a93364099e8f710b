use sqlx::FromRow;
use thiserror::Error as ThisError;

/// Model errors
#[derive(Debug, Clone, ThisError)]
pub enum QueryError {
    #[error("Not found")]
    NotFound,
}

/// Validation errors, raised before anything is written.
#[derive(Debug, Clone, ThisError)]
pub enum ValidationError {
    #[error("Required field '{0}' is empty")]
    EmptyField(&'static str),
}

#[derive(Debug, Clone, FromRow)]
pub struct Id<T> {
    pub id: T,
}
