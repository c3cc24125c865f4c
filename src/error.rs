use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(rusqlite::Error),

    #[error("schema error: {0}")]
    Schema(String),

    #[error("invalid task: {0}")]
    Validation(&'static str),
}

pub type Result<T> = std::result::Result<T, TaskError>;

impl From<rusqlite::Error> for TaskError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::IntegralValueOutOfRange(..) => TaskError::Schema(err.to_string()),
            other => TaskError::StorageUnavailable(other),
        }
    }
}
