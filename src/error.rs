use thiserror::Error;

/// Failures raised by the data-access layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("unsupported statement: {0}")]
    UnsupportedStatement(String),

    #[error("missing query parameter :{0}")]
    MissingParameter(String),

    #[error("parameter :{0} is not used by the statement")]
    UnusedParameter(String),

    #[error("invalid value for parameter :{0}")]
    InvalidParameter(String),

    #[error("unexpected query result: {0}")]
    UnexpectedResult(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
