use thiserror::Error;

/// A failure surfaced by the database driver.
///
/// `code` is the SQLSTATE reported by the server, when there is one. Network
/// and TLS failures never carry a code.
#[derive(Debug, Clone, PartialEq)]
pub struct DbFailure {
    pub code: Option<String>,
    pub message: String,
}

impl DbFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl From<tokio_postgres::Error> for DbFailure {
    fn from(e: tokio_postgres::Error) -> Self {
        Self {
            code: e.code().map(|state| state.code().to_string()),
            message: e.to_string(),
        }
    }
}

/// Error type for pgprobe operations
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Connection URI is not set (expected DATABASE_URL)")]
    MissingConnectionUri,

    #[error("Connection failed: {}", .0.message)]
    ConnectionFailed(DbFailure),

    #[error("Query failed: {}", .0.message)]
    QueryFailed(DbFailure),

    #[error("Disconnect failed: {}", .0.message)]
    DisconnectFailed(DbFailure),

    #[error("Expected {expected} row(s), got {actual}")]
    UnexpectedRowCount { expected: usize, actual: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

impl ProbeError {
    /// The driver-reported error code, if any.
    pub fn code(&self) -> Option<&str> {
        self.failure().and_then(|f| f.code.as_deref())
    }

    /// The message hints are matched against.
    pub fn message(&self) -> String {
        match self.failure() {
            Some(f) => f.message.clone(),
            None => self.to_string(),
        }
    }

    fn failure(&self) -> Option<&DbFailure> {
        match self {
            ProbeError::ConnectionFailed(f)
            | ProbeError::QueryFailed(f)
            | ProbeError::DisconnectFailed(f) => Some(f),
            _ => None,
        }
    }
}

/// Result type alias for pgprobe operations
pub type Result<T> = std::result::Result<T, ProbeError>;
