use std::fmt;

/// Category of an executor error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection or network failure.
    Io,
    /// The server rejected the statement or sent something unexpected.
    Protocol,
    /// The cancellation token fired before the call finished.
    Cancelled,
    /// Anything else.
    Logic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Io => f.write_str("io"),
            ErrorKind::Protocol => f.write_str("protocol"),
            ErrorKind::Cancelled => f.write_str("cancelled"),
            ErrorKind::Logic => f.write_str("logic"),
        }
    }
}

/// Error reported by an `Executor` or `ResultSet` implementation.
///
/// Cloneable so that a result set can hand out its post-iteration error
/// through `err()` without giving it up.
#[derive(Clone)]
pub struct DriverError {
    kind: ErrorKind,
    message: String,
}

impl DriverError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Logic, message: msg.into() }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Io, message: msg.into() }
    }

    pub fn protocol(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Protocol, message: msg.into() }
    }

    pub fn cancelled() -> Self {
        Self { kind: ErrorKind::Cancelled, message: "operation cancelled".to_string() }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Add context to the error, preserving the original ErrorKind.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        Self {
            kind: self.kind,
            message: format!("{ctx}: {}", self.message),
        }
    }
}

impl fmt::Debug for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DriverError {}

impl From<std::io::Error> for DriverError {
    fn from(e: std::io::Error) -> Self {
        Self::io(e.to_string())
    }
}

/// Error returned by the mapping operations.
///
/// Structural and executor failures end up here. Per-value gaps (a column
/// nobody maps, a value that does not convert) never do.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("query failed: {0}")]
    Query(#[source] DriverError),

    #[error("failed to get row values: {0}")]
    RowRetrieval(#[source] DriverError),

    #[error("row iteration error: {0}")]
    Iteration(#[source] DriverError),

    #[error("invalid destination: {0}")]
    DestinationShape(String),

    #[error("failed to extract record fields: {0}")]
    Extraction(String),

    #[error("no valid fields found for insertion into '{table}'")]
    NoInsertableFields { table: String },

    #[error("insert failed: {0}")]
    Execution(#[source] DriverError),

    #[error("json serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("column '{column}' is claimed by fields '{first}' and '{second}'")]
    AmbiguousColumn {
        column: String,
        first: String,
        second: String,
    },

    #[error("config error: {0}")]
    Config(String),
}

impl MapError {
    /// The executor error behind this failure, if there is one.
    pub fn driver_error(&self) -> Option<&DriverError> {
        match self {
            MapError::Query(e)
            | MapError::RowRetrieval(e)
            | MapError::Iteration(e)
            | MapError::Execution(e) => Some(e),
            _ => None,
        }
    }
}
