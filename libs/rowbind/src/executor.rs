use std::future::Future;
use std::ops::{Deref, DerefMut};
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::error::DriverError;
use crate::value::Value;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Outcome of a statement that returns no rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecSummary {
    pub rows_affected: u64,
}

/// Cursor over the rows of one query.
///
/// The mapper reads `columns()` once, then alternates `next()` / `values()`
/// until `next()` yields `false`, then checks `err()`. `close()` is called
/// exactly once by the mapper, but implementations must tolerate repeated
/// calls and calls after partial iteration.
pub trait ResultSet: Send {
    /// Column names in result order. May contain duplicates.
    fn columns(&self) -> &[String];

    /// Advance to the next row. `false` at the end of the stream or after a
    /// failure, which is then reported by `err()`.
    fn next(&mut self) -> BoxFuture<'_, bool>;

    /// Values of the current row, aligned with `columns()`.
    fn values(&mut self) -> Result<Vec<Value>, DriverError>;

    /// Error that ended iteration, if any.
    fn err(&self) -> Result<(), DriverError>;

    /// Release the cursor.
    fn close(&mut self);
}

/// SQL execution backend (connection, pool, transaction, ...).
///
/// The mapper never interprets `cancel`; it is handed over as received.
pub trait Executor: Send + Sync {
    /// Run a row-returning statement.
    fn query<'a>(
        &'a self,
        cancel: &'a CancellationToken,
        sql: &'a str,
        args: &'a [Value],
    ) -> BoxFuture<'a, Result<Box<dyn ResultSet + 'a>, DriverError>>;

    /// Run a statement without reading rows.
    fn exec<'a>(
        &'a self,
        cancel: &'a CancellationToken,
        sql: &'a str,
        args: &'a [Value],
    ) -> BoxFuture<'a, Result<ExecSummary, DriverError>>;
}

/// Result set owned by one mapper call; closed when dropped.
pub(crate) struct OpenResultSet<'a> {
    inner: Box<dyn ResultSet + 'a>,
}

impl<'a> OpenResultSet<'a> {
    pub(crate) fn new(inner: Box<dyn ResultSet + 'a>) -> Self {
        Self { inner }
    }
}

impl<'a> Deref for OpenResultSet<'a> {
    type Target = dyn ResultSet + 'a;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl<'a> DerefMut for OpenResultSet<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inner.as_mut()
    }
}

impl Drop for OpenResultSet<'_> {
    fn drop(&mut self) {
        self.inner.close();
    }
}
