#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rowbind::executor::BoxFuture;
use rowbind::{DriverError, ExecSummary, Executor, ResultSet, Value};
use tokio_util::sync::CancellationToken;

/// In-memory executor serving one fixed result set.
#[derive(Default)]
pub struct MockDb {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    /// Returned by `query` instead of a result set.
    pub query_error: Option<DriverError>,
    /// `values()` fails on this row index.
    pub values_error_at: Option<usize>,
    /// Reported by `err()` once the rows are exhausted.
    pub iteration_error: Option<DriverError>,
    /// Returned by `exec`.
    pub exec_error: Option<DriverError>,
    /// SQL of every `query` call.
    pub queries: Mutex<Vec<String>>,
    /// SQL and arguments of every `exec` call.
    pub execs: Mutex<Vec<(String, Vec<Value>)>>,
    /// Number of `close()` calls across all result sets.
    pub closed: Arc<AtomicUsize>,
}

impl MockDb {
    pub fn new(columns: &[&str], rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
            ..Default::default()
        }
    }

    /// `id, name, email` with John and Jane.
    pub fn users() -> Self {
        Self::new(
            &["id", "name", "email"],
            vec![
                vec![Value::Int64(1), text("John"), text("john@example.com")],
                vec![Value::Int64(2), text("Jane"), text("jane@example.com")],
            ],
        )
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn close_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn last_exec(&self) -> Option<(String, Vec<Value>)> {
        self.execs.lock().unwrap().last().cloned()
    }
}

impl Executor for MockDb {
    fn query<'a>(
        &'a self,
        cancel: &'a CancellationToken,
        sql: &'a str,
        _args: &'a [Value],
    ) -> BoxFuture<'a, Result<Box<dyn ResultSet + 'a>, DriverError>> {
        Box::pin(async move {
            self.queries.lock().unwrap().push(sql.to_string());
            if cancel.is_cancelled() {
                return Err(DriverError::cancelled());
            }
            if let Some(e) = &self.query_error {
                return Err(e.clone());
            }
            let rows: Box<dyn ResultSet + 'a> = Box::new(MockRows {
                columns: self.columns.clone(),
                rows: self.rows.clone(),
                current: None,
                values_error_at: self.values_error_at,
                iteration_error: self.iteration_error.clone(),
                exhausted: false,
                closed: Arc::clone(&self.closed),
            });
            Ok(rows)
        })
    }

    fn exec<'a>(
        &'a self,
        cancel: &'a CancellationToken,
        sql: &'a str,
        args: &'a [Value],
    ) -> BoxFuture<'a, Result<ExecSummary, DriverError>> {
        Box::pin(async move {
            self.execs
                .lock()
                .unwrap()
                .push((sql.to_string(), args.to_vec()));
            if cancel.is_cancelled() {
                return Err(DriverError::cancelled());
            }
            if let Some(e) = &self.exec_error {
                return Err(e.clone());
            }
            Ok(ExecSummary { rows_affected: 1 })
        })
    }
}

pub struct MockRows {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    current: Option<usize>,
    values_error_at: Option<usize>,
    iteration_error: Option<DriverError>,
    exhausted: bool,
    closed: Arc<AtomicUsize>,
}

impl ResultSet for MockRows {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn next(&mut self) -> BoxFuture<'_, bool> {
        let next = self.current.map_or(0, |i| i + 1);
        self.current = Some(next);
        let has_row = next < self.rows.len();
        if !has_row {
            self.exhausted = true;
        }
        Box::pin(std::future::ready(has_row))
    }

    fn values(&mut self) -> Result<Vec<Value>, DriverError> {
        let Some(i) = self.current else {
            return Err(DriverError::new("values() before next()"));
        };
        if self.values_error_at == Some(i) {
            return Err(DriverError::protocol(format!("corrupt data row {i}")));
        }
        self.rows
            .get(i)
            .cloned()
            .ok_or_else(|| DriverError::new("no current row"))
    }

    fn err(&self) -> Result<(), DriverError> {
        match &self.iteration_error {
            Some(e) if self.exhausted => Err(e.clone()),
            _ => Ok(()),
        }
    }

    fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

/// Install a test subscriber so `RUST_LOG=rowbind=trace` shows mapper events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}
