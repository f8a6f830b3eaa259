use tokio_util::sync::CancellationToken;

use crate::config::MapperConfig;
use crate::error::MapError;
use crate::executor::{Executor, OpenResultSet};
use crate::extract::extract_fields;
use crate::insert::InsertStatement;
use crate::record::{self, Record};
use crate::resolve::resolve;
use crate::row_map::RowMap;
use crate::value::Value;

/// Entry point for the mapping operations.
///
/// Holds only immutable configuration; every call builds its own column
/// mapping and row containers, so one `Mapper` can serve concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    config: MapperConfig,
}

impl Mapper {
    pub fn new(config: MapperConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Run `sql` and return each row as a column-name → value map.
    ///
    /// Values are passed through untouched. An empty result yields an empty
    /// vector.
    pub async fn query_maps<E: Executor + ?Sized>(
        &self,
        cancel: &CancellationToken,
        executor: &E,
        sql: &str,
        args: &[Value],
    ) -> Result<Vec<RowMap>, MapError> {
        let rows = executor
            .query(cancel, sql, args)
            .await
            .map_err(MapError::Query)?;
        let mut rows = OpenResultSet::new(rows);
        let columns = rows.columns().to_vec();

        let mut result = Vec::new();
        while rows.next().await {
            let values = rows.values().map_err(MapError::RowRetrieval)?;
            result.push(RowMap::from_row(&columns, values));
        }
        rows.err().map_err(MapError::Iteration)?;

        tracing::debug!(%sql, columns = columns.len(), rows = result.len(), "query_maps done");
        Ok(result)
    }

    /// `query_maps`, serialized as a JSON array of objects.
    pub async fn query_json<E: Executor + ?Sized>(
        &self,
        cancel: &CancellationToken,
        executor: &E,
        sql: &str,
        args: &[Value],
    ) -> Result<Vec<u8>, MapError> {
        let rows = self.query_maps(cancel, executor, sql, args).await?;
        Ok(serde_json::to_vec(&rows)?)
    }

    /// Run `sql` and append one `T` per row to `dest`.
    ///
    /// Columns are matched to fields by annotation (see `resolve`). Unmatched
    /// fields keep their default, values that do not convert are skipped.
    /// On error `dest` is left as it was.
    pub async fn query_records<T: Record, E: Executor + ?Sized>(
        &self,
        cancel: &CancellationToken,
        executor: &E,
        sql: &str,
        dest: &mut Vec<T>,
        args: &[Value],
    ) -> Result<(), MapError> {
        record::check_shape::<T>().map_err(MapError::DestinationShape)?;

        let rows = executor
            .query(cancel, sql, args)
            .await
            .map_err(MapError::Query)?;
        let mut rows = OpenResultSet::new(rows);

        let mapping = resolve(
            rows.columns(),
            &record::field_specs::<T>(),
            self.config.collisions,
        )?;
        tracing::debug!(
            %sql,
            record = std::any::type_name::<T>(),
            columns = rows.columns().len(),
            mapped = mapping.len(),
            "column mapping built"
        );

        let mut staged = Vec::new();
        while rows.next().await {
            let values = rows.values().map_err(MapError::RowRetrieval)?;
            let mut record = T::default();
            for (column, field) in mapping.iter() {
                if let Some(value) = values.get(column) {
                    record.set_field(field, value);
                }
            }
            staged.push(record);
        }
        rows.err().map_err(MapError::Iteration)?;

        tracing::debug!(%sql, rows = staged.len(), "query_records done");
        dest.extend(staged);
        Ok(())
    }

    /// Insert `record` into `table`, one placeholder per mapped field.
    pub async fn insert_record<T: Record, E: Executor + ?Sized>(
        &self,
        cancel: &CancellationToken,
        executor: &E,
        table: &str,
        record: &T,
    ) -> Result<(), MapError> {
        let fields = extract_fields(record)?;
        let stmt = InsertStatement::build(table, fields)?;

        let summary = executor
            .exec(cancel, &stmt.sql, &stmt.args)
            .await
            .map_err(MapError::Execution)?;

        tracing::debug!(sql = %stmt.sql, rows_affected = summary.rows_affected, "insert done");
        Ok(())
    }
}

/// `Mapper::query_maps` with the default configuration.
pub async fn query_maps<E: Executor + ?Sized>(
    cancel: &CancellationToken,
    executor: &E,
    sql: &str,
    args: &[Value],
) -> Result<Vec<RowMap>, MapError> {
    Mapper::default().query_maps(cancel, executor, sql, args).await
}

/// `Mapper::query_json` with the default configuration.
pub async fn query_json<E: Executor + ?Sized>(
    cancel: &CancellationToken,
    executor: &E,
    sql: &str,
    args: &[Value],
) -> Result<Vec<u8>, MapError> {
    Mapper::default().query_json(cancel, executor, sql, args).await
}

/// `Mapper::query_records` with the default configuration.
pub async fn query_records<T: Record, E: Executor + ?Sized>(
    cancel: &CancellationToken,
    executor: &E,
    sql: &str,
    dest: &mut Vec<T>,
    args: &[Value],
) -> Result<(), MapError> {
    Mapper::default()
        .query_records(cancel, executor, sql, dest, args)
        .await
}

/// `Mapper::insert_record` with the default configuration.
pub async fn insert_record<T: Record, E: Executor + ?Sized>(
    cancel: &CancellationToken,
    executor: &E,
    table: &str,
    record: &T,
) -> Result<(), MapError> {
    Mapper::default()
        .insert_record(cancel, executor, table, record)
        .await
}
