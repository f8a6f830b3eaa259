use crate::error::MapError;
use crate::extract::ExtractedFields;
use crate::value::Value;

/// A rendered INSERT with its positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub sql: String,
    pub args: Vec<Value>,
}

impl InsertStatement {
    /// Render `INSERT INTO {table} ({cols}) VALUES ($1, $2, ...)`.
    ///
    /// Placeholders are numbered from 1 in extraction order. The table name
    /// is inserted verbatim.
    pub fn build(table: &str, fields: ExtractedFields) -> Result<Self, MapError> {
        if fields.is_empty() {
            return Err(MapError::NoInsertableFields {
                table: table.to_string(),
            });
        }

        let placeholders: Vec<String> = (1..=fields.len()).map(|i| format!("${i}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            fields.columns.join(", "),
            placeholders.join(", "),
        );
        Ok(Self {
            sql,
            args: fields.values,
        })
    }
}
