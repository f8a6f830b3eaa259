use crate::error::MapError;
use crate::record::{self, Record};
use crate::value::Value;

/// Columns and values pulled from one record, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub columns: Vec<String>,
    pub values: Vec<Value>,
}

impl ExtractedFields {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Walk the declared fields of `record` and collect every mapped column
/// with the field's current value.
///
/// Ignored fields are skipped. For `table.column` annotations only the
/// column part is emitted.
pub fn extract_fields<T: Record>(record: &T) -> Result<ExtractedFields, MapError> {
    record::check_shape::<T>().map_err(MapError::Extraction)?;

    let mut out = ExtractedFields::default();
    for spec in record::field_specs::<T>() {
        let Some(column) = spec.tag.column() else {
            continue;
        };
        let value = record.field_value(spec.index).ok_or_else(|| {
            MapError::Extraction(format!(
                "field '{}' is mapped to '{column}' but has no accessor",
                spec.name
            ))
        })?;
        out.columns.push(column.to_string());
        out.values.push(value);
    }
    Ok(out)
}
